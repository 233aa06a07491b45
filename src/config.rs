//! Service configuration.
//!
//! Loaded once from a YAML file at startup and handed to the components that
//! need it. Nothing here is mutated after [`Config::load`] returns.
//!
//! ```yaml
//! root_url: /mytrip
//! listen_port: 8080
//! trip_service_url: http://35.186.147.192/travel/GetTripsSample.php
//! database:
//!   driver: mysql
//!   host: 127.0.0.1
//!   port: 3306
//!   username: app
//!   password: secret
//!   schema: mytrip
//!   sql:
//!     fastpay.payment_channels: SELECT pg_code, pg_name FROM list_payment WHERE merchant_id = ?
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Error;

/// Named queries the handlers execute.
pub mod queries {
    pub const PAYMENT_CHANNELS: &str = "fastpay.payment_channels";
    pub const INSERT_TRIP: &str = "trips.insert";
    pub const INSERT_ORDER: &str = "orders.insert";
    pub const INSERT_ORDER_DETAIL: &str = "orders.insert_detail";
    pub const INSERT_CUSTOMER: &str = "customers.insert";
}

const DEFAULT_TRIP_SERVICE: &str = "http://35.186.147.192/travel/GetTripsSample.php";

/// Top-level service configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix prepended to every business route, e.g. `/mytrip`.
    pub root_url: String,
    pub listen_host: String,
    pub listen_port: u16,
    /// Endpoint of the third-party trip-data service.
    pub trip_service_url: String,
    pub database: DatabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_url: String::new(),
            listen_host: "0.0.0.0".to_owned(),
            listen_port: 8080,
            trip_service_url: DEFAULT_TRIP_SERVICE.to_owned(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Reads and parses the YAML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    /// Parses configuration from YAML text. Built-in SQL is filled in for
    /// every named query the file does not override.
    pub fn from_yaml(raw: &str) -> Result<Self, Error> {
        let mut config: Config = serde_yaml::from_str(raw)?;
        config.database.fill_default_sql();
        Ok(config)
    }

    /// `host:port` the server binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.listen_port)
    }

    /// Root prefix without a trailing slash; empty means the routes hang off `/`.
    pub fn root(&self) -> &str {
        self.root_url.trim_end_matches('/')
    }
}

/// Connection settings plus the logical-name → SQL mapping.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx driver scheme: `mysql`, `sqlite`, `postgres`.
    pub driver: String,
    /// Raw connection URL, used unless the discrete fields below are all set.
    pub url: String,
    pub host: String,
    pub port: Option<u16>,
    pub username: String,
    pub password: String,
    pub schema: String,
    pub sql: HashMap<String, String>,
    pub pool: PoolConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: "mysql".to_owned(),
            url: String::new(),
            host: String::new(),
            port: None,
            username: String::new(),
            password: String::new(),
            schema: String::new(),
            sql: default_sql(),
            pool: PoolConfig::default(),
        }
    }
}

impl DatabaseConfig {
    /// Connection URL the pool is opened with.
    ///
    /// Discrete fields win over `url`, but only when username, password, host
    /// and schema are all present.
    pub fn connection_url(&self) -> String {
        let discrete = [&self.username, &self.password, &self.host, &self.schema];
        if discrete.iter().any(|field| field.is_empty()) {
            return self.url.clone();
        }
        let host = match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        };
        format!(
            "{}://{}:{}@{host}/{}",
            self.driver, self.username, self.password, self.schema
        )
    }

    fn fill_default_sql(&mut self) {
        for (name, sql) in default_sql() {
            self.sql.entry(name).or_insert(sql);
        }
    }
}

/// Pool bounds.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub max_open: u32,
    /// Idle connections the pool keeps warm.
    pub max_idle: u32,
    pub max_lifetime_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { max_open: 100, max_idle: 20, max_lifetime_secs: 30 * 60 }
    }
}

impl PoolConfig {
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }
}

fn default_sql() -> HashMap<String, String> {
    [
        (
            queries::PAYMENT_CHANNELS,
            "SELECT pg_code, COALESCE(pg_name, '') AS pg_name FROM list_payment WHERE merchant_id = ?",
        ),
        (
            queries::INSERT_TRIP,
            "INSERT INTO trip (AirlineName, AirportName, CityName) VALUES (?, ?, ?)",
        ),
        (
            queries::INSERT_ORDER,
            "INSERT INTO orders (order_id, customer_id, employee_id, order_date) VALUES (?, ?, ?, ?)",
        ),
        (
            queries::INSERT_ORDER_DETAIL,
            "INSERT INTO order_details (order_id, product_id, product_name, unit_price, quantity) \
             VALUES (?, ?, ?, ?, ?)",
        ),
        (
            queries::INSERT_CUSTOMER,
            "INSERT INTO customers (customer_id, company_name, contact_name, contact_title, \
             address, city, country, phone, postal_code) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        ),
    ]
    .into_iter()
    .map(|(name, sql)| (name.to_owned(), sql.to_owned()))
    .collect()
}
