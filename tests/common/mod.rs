#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use mytrip::config::DatabaseConfig;
use mytrip::{Database, Error, Router, Server};
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const SCHEMA: &[&str] = &[
    "CREATE TABLE list_payment (pg_code TEXT NOT NULL, pg_name TEXT, merchant_id TEXT NOT NULL)",
    "CREATE TABLE trip (AirlineName TEXT, AirportName TEXT, CityName TEXT)",
    "CREATE TABLE orders (id INTEGER PRIMARY KEY AUTOINCREMENT, order_id TEXT, customer_id TEXT, \
     employee_id TEXT, order_date TEXT)",
    "CREATE TABLE order_details (order_id TEXT, product_id TEXT, product_name TEXT, \
     unit_price REAL, quantity INTEGER)",
    "CREATE TABLE customers (customer_id TEXT, company_name TEXT, contact_name TEXT, \
     contact_title TEXT, address TEXT, city TEXT, country TEXT, phone TEXT, postal_code TEXT)",
];

/// Database settings pointing at a fresh SQLite file inside `dir`.
pub fn sqlite_config(dir: &TempDir) -> DatabaseConfig {
    let path = dir.path().join("mytrip.db");
    let mut config = DatabaseConfig::default();
    config.driver = "sqlite".to_owned();
    config.url = format!("sqlite://{}?mode=rwc", path.display());
    config.pool.max_open = 4;
    config.pool.max_idle = 1;
    config
}

/// Opens a database in `dir` with every table the handlers touch.
pub async fn open_database(dir: &TempDir) -> Arc<Database> {
    open_database_with(sqlite_config(dir)).await
}

/// Opens a database from `config` and creates the schema.
pub async fn open_database_with(config: DatabaseConfig) -> Arc<Database> {
    let db = Database::new(config);
    db.open().await.unwrap();
    for statement in SCHEMA {
        db.exec(statement, &[]).await.unwrap();
    }
    Arc::new(db)
}

pub async fn count(db: &Database, table: &str) -> String {
    let rows = db.queryf(format_args!("SELECT COUNT(*) AS n FROM {table}")).await.unwrap();
    mytrip::db::first_row_value(&rows, "n").unwrap()
}

/// A server running on an ephemeral port until [`Running::stop`].
pub struct Running {
    pub addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), Error>>,
}

impl Running {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn stop(self) {
        let _ = self.stop.send(());
        self.handle.await.unwrap().unwrap();
    }
}

pub async fn spawn_server(router: Router) -> Running {
    let server = Server::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr();
    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_with_shutdown(router, async {
        let _ = stopped.await;
    }));
    Running { addr, stop, handle }
}

/// Sends `body` with `method` to `url`; returns status and raw body.
pub async fn send(method: &str, url: &str, body: &str) -> (u16, Bytes) {
    let client = Client::builder(TokioExecutor::new()).build_http::<Full<Bytes>>();
    let request = http::Request::builder()
        .method(method)
        .uri(url)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body.to_owned())))
        .unwrap();
    let response = client.request(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes)
}

/// POSTs `body` to `url` and parses the JSON answer.
pub async fn post_json(url: &str, body: &str) -> (u16, Value) {
    let (status, bytes) = send("POST", url, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}
