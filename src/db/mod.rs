//! Database connection manager and SQL execution wrapper.
//!
//! One [`Database`] owns the pooled handle and at most one open transaction.
//! It is built once at startup and shared by `Arc` across every request;
//! concurrency is left to the sqlx pool.
//!
//! Statements are addressed by *logical name*: the name is looked up in the
//! configured SQL mapping and, when absent, sent to the driver as raw SQL.
//!
//! ```text
//! Unopened ──open()──▶ Opened ──begin()──▶ Transacting
//!                        ▲  ◀─commit()/rollback()─┘
//!                        └──close()──▶ Closed
//! ```

mod rows;

use std::fmt;
use std::future::Future;

use serde_json::Value;
use sqlx::any::{Any, AnyArguments, AnyPoolOptions, AnyRow};
use sqlx::query::Query;
use sqlx::{AnyConnection, AnyPool, Connection, Transaction};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::error::Error;

pub use rows::{RowMapping, first_row_value, to_row_mapping};

/// The shared database handle.
pub struct Database {
    config: DatabaseConfig,
    pool: RwLock<Option<AnyPool>>,
    tx: Mutex<Option<Transaction<'static, Any>>>,
}

impl Database {
    /// Creates an unopened handle. Nothing touches the network until
    /// [`open`](Database::open).
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config, pool: RwLock::new(None), tx: Mutex::new(None) }
    }

    /// Looks `name` up in the SQL mapping, falling back to `name` itself.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.config.sql.get(name).map_or(name, String::as_str)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Opens a fresh pool, replacing any previous one, and pings it.
    pub async fn open(&self) -> Result<(), Error> {
        sqlx::any::install_default_drivers();
        self.close().await;

        let url = self.config.connection_url();
        let bounds = &self.config.pool;
        let pool = AnyPoolOptions::new()
            .max_connections(bounds.max_open)
            .min_connections(bounds.max_idle.min(bounds.max_open))
            .max_lifetime(bounds.max_lifetime())
            .connect(&url)
            .await
            .map_err(Error::Connection)?;

        let mut conn = pool.acquire().await.map_err(Error::Connection)?;
        conn.ping().await.map_err(Error::Connection)?;
        drop(conn);

        *self.pool.write().await = Some(pool);
        info!(driver = %self.config.driver, max_open = bounds.max_open, "database opened");
        Ok(())
    }

    /// Closes the pool. Calling it on a closed handle does nothing.
    ///
    /// An open transaction is rolled back first.
    pub async fn close(&self) {
        if let Some(tx) = self.tx.lock().await.take() {
            if let Err(e) = tx.rollback().await {
                warn!(error = %e, "rollback on close failed");
            }
        }
        if let Some(pool) = self.pool.write().await.take() {
            pool.close().await;
            info!("database closed");
        }
    }

    pub async fn is_open(&self) -> bool {
        self.pool.read().await.is_some()
    }

    /// Acquires a connection and pings it.
    pub async fn ping(&self) -> Result<(), Error> {
        let pool = self.pool().await?;
        let mut conn = pool.acquire().await?;
        conn.ping().await?;
        Ok(())
    }

    pub async fn begin(&self) -> Result<(), Error> {
        let pool = self.pool().await?;
        let mut slot = self.tx.lock().await;
        if slot.is_some() {
            return Err(Error::TransactionAlreadyOpen);
        }
        *slot = Some(pool.begin().await?);
        debug!("transaction started");
        Ok(())
    }

    pub async fn commit(&self) -> Result<(), Error> {
        let tx = self.tx.lock().await.take().ok_or(Error::NoActiveTransaction)?;
        tx.commit().await?;
        debug!("transaction committed");
        Ok(())
    }

    pub async fn rollback(&self) -> Result<(), Error> {
        let tx = self.tx.lock().await.take().ok_or(Error::NoActiveTransaction)?;
        tx.rollback().await?;
        debug!("transaction rolled back");
        Ok(())
    }

    // ── Statements ────────────────────────────────────────────────────────────

    /// Runs a SELECT and returns every row.
    pub async fn query(&self, name: &str, args: &[Value]) -> Result<Vec<AnyRow>, Error> {
        let pool = self.pool().await?;
        let rows = bind_all(sqlx::query(self.resolve(name)), args).fetch_all(&pool).await?;
        Ok(rows)
    }

    /// Runs an UPDATE/INSERT/DELETE and returns the affected-row count.
    pub async fn exec(&self, name: &str, args: &[Value]) -> Result<u64, Error> {
        let pool = self.pool().await?;
        let done = bind_all(sqlx::query(self.resolve(name)), args).execute(&pool).await?;
        Ok(done.rows_affected())
    }

    /// Runs an INSERT and returns the id the database generated for it.
    pub async fn insert_and_get_id(&self, name: &str, args: &[Value]) -> Result<i64, Error> {
        let pool = self.pool().await?;
        let mut conn = pool.acquire().await?;
        insert_returning_id(&mut conn, self.resolve(name), args).await
    }

    /// Starts a [`UnitOfWork`] on a connection of its own. It does not touch
    /// the shared transaction driven by [`begin`](Database::begin).
    pub async fn unit_of_work(&self) -> Result<UnitOfWork<'_>, Error> {
        let pool = self.pool().await?;
        let tx = pool.begin().await?;
        Ok(UnitOfWork { db: self, tx })
    }

    /// [`query`](Database::query) on the open transaction.
    pub async fn query_tx(&self, name: &str, args: &[Value]) -> Result<Vec<AnyRow>, Error> {
        let mut slot = self.tx.lock().await;
        let tx = slot.as_mut().ok_or(Error::NoActiveTransaction)?;
        let rows = bind_all(sqlx::query(self.resolve(name)), args).fetch_all(&mut **tx).await?;
        Ok(rows)
    }

    /// [`exec`](Database::exec) on the open transaction.
    pub async fn exec_tx(&self, name: &str, args: &[Value]) -> Result<u64, Error> {
        let mut slot = self.tx.lock().await;
        let tx = slot.as_mut().ok_or(Error::NoActiveTransaction)?;
        let done = bind_all(sqlx::query(self.resolve(name)), args).execute(&mut **tx).await?;
        Ok(done.rows_affected())
    }

    /// Formats `sql` and runs it as a query. The arguments are pasted into
    /// the text as-is: escaping is the caller's job.
    ///
    /// ```rust,ignore
    /// db.queryf(format_args!("SELECT * FROM trip WHERE CityName = '{city}'")).await?;
    /// ```
    pub fn queryf<'a>(
        &'a self,
        sql: fmt::Arguments<'_>,
    ) -> impl Future<Output = Result<Vec<AnyRow>, Error>> + use<'a> {
        let sql = sql.to_string();
        async move { self.query(&sql, &[]).await }
    }

    /// Formats `sql` and runs it as a statement. No escaping.
    pub fn execf<'a>(
        &'a self,
        sql: fmt::Arguments<'_>,
    ) -> impl Future<Output = Result<u64, Error>> + use<'a> {
        let sql = sql.to_string();
        async move { self.exec(&sql, &[]).await }
    }

    async fn pool(&self) -> Result<AnyPool, Error> {
        self.pool.read().await.clone().ok_or(Error::NotConnected)
    }
}

/// Statements that land together or not at all.
///
/// Dropping a unit without [`commit`](UnitOfWork::commit) rolls it back.
pub struct UnitOfWork<'a> {
    db: &'a Database,
    tx: Transaction<'static, Any>,
}

impl UnitOfWork<'_> {
    pub async fn exec(&mut self, name: &str, args: &[Value]) -> Result<u64, Error> {
        let sql = self.db.resolve(name);
        let done = bind_all(sqlx::query(sql), args).execute(&mut *self.tx).await?;
        Ok(done.rows_affected())
    }

    pub async fn insert_and_get_id(&mut self, name: &str, args: &[Value]) -> Result<i64, Error> {
        insert_returning_id(&mut self.tx, self.db.resolve(name), args).await
    }

    pub async fn commit(self) -> Result<(), Error> {
        self.tx.commit().await?;
        Ok(())
    }
}

/// Runs `sql` on `conn` and reads back the generated id on that same
/// connection. The SQLite bridge of the `any` driver never reports it, so
/// there it is asked for explicitly.
async fn insert_returning_id(conn: &mut AnyConnection, sql: &str, args: &[Value]) -> Result<i64, Error> {
    let done = bind_all(sqlx::query(sql), args).execute(&mut *conn).await?;
    if let Some(id) = done.last_insert_id() {
        return Ok(id);
    }
    if conn.backend_name().eq_ignore_ascii_case("sqlite") {
        let id: i64 = sqlx::query_scalar("SELECT last_insert_rowid()").fetch_one(&mut *conn).await?;
        return Ok(id);
    }
    Err(Error::MissingInsertId)
}

type AnyQuery<'q> = Query<'q, Any, AnyArguments<'q>>;

fn bind_all<'q>(mut query: AnyQuery<'q>, args: &[Value]) -> AnyQuery<'q> {
    for arg in args {
        query = bind_value(query, arg);
    }
    query
}

fn bind_value<'q>(query: AnyQuery<'q>, value: &Value) -> AnyQuery<'q> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else if let Some(f) = n.as_f64() {
                query.bind(f)
            } else {
                query.bind(n.to_string())
            }
        }
        Value::String(s) => query.bind(s.clone()),
        other => query.bind(other.to_string()),
    }
}
