//! # mytrip
//!
//! A small JSON API for orders, customers, payment-channel lookup and trip
//! search, on top of a minimal hyper-based HTTP layer.
//!
//! ## Endpoints
//!
//! | Method | Path | Body in | Body out |
//! |---|---|---|---|
//! | POST | `{root}/orders`   | order message | order message |
//! | POST | `{root}/costumer` | customer | customer |
//! | POST | `{root}/fastpay`  | FastPay request | payment channels |
//! | POST | `{root}/trips`    | date range + province | trip details |
//! | GET  | `/healthz`, `/readyz` | | probe text |
//!
//! Every business response is JSON. When a payload carries a code its HTTP
//! status follows the code: `< 2` → 200, `< 90` → 400, anything else → 500.
//!
//! ## Wiring
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mytrip::{Config, Database, PaymentService, Server, TripClient, app};
//!
//! # async fn run() -> Result<(), mytrip::Error> {
//! let config = Config::load("conf-dev.yml")?;
//! let db = Arc::new(Database::new(config.database.clone()));
//! db.open().await?;
//! let trips = TripClient::new(&config.trip_service_url)?;
//! let service = Arc::new(PaymentService::new(Arc::clone(&db), trips));
//!
//! Server::bind(&config.listen_addr()).await?
//!     .serve(app::routes(&config, service))
//!     .await
//! # }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod app;
pub mod config;
pub mod db;
pub mod health;
pub mod middleware;
pub mod model;
pub mod service;
pub mod transport;
pub mod trip_client;

pub use config::Config;
pub use db::Database;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;
pub use service::PaymentService;
pub use status::Status;
pub use trip_client::TripClient;
