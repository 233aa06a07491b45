//! Business handlers behind the four endpoints.
//!
//! Each handler does one thing against the database or the trip service and
//! returns a response envelope. Failures are plain `Err`s; turning them into
//! envelopes is the endpoint layer's job.

mod customer;
mod fastpay;
mod order;
mod trip;

use std::sync::Arc;

use crate::db::Database;
use crate::trip_client::TripClient;

/// Shared state of the business handlers.
pub struct PaymentService {
    db: Arc<Database>,
    trips: TripClient,
}

impl PaymentService {
    pub fn new(db: Arc<Database>, trips: TripClient) -> Self {
        Self { db, trips }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }
}
