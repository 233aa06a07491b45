use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use super::PaymentService;
use crate::config::queries;
use crate::error::Error;
use crate::model::{TripRequest, TripResponse};

impl PaymentService {
    /// Fetches trips from the trip-data service and records one `trip` row
    /// per returned detail.
    pub async fn trips(self: Arc<Self>, req: TripRequest) -> Result<TripResponse, Error> {
        let found = self.trips.fetch(&req).await?;

        for detail in &found.trips {
            debug!(
                airline = %detail.airline_name,
                airport = %detail.airport_name,
                city = %detail.city_name,
                "recording trip"
            );
            self.db
                .exec(
                    queries::INSERT_TRIP,
                    &[
                        json!(detail.airline_name),
                        json!(detail.airport_name),
                        json!(detail.city_name),
                    ],
                )
                .await?;
        }

        Ok(TripResponse {
            message: found.message,
            status: found.status,
            trips: found.trips,
            result: None,
        })
    }
}
