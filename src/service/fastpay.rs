use std::sync::Arc;

use serde_json::json;

use super::PaymentService;
use crate::config::queries;
use crate::db::to_row_mapping;
use crate::error::Error;
use crate::model::{FastPayRequest, FastPayResponse, PaymentChannel};

impl PaymentService {
    /// Lists the payment channels enabled for the requesting merchant.
    pub async fn fastpay(self: Arc<Self>, req: FastPayRequest) -> Result<FastPayResponse, Error> {
        let rows = self.db.query(queries::PAYMENT_CHANNELS, &[json!(req.merchant_id)]).await?;

        let payment_channel = to_row_mapping(&rows)?
            .into_values()
            .map(|mut row| PaymentChannel {
                pg_code: row.remove("pg_code").unwrap_or_default(),
                pg_name: row.remove("pg_name").unwrap_or_default(),
            })
            .collect();

        Ok(FastPayResponse {
            merchant: req.merchant,
            merchant_id: req.merchant_id,
            payment_channel,
            ..FastPayResponse::default()
        })
    }
}
