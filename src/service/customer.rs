use std::sync::Arc;

use serde_json::json;
use tracing::info;

use super::PaymentService;
use crate::config::queries;
use crate::error::Error;
use crate::model::Customer;

impl PaymentService {
    /// Stores a customer and echoes it back.
    pub async fn customer(self: Arc<Self>, mut customer: Customer) -> Result<Customer, Error> {
        let inserted = self
            .db
            .exec(
                queries::INSERT_CUSTOMER,
                &[
                    json!(customer.customer_id),
                    json!(customer.company_name),
                    json!(customer.contact_name),
                    json!(customer.contact_title),
                    json!(customer.address),
                    json!(customer.city),
                    json!(customer.country),
                    json!(customer.phone),
                    json!(customer.postal_code),
                ],
            )
            .await?;
        info!(customer_id = %customer.customer_id, inserted, "customer stored");
        customer.result = None;
        Ok(customer)
    }
}
