use std::sync::Arc;

use serde_json::json;
use tracing::info;

use super::PaymentService;
use crate::config::queries;
use crate::error::Error;
use crate::model::{OrderMessage, Outcome, code};

impl PaymentService {
    /// Stores an order header and its detail lines in one transaction.
    ///
    /// A message without `orders` is answered with code 10.
    pub async fn order(self: Arc<Self>, mut msg: OrderMessage) -> Result<OrderMessage, Error> {
        let Some(order) = msg.orders.as_ref() else {
            msg.result = Some(Outcome::new(code::MISSING_ORDERS, "Missing orders"));
            return Ok(msg);
        };

        let mut unit = self.db.unit_of_work().await?;
        let row_id = unit
            .insert_and_get_id(
                queries::INSERT_ORDER,
                &[
                    json!(order.order_id),
                    json!(order.customer_id),
                    json!(order.employee_id),
                    json!(order.order_date),
                ],
            )
            .await?;

        for detail in &order.details {
            unit.exec(
                queries::INSERT_ORDER_DETAIL,
                &[
                    json!(order.order_id),
                    json!(detail.product_id),
                    json!(detail.product_name),
                    json!(detail.unit_price),
                    json!(detail.quantity),
                ],
            )
            .await?;
        }
        unit.commit().await?;
        info!(order_id = %order.order_id, row_id, lines = order.details.len(), "order stored");

        msg.order_id = order.order_id.clone();
        msg.code = code::SUCCESS;
        msg.remark = "Success".to_owned();
        msg.result = None;
        Ok(msg)
    }
}
