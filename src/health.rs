//! Liveness and readiness probes.
//!
//! | Probe | Path | Answers |
//! |---|---|---|
//! | Liveness | `/healthz` | `200 ok` while the process can serve HTTP |
//! | Readiness | `/readyz` | `200 ready` when the database answers a ping, else `503` |

use std::sync::Arc;

use tracing::warn;

use crate::db::Database;
use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Readiness handler gated on a database ping.
pub fn readiness(db: Arc<Database>) -> impl Handler {
    move |_req: Request| {
        let db = Arc::clone(&db);
        async move {
            match db.ping().await {
                Ok(()) => Response::text("ready"),
                Err(e) => {
                    warn!(error = %e, "readiness check failed");
                    Response::builder().status(Status::ServiceUnavailable).text("not ready")
                }
            }
        }
    }
}
