//! JSON request decoding, response encoding and the endpoint glue between
//! them.
//!
//! ```text
//! Request ──decode──▶ Req ──handler──▶ Result<Res, Error> ──encode──▶ Response
//!            │                               │
//!            └─ Outcome 100 / 99             └─ Outcome 98 (error or panic)
//!               (bad JSON / not an object)
//! ```
//!
//! Nothing here ever fails the transport: every problem becomes an
//! [`Outcome`] envelope whose code picks the HTTP status.

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::handler::Handler;
use crate::model::{Coded, Outcome};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Decodes the body of `req` into `T`.
///
/// The body must be a JSON object. Anything else that parses (an array, a
/// string, a number) yields code 99. An unreadable body, malformed JSON and
/// an object whose fields do not fit `T` all yield code 100.
pub fn decode<T: DeserializeOwned>(endpoint: &str, req: &Request) -> Result<T, Outcome> {
    let Some(body) = req.body() else {
        return Err(Outcome::unreadable_body());
    };
    debug!(endpoint, body = %String::from_utf8_lossy(body), "decoding request");

    let value = serde_json::from_slice::<Value>(body).map_err(|e| {
        info!(endpoint, error = %e, "malformed request body");
        Outcome::malformed_json()
    })?;
    if !value.is_object() {
        info!(endpoint, "request body is not a JSON object");
        return Err(Outcome::invalid_request());
    }
    serde_json::from_value(value).map_err(|e| {
        info!(endpoint, error = %e, "request does not fit");
        Outcome::malformed_json()
    })
}

/// HTTP status for an envelope code: `< 2` → 200, `< 90` → 400, else 500.
///
/// Decode failures carry code 100 and therefore surface as 500.
pub fn status_for_code(code: i64) -> Status {
    if code < 2 {
        Status::Ok
    } else if code < 90 {
        Status::BadRequest
    } else {
        Status::InternalServerError
    }
}

/// Serializes `payload` as JSON. Payloads without a code answer 200.
pub fn encode<T: Serialize + Coded>(payload: &T) -> Response {
    let status = payload.code().map_or(Status::Ok, status_for_code);
    match serde_json::to_vec(payload) {
        Ok(body) => Response::builder().status(status).json(body),
        Err(e) => {
            error!(error = %e, "response encoding failed");
            let fallback = serde_json::to_vec(&Outcome::internal()).unwrap_or_default();
            Response::builder().status(Status::InternalServerError).json(fallback)
        }
    }
}

/// Builds a route handler from a typed business handler.
///
/// The handler runs on its own task, so a panic is caught here exactly like
/// an `Err`: both are logged and answered with [`Outcome::internal`].
pub fn endpoint<Req, Res, F, Fut>(name: &'static str, handler: F) -> impl Handler
where
    Req: DeserializeOwned + Send + 'static,
    Res: Serialize + Coded + Send + 'static,
    F: Fn(Req) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Res, Error>> + Send + 'static,
{
    move |req: Request| {
        let call = decode::<Req>(name, &req).map(&handler);
        async move {
            let fut = match call {
                Ok(fut) => fut,
                Err(rejection) => return encode(&rejection),
            };
            match tokio::spawn(fut).await {
                Ok(Ok(res)) => encode(&res),
                Ok(Err(e)) => {
                    error!(endpoint = name, error = %e, "handler failed");
                    encode(&Outcome::internal())
                }
                Err(e) => {
                    error!(endpoint = name, panicked = e.is_panic(), "handler aborted");
                    encode(&Outcome::internal())
                }
            }
        }
    }
}
