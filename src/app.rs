//! Route table of the service.

use std::future::Future;
use std::sync::Arc;

use crate::config::Config;
use crate::health;
use crate::middleware::logged;
use crate::router::Router;
use crate::service::PaymentService;
use crate::transport::endpoint;

/// Builds the router: the four business endpoints under the configured
/// root, plus the health probes at the top level.
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | POST | `{root}/orders`   | [`PaymentService::order`] |
/// | POST | `{root}/costumer` | [`PaymentService::customer`] |
/// | POST | `{root}/fastpay`  | [`PaymentService::fastpay`] |
/// | POST | `{root}/trips`    | [`PaymentService::trips`] |
pub fn routes(config: &Config, service: Arc<PaymentService>) -> Router {
    let root = config.root();
    let db = Arc::clone(service.database());

    Router::new()
        .post(
            &format!("{root}/orders"),
            endpoint("orders", logged("OrderHandler", bind(&service, PaymentService::order))),
        )
        .post(
            &format!("{root}/costumer"),
            endpoint("costumer", logged("CustomerHandler", bind(&service, PaymentService::customer))),
        )
        .post(
            &format!("{root}/fastpay"),
            endpoint("fastpay", logged("FastPayHandler", bind(&service, PaymentService::fastpay))),
        )
        .post(
            &format!("{root}/trips"),
            endpoint("trips", logged("TripsHandler", bind(&service, PaymentService::trips))),
        )
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness(db))
}

/// Closes a service method over the shared service handle.
fn bind<Req, Fut, M>(
    service: &Arc<PaymentService>,
    method: M,
) -> impl Fn(Req) -> Fut + Send + Sync + 'static + use<Req, Fut, M>
where
    M: Fn(Arc<PaymentService>, Req) -> Fut + Send + Sync + 'static,
    Req: 'static,
    Fut: Future + 'static,
{
    let service = Arc::clone(service);
    move |req| method(Arc::clone(&service), req)
}
