//! Timing and logging around business handlers.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use tracing::info;

/// Boxed future returned by wrapped handlers.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Wraps `handler` so every call logs `"{name} begins"` with the request and
/// `"{name} ends"` with the elapsed milliseconds.
///
/// The inner result is returned untouched, errors included.
///
/// ```rust,ignore
/// let fastpay = logged("FastPayHandler", move |req| service.clone().fastpay(req));
/// ```
pub fn logged<Req, Out, F, Fut>(
    name: &'static str,
    handler: F,
) -> impl Fn(Req) -> BoxFuture<Out> + Send + Sync + 'static
where
    Req: fmt::Debug + 'static,
    Out: 'static,
    F: Fn(Req) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Out> + Send + 'static,
{
    move |request: Req| {
        let begin = Instant::now();
        info!(handler = name, ?request, "{name} begins");
        let fut = handler(request);
        Box::pin(async move {
            let out = fut.await;
            info!(
                handler = name,
                exec_time_ms = begin.elapsed().as_secs_f64() * 1e3,
                "{name} ends"
            );
            out
        })
    }
}
