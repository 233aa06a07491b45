//! Radix-tree request router.
//!
//! One tree per HTTP method. The service registers its handful of routes at
//! startup and never touches the table again.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or is already registered for
    /// `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Option<BoxedHandler> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        Some(Arc::clone(matched.value))
    }

    /// Routes one buffered request. Unmatched requests get `404 Not Found`.
    pub(crate) async fn dispatch(&self, req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Some(handler) => handler.call(req).await,
            None => Response::status(Status::NotFound),
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
