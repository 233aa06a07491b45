//! Incoming HTTP request type.

use bytes::Bytes;

use crate::method::Method;

/// An incoming HTTP request with its body fully buffered.
pub struct Request {
    method: Method,
    path: String,
    body: Option<Bytes>,
}

impl Request {
    /// `body` is `None` when it could not be read in full; the decoder turns
    /// that into an envelope instead of a 4xx/5xx.
    pub(crate) fn new(method: Method, path: String, body: Option<Bytes>) -> Self {
        Self { method, path, body }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }

    /// Raw body bytes, or `None` if the body could not be read.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

#[cfg(test)]
impl Request {
    /// A POST to `path` carrying `body`.
    pub(crate) fn post(path: &str, body: &[u8]) -> Self {
        Self::new(Method::Post, path.to_owned(), Some(Bytes::copy_from_slice(body)))
    }
}
