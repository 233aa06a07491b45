//! Middleware layer.
//!
//! Middleware here is plain composition: a function that takes a handler
//! and returns another handler calling it. No trait objects, no stack.
//!
//! - [`trace::logged`]: begin/end log lines and execution time per call

pub mod trace;

pub use trace::logged;
