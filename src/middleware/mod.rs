//! Middleware layer.
//!
//! Cross-cutting steps the router runs around every handler:
//! - [`json`]: parses the request body once, before routing
//! - [`trace`]: one log line per request with method, path, status, latency

pub(crate) mod json;
pub(crate) mod trace;
