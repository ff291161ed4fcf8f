//! Per-request access log.

use std::time::Duration;

use http::StatusCode;
use tracing::{error, info, warn};

/// Logs one finished request. Level follows the status class.
pub(crate) fn record(method: &str, path: &str, status: StatusCode, elapsed: Duration) {
    let status = status.as_u16();
    let latency_ms = elapsed.as_secs_f64() * 1000.0;
    match status {
        500.. => error!(method, path, status, latency_ms, "request"),
        400..=499 => warn!(method, path, status, latency_ms, "request"),
        _ => info!(method, path, status, latency_ms, "request"),
    }
}
