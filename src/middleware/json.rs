//! JSON body parser.

use serde_json::Value;
use tracing::debug;

use crate::api_error::ApiError;
use crate::request::Request;

/// Parses a non-empty body into [`Request::payload`].
///
/// An empty body leaves the payload unset. Anything else must be a JSON
/// object or array, whatever the `content-type` says. Top-level scalars such
/// as `42` or `null` are rejected like malformed JSON.
pub(crate) fn parse_body(req: &mut Request) -> Result<(), ApiError> {
    if req.body.is_empty() {
        return Ok(());
    }
    match serde_json::from_slice::<Value>(&req.body) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => {
            req.payload = Some(value);
            Ok(())
        }
        Ok(_) => {
            debug!(method = %req.method, path = %req.path, "rejecting scalar JSON body");
            Err(ApiError::BareJsonValue)
        }
        Err(e) => {
            debug!(method = %req.method, path = %req.path, error = %e, "rejecting malformed JSON body");
            Err(ApiError::InvalidJson(e))
        }
    }
}
