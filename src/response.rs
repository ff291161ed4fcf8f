//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Every body this service sends is JSON, so the constructors take a
//! serializable value rather than raw bytes.

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

use crate::status::Status;

/// Body sent when a response value cannot be serialized.
const SERIALIZE_FAILURE_BODY: &[u8] = br#"{"error":"Internal Server Error"}"#;

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use serde_json::json;
/// use shoplist::{Response, Status};
///
/// Response::json(Status::Ok, &json!({ "message": "Deleted" }));
///
/// Response::builder()
///     .status(Status::Created)
///     .header("location", "/items/popsicle")
///     .json(&json!({ "added": { "name": "popsicle", "price": 1.45 } }));
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: StatusCode,
}

impl Response {
    /// `application/json` response with the given status.
    pub fn json<T: Serialize + ?Sized>(status: impl Into<StatusCode>, value: &T) -> Self {
        Self::builder().status(status).json(value)
    }

    /// Response with no body.
    pub fn status(code: impl Into<StatusCode>) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code.into() }
    }

    /// Builder for responses that need extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok.into() }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Converts into the hyper response handed back to the connection.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status;
        let headers = res.headers_mut();
        for (name, value) in self.headers {
            match (
                http::HeaderName::from_bytes(name.as_bytes()),
                http::HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.append(name, value);
                }
                _ => error!(header = %name, "dropping unrepresentable response header"),
            }
        }
        res
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: impl Into<StatusCode>) -> Self {
        self.status = code.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a JSON body (`application/json`).
    ///
    /// A value that fails to serialize turns the response into a 500.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Response {
        match serde_json::to_vec(value) {
            Ok(body) => self.finish("application/json", body),
            Err(e) => {
                error!("response serialization failed: {e}");
                Response {
                    body: SERIALIZE_FAILURE_BODY.to_vec(),
                    headers: vec![("content-type".to_owned(), "application/json".to_owned())],
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
        }
    }

    fn finish(self, content_type: &str, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Handlers return `Result<Response, ApiError>`; both sides implement this
/// trait, so the error is translated into its fixed JSON body exactly once,
/// at the handler boundary.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

/// Return a [`Status`] directly from a handler: `return Status::NotFound`
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::status(self) }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: IntoResponse,
{
    fn into_response(self) -> Response {
        match self {
            Ok(ok) => ok.into_response(),
            Err(err) => err.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn json_sets_status_and_content_type() {
        let res = Response::json(Status::Created, &json!({ "added": { "name": "tea" } }));
        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert_eq!(res.header("Content-Type"), Some("application/json"));
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body, json!({ "added": { "name": "tea" } }));
    }

    #[test]
    fn builder_keeps_extra_headers() {
        let res = Response::builder()
            .status(Status::Created)
            .header("location", "/items/tea")
            .json(&json!({}));
        let inner = res.into_inner();
        assert_eq!(inner.status(), StatusCode::CREATED);
        assert_eq!(inner.headers()["location"], "/items/tea");
        assert_eq!(inner.headers()["content-type"], "application/json");
    }

    #[test]
    fn result_dispatches_to_either_side() {
        let ok: Result<Response, Status> = Ok(Response::status(Status::Ok));
        let err: Result<Response, Status> = Err(Status::NotFound);
        assert_eq!(ok.into_response().status_code(), StatusCode::OK);
        assert_eq!(err.into_response().status_code(), StatusCode::NOT_FOUND);
    }
}
