//! Request-level failures and their translation into responses.
//!
//! Every route returns `Result<Response, ApiError>`; the error side is turned
//! into an HTTP response exactly once, by [`IntoResponse`]. Client errors
//! carry a fixed message. A 500 always answers with the same generic body and
//! the real cause goes to the log instead.

use http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;
use crate::store::StoreError;

const INTERNAL_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body is not parseable JSON.
    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// The body is valid JSON but neither an object nor an array.
    #[error("Invalid JSON")]
    BareJsonValue,

    /// A path parameter does not percent-decode to UTF-8.
    #[error("Failed to decode param '{0}'")]
    BadParam(String),

    /// The payload lacks a string `name` or a numeric `price`.
    #[error("Invalid item format")]
    InvalidItem,

    #[error("Item not found")]
    ItemNotFound,

    /// No route matches the method and path.
    #[error("Not found")]
    RouteNotFound,

    #[error("storage failure: {0}")]
    Store(#[from] StoreError),

    /// A failure that carries its own status code and client-facing message.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status { status, message: message.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_) | Self::BareJsonValue | Self::InvalidItem | Self::BadParam(_) => Status::BadRequest.into(),
            Self::ItemNotFound | Self::RouteNotFound => Status::NotFound.into(),
            Self::Store(_) | Self::Internal(_) => Status::InternalServerError.into(),
            Self::Status { status, .. } => *status,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "request failed");
            return Response::json(status, &ErrorBody { error: INTERNAL_MESSAGE });
        }
        Response::json(status, &ErrorBody { error: &self.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn body(res: &Response) -> Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[test]
    fn client_errors_carry_fixed_messages() {
        let res = ApiError::InvalidItem.into_response();
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(body(&res), json!({ "error": "Invalid item format" }));

        let res = ApiError::ItemNotFound.into_response();
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(body(&res), json!({ "error": "Item not found" }));

        let parse = serde_json::from_str::<Value>("{").unwrap_err();
        let res = ApiError::InvalidJson(parse).into_response();
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(body(&res), json!({ "error": "Invalid JSON" }));

        let res = ApiError::BareJsonValue.into_response();
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(body(&res), json!({ "error": "Invalid JSON" }));
    }

    #[test]
    fn server_errors_hide_detail() {
        let res = ApiError::Internal("disk on fire at /var/data".to_owned()).into_response();
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(&res), json!({ "error": "Internal Server Error" }));

        let res = ApiError::with_status(StatusCode::INTERNAL_SERVER_ERROR, "secret").into_response();
        assert_eq!(body(&res), json!({ "error": "Internal Server Error" }));
    }

    #[test]
    fn explicit_status_is_passed_through() {
        let res = ApiError::with_status(StatusCode::SERVICE_UNAVAILABLE, "Store unavailable").into_response();
        assert_eq!(res.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body(&res), json!({ "error": "Store unavailable" }));
    }
}
