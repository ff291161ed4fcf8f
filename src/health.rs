//! Health-check handlers.
//!
//! | Probe | Path | Answers |
//! |---|---|---|
//! | **Liveness** | `/healthz` | The process serves HTTP. |
//! | **Readiness** | `/readyz` | The item store can be read. |

use http::StatusCode;
use serde::Serialize;
use tracing::warn;

use crate::api_error::ApiError;
use crate::app::AppState;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

/// Always `200 {"status":"ok"}`. No dependencies.
pub async fn liveness(_req: Request, _state: AppState) -> Response {
    Response::json(Status::Ok, &Health { status: "ok" })
}

/// `200 {"status":"ready"}` once the store reads cleanly, `503` otherwise.
pub async fn readiness(_req: Request, state: AppState) -> Result<Response, ApiError> {
    match state.store().read().await {
        Ok(_) => Ok(Response::json(Status::Ok, &Health { status: "ready" })),
        Err(e) => {
            warn!(error = %e, "readiness check failed");
            Err(ApiError::with_status(
                StatusCode::from(Status::ServiceUnavailable),
                "Store unavailable",
            ))
        }
    }
}
