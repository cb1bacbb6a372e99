/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers and the access guard can
 * return it directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 401
 * }
 * ```
 */

use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::backend::error::types::BackendError;

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = ErrorBody {
            error: self.message(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
