//! Mapping of service errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, error};

use crate::error::Error;

/// Error text returned when the store fails. Details go to the log only.
pub const ERROR_BODY_STORAGE: &str = "Internal storage error";

/// Error text returned for any other server-side failure.
pub const ERROR_BODY_INTERNAL: &str = "Internal server error";

/// Error text returned when a create body is not a JSON object.
pub const ERROR_BODY_INVALID_JSON: &str = "Invalid JSON body";

/// HTTP status for a service error.
#[must_use]
pub fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::DuplicateStudentId { .. } => StatusCode::CONFLICT,
        e if e.is_validation_error() => StatusCode::BAD_REQUEST,
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `{"message": ...}` with status 200.
pub(crate) fn message_response(message: &str) -> Response {
    Json(json!({ "message": message })).into_response()
}

/// `{"error": ...}` with the given status.
pub(crate) fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Wrapper that lets handlers return `Result<_, ApiError>` and use `?`.
#[derive(Debug)]
pub(crate) struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = error_status(&self.0);
        if status.is_server_error() {
            error!("request failed: {}", self.0);
            let body = if self.0.is_storage_error() {
                ERROR_BODY_STORAGE
            } else {
                ERROR_BODY_INTERNAL
            };
            return error_body(status, body);
        }
        debug!("request rejected: {}", self.0);
        error_body(status, &self.0.to_string())
    }
}
