//! Student route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use tracing::debug;

use super::response::{error_body, message_response, ApiError, ERROR_BODY_INVALID_JSON};
use super::AppState;
use crate::error::Error;
use crate::record::StudentRecord;

pub(crate) async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentRecord>>, ApiError> {
    let records = state.service().list().await?;
    Ok(Json(records))
}

pub(crate) async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<StudentRecord>, JsonRejection>,
) -> Result<Response, ApiError> {
    let candidate = match payload {
        Ok(Json(candidate)) => candidate,
        // Without a JSON content type there are no fields to read.
        Err(JsonRejection::MissingJsonContentType(rejection)) => {
            debug!("Create body is not JSON: {rejection}");
            return Err(Error::MissingFields.into());
        }
        Err(rejection) => {
            debug!("Rejected create body: {rejection}");
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                return Ok(error_body(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Request body too large",
                ));
            }
            return Ok(error_body(StatusCode::BAD_REQUEST, ERROR_BODY_INVALID_JSON));
        }
    };

    state.service().create(candidate).await?;
    Ok(message_response("Student added successfully"))
}

pub(crate) async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Response, ApiError> {
    state.service().delete(&student_id).await?;
    Ok(message_response("Deleted successfully"))
}
