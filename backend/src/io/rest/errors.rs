//! Translation of domain errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::error;
use shared::ErrorResponse;

use crate::domain::event_flow::EventFlowError;
use crate::domain::models::event::EventValidationError;

/// Map a service error to a status code and an `ErrorResponse` body.
///
/// Validation problems are the caller's fault (400), flow transitions that
/// do not apply in the current state conflict with it (409), and anything
/// else is logged as a server error.
pub fn error_response(e: anyhow::Error, context: &str) -> Response {
    if let Some(validation) = e.downcast_ref::<EventValidationError>() {
        return validation_response(validation);
    }

    if let Some(flow_error) = e.downcast_ref::<EventFlowError>() {
        return match flow_error {
            EventFlowError::Validation(validation) => validation_response(validation),
            EventFlowError::InvalidTransition { .. } => {
                (StatusCode::CONFLICT, Json(plain(flow_error.to_string()))).into_response()
            }
            EventFlowError::EventNotFound(_) => {
                (StatusCode::NOT_FOUND, Json(plain(flow_error.to_string()))).into_response()
            }
        };
    }

    error!("{}: {:#}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(plain(format!("{}: {}", context, e))),
    )
        .into_response()
}

pub fn not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(plain(message))).into_response()
}

fn validation_response(validation: &EventValidationError) -> Response {
    let body = ErrorResponse {
        error: validation.to_string(),
        field: validation.field().map(str::to_string),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn plain(error: String) -> ErrorResponse {
    ErrorResponse { error, field: None }
}
