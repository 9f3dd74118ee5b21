//! Unified error handling with Sentry integration.
//!
//! Service outcomes are tagged ([`ServiceError`]); this module maps each
//! variant to a status code and the wire shape callers expect: the
//! recoverable kinds as `{"message": ...}`, conflicts and faults as
//! `{"error": ...}`. Fault detail stays server-side.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::ServiceError;

/// Application-level error type for the HTTP layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Outcome of a service operation.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let Self::Service(err) = self;

        // Capture faults to Sentry before the detail is dropped
        if matches!(
            err,
            ServiceError::Repository(_) | ServiceError::Auth(_) | ServiceError::Fault(_)
        ) {
            let event_id = sentry::capture_error(&err);
            tracing::error!(
                error = %err,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &err {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Repository(_) | ServiceError::Auth(_) | ServiceError::Fault(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Recoverable kinds keep their message; faults go out generic
        let body = match &err {
            ServiceError::Validation(msg) | ServiceError::NotFound(msg) => {
                json!({ "message": msg })
            }
            ServiceError::Conflict(msg) => json!({ "error": msg }),
            ServiceError::Repository(_) | ServiceError::Auth(_) | ServiceError::Fault(_) => {
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
