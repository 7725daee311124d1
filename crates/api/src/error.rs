use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use zchedule_backend::BackendError;
use zchedule_core::error::CoreError;

/// Error message for every failure that is not the client's or the backend's.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`BackendError`] for the
/// outbound call. Implements [`IntoResponse`] to produce the gateway's error
/// envelopes:
///
/// - client input: `400 {"error": <message>}`
/// - backend rejection: backend status, `{"error": <message>, "details": <payload>}`
/// - anything else: `500 {"error": "Internal server error", "details": <message>}`
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `zchedule_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure calling the schedule-generation backend.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // --- Client input ---
            AppError::Core(CoreError::Validation(msg)) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }

            // --- Backend answered with an error ---
            AppError::Backend(BackendError::Rejected {
                status,
                message,
                payload,
            }) => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                json!({ "error": message, "details": payload }),
            ),

            // --- Transport and internal failures ---
            AppError::Backend(BackendError::Request(err)) => {
                tracing::error!(error = %err, "Backend request failed");
                internal(err.to_string())
            }
            AppError::Backend(BackendError::InvalidBody(err)) => {
                tracing::error!(error = %err, "Backend returned a malformed body");
                internal(err.to_string())
            }
            AppError::Core(CoreError::Internal(msg)) | AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal(msg)
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn internal(details: String) -> (StatusCode, Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": INTERNAL_SERVER_ERROR, "details": details }),
    )
}

/// Response for a handler panic caught by `CatchPanicLayer`: the same
/// internal-error envelope as any other unexpected failure.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    tracing::error!(error = %details, "Handler panicked");
    let (status, body) = internal(details);
    (status, axum::Json(body)).into_response()
}
