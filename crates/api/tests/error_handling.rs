//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use serde_json::json;
use zchedule_api::error::{panic_response, AppError};
use zchedule_backend::BackendError;
use zchedule_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn validation_error_returns_400_with_bare_message() {
    let err = AppError::Core(CoreError::Validation("user_id is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "user_id is required" }));
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("nope".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "nope");
}

#[tokio::test]
async fn backend_rejection_keeps_status_and_payload() {
    let err = AppError::Backend(BackendError::rejected(409, br#"{"error":"busy","retry":false}"#));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "busy");
    assert_eq!(json["details"], json!({ "error": "busy", "retry": false }));
}

#[tokio::test]
async fn malformed_backend_body_returns_internal_envelope() {
    let parse_err = serde_json::from_slice::<serde_json::Value>(b"<html>").unwrap_err();
    let err = AppError::Backend(BackendError::InvalidBody(parse_err));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");
    assert!(json["details"].is_string());
}

#[tokio::test]
async fn internal_errors_share_one_envelope() {
    for err in [
        AppError::InternalError("socket closed".into()),
        AppError::Core(CoreError::Internal("socket closed".into())),
    ] {
        let (status, json) = error_to_response(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            json!({ "error": "Internal server error", "details": "socket closed" })
        );
    }
}

#[tokio::test]
async fn panic_payload_becomes_internal_envelope() {
    let response = panic_response(Box::new("handler exploded"));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["error"], "Internal server error");
    assert_eq!(json["details"], "handler exploded");
}
