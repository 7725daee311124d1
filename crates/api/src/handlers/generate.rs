//! Handler for the schedule-generation gateway.
//!
//! Routes:
//! - `POST /generate`      -- validate and relay a generation request
//! - `POST /api/generate`  -- same handler under the web client's prefix

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use zchedule_core::request::GenerationRequest;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /generate
///
/// Validates that the body names a user, forwards a single request to the
/// backend, and relays the backend's JSON body unchanged on success.
///
/// A body that cannot be read (e.g. over the size limit) is a 400. A body
/// that is not JSON gets the internal-error envelope, as does a request that
/// outlives `REQUEST_TIMEOUT_SECS` when that bound is configured.
pub async fn generate_schedule(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Response> {
    let body = body.map_err(|rejection| {
        AppError::BadRequest(format!("Unreadable request body: {}", rejection.body_text()))
    })?;
    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::InternalError(format!("Malformed request body: {e}")))?;

    let request = GenerationRequest::from_body(&body)?;
    tracing::info!(
        user_id = %request.user_id,
        with_preferences = request.preferences.is_some(),
        "Relaying schedule generation request"
    );
    if let Some(preferences) = &request.preferences {
        let off_catalogue = preferences.off_catalogue_areas();
        if !off_catalogue.is_empty() || !preferences.has_known_productivity_bucket() {
            tracing::debug!(
                user_id = %request.user_id,
                ?off_catalogue,
                daily_productivity_hours = %preferences.daily_productivity_hours,
                "Forwarding preferences outside the onboarding options"
            );
        }
    }

    let relay = state.backend.generate_raw(&request);
    let schedule = match state.config.request_timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), relay)
            .await
            .map_err(|_| {
                tracing::warn!(user_id = %request.user_id, secs, "Generation request timed out");
                AppError::InternalError(format!("Request timed out after {secs}s"))
            })??,
        None => relay.await?,
    };

    Ok(([(CONTENT_TYPE, "application/json")], schedule).into_response())
}
