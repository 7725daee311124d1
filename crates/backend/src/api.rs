//! REST client for the schedule-generation backend.
//!
//! Wraps `POST {base_url}/generate` using [`reqwest`]. The client makes a
//! single attempt per call: no retries and, unless configured, no timeout
//! beyond the transport defaults.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use zchedule_core::generation::ScheduleGenerator;
use zchedule_core::request::GenerationRequest;
use zchedule_core::schedule::GenerationResult;

/// Backend address used when `BACKEND_URL` is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Error message substituted when a failed response has no JSON body.
pub const BACKEND_ERROR_FALLBACK: &str = "Backend error";

/// Error message used when a failed response's JSON has no `error` string.
pub const GENERATION_FAILED: &str = "Failed to generate schedule";

/// HTTP client for the schedule-generation backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (connection refused, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Backend rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code, relayed to the caller as-is.
        status: u16,
        /// `payload.error` when it is a string, otherwise a generic message.
        message: String,
        /// Parsed error body, or `{"error": "Backend error"}` if it was not JSON.
        payload: Value,
    },

    /// The backend answered 2xx but the body was not valid JSON (or not a
    /// schedule, for [`BackendClient::generate`]).
    #[error("Malformed backend response: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl BackendError {
    /// Build a rejection from a failed response's status and raw body.
    pub fn rejected(status: u16, body: &[u8]) -> Self {
        let payload = serde_json::from_slice::<Value>(body)
            .unwrap_or_else(|_| json!({ "error": BACKEND_ERROR_FALLBACK }));

        let message = payload
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERATION_FAILED)
            .to_string();

        BackendError::Rejected {
            status,
            message,
            payload,
        }
    }
}

impl BackendClient {
    /// Create a client for the backend at `base_url`, e.g.
    /// `http://localhost:8000`. A trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn generate_url(&self) -> String {
        format!("{}/generate", self.base_url)
    }

    /// Request a schedule and return the backend's JSON body untouched.
    ///
    /// The body is checked to be JSON but otherwise not interpreted, so the
    /// caller can relay it byte for byte.
    pub async fn generate_raw(&self, request: &GenerationRequest) -> Result<Vec<u8>, BackendError> {
        let url = self.generate_url();
        tracing::debug!(
            %url,
            user_id = %request.user_id,
            with_preferences = request.preferences.is_some(),
            "Requesting schedule generation"
        );

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await?.to_vec();
        serde_json::from_slice::<Value>(&body)?;

        tracing::debug!(user_id = %request.user_id, bytes = body.len(), "Schedule generated");
        Ok(body)
    }

    /// Request a schedule and parse it.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, BackendError> {
        let body = self.generate_raw(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // ---- private helpers ----

    /// Return the response unchanged on 2xx, or a [`BackendError::Rejected`]
    /// built from its status and body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let err = BackendError::rejected(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), error = %err, "Backend rejected generation request");
        Err(err)
    }
}

#[async_trait]
impl ScheduleGenerator for BackendClient {
    type Error = BackendError;

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, Self::Error> {
        BackendClient::generate(self, request).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
