//! The generation request forwarded to the schedule backend.

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::preferences::{PreferenceSnapshot, UserPreferences, PREFERENCE_KEYS};

/// Message returned when a request does not identify a user.
pub const USER_ID_REQUIRED: &str = "user_id is required";

/// Outbound payload: `{"user_id": ...}` alone, or with the resolved
/// preference snapshot flattened alongside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub user_id: String,
    #[serde(flatten)]
    pub preferences: Option<PreferenceSnapshot>,
}

impl GenerationRequest {
    /// Minimal request carrying only the user id.
    pub fn for_user(user_id: impl Into<String>) -> Result<Self, CoreError> {
        let user_id = user_id.into();
        validate_user_id(&user_id)?;
        Ok(Self {
            user_id,
            preferences: None,
        })
    }

    /// Request carrying the user id and a resolved preference snapshot.
    pub fn with_preferences(
        user_id: impl Into<String>,
        preferences: &UserPreferences,
    ) -> Result<Self, CoreError> {
        let mut request = Self::for_user(user_id)?;
        request.preferences = Some(preferences.resolve()?);
        Ok(request)
    }

    /// Build a request from a client's JSON body.
    ///
    /// `user_id` must be a non-empty string. When the body also carries any
    /// preference field it is parsed as [`UserPreferences`] and resolved.
    pub fn from_body(body: &Value) -> Result<Self, CoreError> {
        let user_id = body
            .get("user_id")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::Validation(USER_ID_REQUIRED.to_string()))?;

        if !carries_preferences(body) {
            return Self::for_user(user_id);
        }

        let preferences: UserPreferences = serde_json::from_value(body.clone())
            .map_err(|e| CoreError::Validation(format!("Invalid preferences: {e}")))?;
        Self::with_preferences(user_id, &preferences)
    }
}

fn validate_user_id(user_id: &str) -> Result<(), CoreError> {
    if user_id.is_empty() {
        return Err(CoreError::Validation(USER_ID_REQUIRED.to_string()));
    }
    Ok(())
}

fn carries_preferences(body: &Value) -> bool {
    body.as_object()
        .is_some_and(|map| PREFERENCE_KEYS.iter().any(|k| map.contains_key(*k)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
