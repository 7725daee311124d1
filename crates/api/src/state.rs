use std::sync::Arc;
use std::time::Duration;

use zchedule_backend::{BackendClient, BackendError};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable and immutable; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Pooled client for the schedule-generation backend.
    pub backend: Arc<BackendClient>,
}

impl AppState {
    /// Build state from configuration, creating the backend client.
    pub fn from_config(config: ServerConfig) -> Result<Self, BackendError> {
        let backend = match config.backend_timeout_secs {
            Some(secs) => BackendClient::with_timeout(&config.backend_url, Duration::from_secs(secs))?,
            None => BackendClient::new(&config.backend_url),
        };

        Ok(Self {
            config: Arc::new(config),
            backend: Arc::new(backend),
        })
    }
}
