//! Client for the external schedule-generation backend.

pub mod api;

pub use api::{BackendClient, BackendError, BACKEND_ERROR_FALLBACK, DEFAULT_BACKEND_URL};
