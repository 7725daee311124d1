//! Route definitions for the schedule-generation gateway.
//!
//! ```text
//! POST   /generate                       generate_schedule
//! ```

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::generate;
use crate::state::AppState;

/// Largest accepted request body. Preference payloads are a few KB.
pub const MAX_REQUEST_BODY_BYTES: usize = 256 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate::generate_schedule))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
}
