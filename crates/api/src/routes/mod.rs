pub mod generate;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Routes mounted both at the root and under `/api`.
pub fn gateway_routes() -> Router<AppState> {
    generate::router()
}
