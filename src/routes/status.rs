//! Operational routes.

use crate::handlers::status::{health, ready, version};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn status_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
