//! Routers: operational endpoints, faculty and student APIs, OpenAPI document.

mod faculty;
mod status;
mod student;

pub use faculty::faculty_routes;
pub use status::status_routes;
pub use student::student_routes;

use crate::openapi::openapi_routes;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

/// Full application router with request bodies capped at `max_body_bytes`.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(status_routes(state.clone()))
        .merge(faculty_routes(state.clone()))
        .merge(student_routes(state))
        .merge(openapi_routes())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
}
