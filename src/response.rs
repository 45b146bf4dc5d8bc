//! Response helpers shared by the handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 200 with the JSON array, or 204 with no body when the list is empty.
pub fn list_or_no_content<T: Serialize>(items: Vec<T>) -> Response {
    if items.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }
    (StatusCode::OK, Json(items)).into_response()
}

/// 200 with the JSON value, or 404 with no body when absent.
pub fn found_or_not_found<T: Serialize>(item: Option<T>) -> Response {
    match item {
        Some(v) => (StatusCode::OK, Json(v)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn ok_json<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}
