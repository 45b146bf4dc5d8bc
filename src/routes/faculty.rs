//! Faculty routes.

use crate::handlers::faculty::{
    create_faculty, delete_faculty, list_faculties, max_length_name, read_faculty, students_by_faculty,
    update_faculty,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn faculty_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/faculty",
            get(list_faculties).post(create_faculty).put(update_faculty),
        )
        .route("/faculty/students_by_faculty", get(students_by_faculty))
        .route("/faculty/max_length", get(max_length_name))
        .route("/faculty/:id", get(read_faculty).delete(delete_faculty))
        .with_state(state)
}
