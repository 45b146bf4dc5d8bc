//! Student routes. Fixed segments like `/student/count` take priority over `/student/:id`.

use crate::handlers::student::{
    all_names, average_age, average_age_in_process, count_students, create_student, delete_student,
    faculty_by_student, five_latest_students, list_students, read_student, step_4, update_student,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/student",
            get(list_students).post(create_student).put(update_student),
        )
        .route("/student/faculty_by_student", get(faculty_by_student))
        .route("/student/count", get(count_students))
        .route("/student/average_age", get(average_age))
        .route("/student/five_latest_students", get(five_latest_students))
        .route("/student/all_names", get(all_names))
        .route("/student/average_age_2", get(average_age_in_process))
        .route("/student/step_4", get(step_4))
        .route("/student/:id", get(read_student).delete(delete_student))
        .with_state(state)
}
