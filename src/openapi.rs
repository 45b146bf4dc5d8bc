//! OpenAPI document for the student and faculty API, served at `/api-docs/openapi.json`.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::status::{self, BuildInfo, ServiceStatus};
use crate::handlers::{faculty, student};
use crate::model::{Faculty, Student};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Hogwarts school API", description = "Students and faculties"),
    paths(
        faculty::create_faculty,
        faculty::list_faculties,
        faculty::read_faculty,
        faculty::update_faculty,
        faculty::delete_faculty,
        faculty::students_by_faculty,
        faculty::max_length_name,
        student::create_student,
        student::list_students,
        student::read_student,
        student::update_student,
        student::delete_student,
        student::faculty_by_student,
        student::count_students,
        student::average_age,
        student::five_latest_students,
        student::all_names,
        student::average_age_in_process,
        student::step_4,
        status::health,
        status::ready,
        status::version,
    ),
    components(schemas(Student, Faculty, ErrorBody, ErrorDetail, ServiceStatus, BuildInfo)),
    tags(
        (name = "faculty", description = "Faculty CRUD and lookups"),
        (name = "student", description = "Student CRUD, filters and aggregates"),
        (name = "status", description = "Liveness, readiness and version")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn openapi_routes() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}
