//! Student handlers under `/student`.

use crate::error::{AppError, ErrorBody};
use crate::handlers::NameQuery;
use crate::model::{Faculty, Student};
use crate::response::{found_or_not_found, list_or_no_content, ok_json};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

/// `GET /student` filters. `age` wins; the range applies only when both bounds are given.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StudentQuery {
    pub age: Option<i32>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LetterQuery {
    pub letter: String,
}

#[utoipa::path(
    post,
    path = "/student",
    tag = "student",
    request_body = Student,
    responses(
        (status = 200, description = "Created student with its assigned id", body = Student),
        (status = 409, description = "Referenced faculty does not exist", body = ErrorBody)
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    Json(body): Json<Student>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let created = state.students.create_student(body).await?;
    Ok(ok_json(created))
}

#[utoipa::path(
    get,
    path = "/student",
    tag = "student",
    params(StudentQuery),
    responses(
        (status = 200, description = "Matching students", body = [Student]),
        (status = 204, description = "No student matched")
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<StudentQuery>,
) -> Result<Response, AppError> {
    let students = match params {
        StudentQuery { age: Some(age), .. } => state.students.find_student_by_age(age).await?,
        StudentQuery {
            min_age: Some(min),
            max_age: Some(max),
            ..
        } => state.students.find_by_age_between(min, max).await?,
        _ => state.students.get_all_students().await?,
    };
    Ok(list_or_no_content(students))
}

#[utoipa::path(
    get,
    path = "/student/{id}",
    tag = "student",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 404, description = "No student with that id")
    )
)]
pub async fn read_student(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, AppError> {
    Ok(found_or_not_found(state.students.get_student(id).await?))
}

#[utoipa::path(
    put,
    path = "/student",
    tag = "student",
    request_body = Student,
    responses(
        (status = 200, description = "Updated student", body = Student),
        (status = 400, description = "Body has no id", body = ErrorBody),
        (status = 404, description = "No student with that id", body = ErrorBody)
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    Json(body): Json<Student>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let updated = state.students.update_student(body).await?;
    Ok(ok_json(updated))
}

#[utoipa::path(
    delete,
    path = "/student/{id}",
    tag = "student",
    params(("id" = i64, Path, description = "Student id")),
    responses((status = 200, description = "Deleted, or nothing to delete"))
)]
pub async fn delete_student(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    state.students.delete_student(id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/student/faculty_by_student",
    tag = "student",
    params(NameQuery),
    responses(
        (status = 200, description = "Faculty of the named student", body = Faculty),
        (status = 404, description = "No such student, or the student has no faculty")
    )
)]
pub async fn faculty_by_student(
    State(state): State<AppState>,
    Query(params): Query<NameQuery>,
) -> Result<Response, AppError> {
    Ok(found_or_not_found(
        state.students.find_faculty_by_student_name(&params.name).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/student/count",
    tag = "student",
    responses((status = 200, description = "Number of students", body = i64))
)]
pub async fn count_students(State(state): State<AppState>) -> Result<Json<i64>, AppError> {
    Ok(Json(state.students.count_all_students().await?))
}

#[utoipa::path(
    get,
    path = "/student/average_age",
    tag = "student",
    responses((status = 200, description = "Mean age computed by the database", body = f64))
)]
pub async fn average_age(State(state): State<AppState>) -> Result<Json<f64>, AppError> {
    Ok(Json(state.students.get_average_age().await?))
}

#[utoipa::path(
    get,
    path = "/student/five_latest_students",
    tag = "student",
    responses((status = 200, description = "Up to five newest students", body = [Student]))
)]
pub async fn five_latest_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.students.get_five_latest_students().await?))
}

#[utoipa::path(
    get,
    path = "/student/all_names",
    tag = "student",
    params(LetterQuery),
    responses((status = 200, description = "Uppercased first names starting with the letter, sorted", body = [String]))
)]
pub async fn all_names(
    State(state): State<AppState>,
    Query(params): Query<LetterQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(
        state.students.get_all_names_begin_with_letter(&params.letter).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/student/average_age_2",
    tag = "student",
    responses((status = 200, description = "Mean age computed in-process", body = f64))
)]
pub async fn average_age_in_process(State(state): State<AppState>) -> Result<Json<f64>, AppError> {
    Ok(Json(state.students.get_average_age_with_find_all().await?))
}

#[utoipa::path(
    get,
    path = "/student/step_4",
    tag = "student",
    responses((status = 200, description = "Sum of 1..=1000000", body = i64))
)]
pub async fn step_4(State(state): State<AppState>) -> Json<i64> {
    Json(state.students.calculate_example())
}
