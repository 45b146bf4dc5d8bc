//! Faculty handlers under `/faculty`.

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

/// `GET /faculty` filters. `name` takes precedence over `color`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FacultyQuery {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[utoipa::path(
    post,
    path = "/faculty",
    tag = "faculty",
    request_body = Faculty,
    responses((status = 200, description = "Created faculty with its assigned id", body = Faculty))
)]
pub async fn create_faculty(
    State(state): State<AppState>,
    Json(body): Json<Faculty>,
) -> Result<(StatusCode, Json<Faculty>), AppError> {
    let created = state.faculties.create_faculty(body).await?;
    Ok(ok_json(created))
}

#[utoipa::path(
    get,
    path = "/faculty",
    tag = "faculty",
    params(FacultyQuery),
    responses(
        (status = 200, description = "Matching faculties", body = [Faculty]),
        (status = 204, description = "No faculty matched")
    )
)]
pub async fn list_faculties(
    State(state): State<AppState>,
    Query(params): Query<FacultyQuery>,
) -> Result<Response, AppError> {
    let faculties = match (params.name.as_deref(), params.color.as_deref()) {
        (Some(name), _) => state.faculties.get_faculties_by_name(name).await?,
        (None, Some(color)) => state.faculties.get_faculties_by_color(color).await?,
        (None, None) => state.faculties.get_all_faculties().await?,
    };
    Ok(list_or_no_content(faculties))
}

#[utoipa::path(
    get,
    path = "/faculty/{id}",
    tag = "faculty",
    params(("id" = i64, Path, description = "Faculty id")),
    responses(
        (status = 200, description = "Faculty found", body = Faculty),
        (status = 404, description = "No faculty with that id")
    )
)]
pub async fn read_faculty(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, AppError> {
    Ok(found_or_not_found(state.faculties.get_faculty(id).await?))
}

#[utoipa::path(
    put,
    path = "/faculty",
    tag = "faculty",
    request_body = Faculty,
    responses(
        (status = 200, description = "Updated faculty", body = Faculty),
        (status = 400, description = "Body has no id", body = ErrorBody),
        (status = 404, description = "No faculty with that id", body = ErrorBody)
    )
)]
pub async fn update_faculty(
    State(state): State<AppState>,
    Json(body): Json<Faculty>,
) -> Result<(StatusCode, Json<Faculty>), AppError> {
    let updated = state.faculties.update_faculty(body).await?;
    Ok(ok_json(updated))
}

#[utoipa::path(
    delete,
    path = "/faculty/{id}",
    tag = "faculty",
    params(("id" = i64, Path, description = "Faculty id")),
    responses(
        (status = 200, description = "Deleted, or nothing to delete"),
        (status = 409, description = "Faculty still has students", body = ErrorBody)
    )
)]
pub async fn delete_faculty(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    state.faculties.delete_faculty(id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/faculty/students_by_faculty",
    tag = "faculty",
    params(NameQuery),
    responses(
        (status = 200, description = "Students of the faculty", body = [Student]),
        (status = 204, description = "Faculty has no students"),
        (status = 404, description = "No faculty with that name", body = ErrorBody)
    )
)]
pub async fn students_by_faculty(
    State(state): State<AppState>,
    Query(params): Query<NameQuery>,
) -> Result<Response, AppError> {
    let students = state.faculties.get_students_by_faculty_name(&params.name).await?;
    Ok(list_or_no_content(students))
}

#[utoipa::path(
    get,
    path = "/faculty/max_length",
    tag = "faculty",
    responses((status = 200, description = "Longest faculty name, or a notice when there are none", body = String))
)]
pub async fn max_length_name(State(state): State<AppState>) -> Result<String, AppError> {
    state.faculties.get_max_length_name_faculty().await
}
