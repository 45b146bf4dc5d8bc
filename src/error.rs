//! Typed errors and HTTP mapping.

use crate::repository::RepositoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// Key an entity was looked up by when it could not be found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupKey {
    Id(i64),
    Name(String),
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "id {}", id),
            LookupKey::Name(name) => write!(f, "name '{}'", name),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("student not found: {0}")]
    StudentNotFound(LookupKey),
    #[error("faculty not found: {0}")]
    FacultyNotFound(LookupKey),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Repository(RepositoryError::from(e))
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::StudentNotFound(_) => (StatusCode::NOT_FOUND, "student_not_found"),
            AppError::FacultyNotFound(_) => (StatusCode::NOT_FOUND, "faculty_not_found"),
            AppError::Repository(RepositoryError::Constraint(_)) => (StatusCode::CONFLICT, "conflict"),
            AppError::Repository(RepositoryError::Database(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
