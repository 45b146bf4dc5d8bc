//! HTTP handlers for students, faculties and service status.

pub mod faculty;
pub mod status;
pub mod student;
pub use faculty::*;
pub use student::*;

use serde::Deserialize;
use utoipa::IntoParams;

/// Required `?name=` parameter.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    pub name: String,
}
