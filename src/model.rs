//! Persisted entities: students and faculties.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A student row. `id` is assigned by the store; `faculty_id` references `faculty.id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub age: i32,
    #[serde(default)]
    pub faculty_id: Option<i64>,
}

impl Student {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Student {
            id: None,
            name: name.into(),
            age,
            faculty_id: None,
        }
    }

    pub fn with_faculty(mut self, faculty_id: i64) -> Self {
        self.faculty_id = Some(faculty_id);
        self
    }

    /// First whitespace-delimited token of the name, if any.
    pub fn first_name(&self) -> Option<&str> {
        self.name.split_whitespace().next()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub color: String,
}

impl Faculty {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Faculty {
            id: None,
            name: name.into(),
            color: color.into(),
        }
    }
}
