//! Faculty operations, including the faculty -> students lookup.

use crate::error::{AppError, LookupKey};
use crate::model::{Faculty, Student};
use crate::repository::{FacultyRepository, StudentRepository};
use std::sync::Arc;

/// Returned by the longest-name query when no faculties exist.
pub const EMPTY_FACULTY_LIST: &str = "Список факультетов пуст";

#[derive(Clone)]
pub struct FacultyService {
    faculties: Arc<dyn FacultyRepository>,
    students: Arc<dyn StudentRepository>,
}

impl FacultyService {
    pub fn new(faculties: Arc<dyn FacultyRepository>, students: Arc<dyn StudentRepository>) -> Self {
        FacultyService { faculties, students }
    }

    /// Persist a new faculty. Any client-supplied id is discarded.
    pub async fn create_faculty(&self, mut faculty: Faculty) -> Result<Faculty, AppError> {
        faculty.id = None;
        tracing::info!("creating faculty");
        Ok(self.faculties.insert(&faculty).await?)
    }

    pub async fn get_faculty(&self, id: i64) -> Result<Option<Faculty>, AppError> {
        let faculty = self.faculties.find_by_id(id).await?;
        match &faculty {
            Some(_) => tracing::info!(id, "found faculty"),
            None => tracing::warn!(id, "faculty not found"),
        }
        Ok(faculty)
    }

    pub async fn get_all_faculties(&self) -> Result<Vec<Faculty>, AppError> {
        tracing::info!("getting all faculties");
        Ok(self.faculties.find_all().await?)
    }

    /// Replace an existing faculty. Fails with `FacultyNotFound` when the id is unknown.
    pub async fn update_faculty(&self, faculty: Faculty) -> Result<Faculty, AppError> {
        let id = faculty
            .id
            .ok_or_else(|| AppError::BadRequest("faculty id is required for update".into()))?;
        tracing::info!(id, "updating faculty");
        self.faculties.update(id, &faculty).await?.ok_or_else(|| {
            tracing::error!(id, "faculty not found");
            AppError::FacultyNotFound(LookupKey::Id(id))
        })
    }

    pub async fn delete_faculty(&self, id: i64) -> Result<(), AppError> {
        tracing::info!(id, "deleting faculty");
        Ok(self.faculties.delete_by_id(id).await?)
    }

    pub async fn get_faculties_by_color(&self, color: &str) -> Result<Vec<Faculty>, AppError> {
        tracing::info!(color, "getting faculties by color");
        Ok(self.faculties.find_all_by_color_ignore_case(color).await?)
    }

    pub async fn get_faculties_by_name(&self, name: &str) -> Result<Vec<Faculty>, AppError> {
        tracing::info!(name, "getting faculties by name");
        Ok(self.faculties.find_all_by_name_ignore_case(name).await?)
    }

    /// Students of the faculty named `name` (case-insensitive). Unknown faculty is an error;
    /// a known faculty without students yields an empty list.
    pub async fn get_students_by_faculty_name(&self, name: &str) -> Result<Vec<Student>, AppError> {
        // Rows read from the store always carry an id.
        let faculty_id = self
            .faculties
            .find_by_name_ignore_case(name)
            .await?
            .and_then(|faculty| faculty.id)
            .ok_or_else(|| {
                tracing::error!(name, "faculty not found");
                AppError::FacultyNotFound(LookupKey::Name(name.to_string()))
            })?;
        let students = self.students.find_all_by_faculty_id(faculty_id).await?;
        tracing::info!(count = students.len(), "found students");
        Ok(students)
    }

    /// Longest faculty name by character count; the first one wins ties.
    pub async fn get_max_length_name_faculty(&self) -> Result<String, AppError> {
        let faculties = self.faculties.find_all().await?;
        Ok(longest_name(&faculties)
            .unwrap_or(EMPTY_FACULTY_LIST)
            .to_string())
    }
}

fn longest_name(faculties: &[Faculty]) -> Option<&str> {
    faculties
        .iter()
        .map(|f| f.name.as_str())
        .reduce(|best, name| {
            if name.chars().count() > best.chars().count() {
                name
            } else {
                best
            }
        })
}
