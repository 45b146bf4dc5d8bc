//! Shared application state for all routes.

use crate::repository::SchoolRepository;
use crate::service::{FacultyService, StudentService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    pub faculties: FacultyService,
    /// Probed by `/ready`.
    pub store: Arc<dyn SchoolRepository>,
}

impl AppState {
    /// Wire both services to one store (PostgreSQL or in-memory).
    pub fn new<R>(repo: Arc<R>) -> Self
    where
        R: SchoolRepository + 'static,
    {
        AppState {
            students: StudentService::new(repo.clone(), repo.clone()),
            faculties: FacultyService::new(repo.clone(), repo.clone()),
            store: repo,
        }
    }
}
