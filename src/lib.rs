//! Hogwarts school backend: students and faculties over HTTP, stored in PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, StorageKind};
pub use error::{AppError, ConfigError, LookupKey};
pub use model::{Faculty, Student};
pub use repository::{InMemoryRepository, PgRepository, SchoolRepository};
pub use routes::{app, faculty_routes, status_routes, student_routes};
pub use service::{FacultyService, StudentService};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_school_tables};
