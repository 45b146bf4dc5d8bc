//! Data access contracts for students and faculties, plus the PostgreSQL and in-memory stores.
//!
//! Services depend only on the traits here; `PgRepository` serves production traffic and
//! `InMemoryRepository` backs tests and database-less runs.

mod error;
mod memory;
mod postgres;

pub use error::{RepositoryError, RepositoryResult};
pub use memory::InMemoryRepository;
pub use postgres::PgRepository;

use crate::model::{Faculty, Student};
use async_trait::async_trait;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Student>>;

    async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool>;

    /// Insert a new row; the store assigns the id and any `student.id` is ignored.
    async fn insert(&self, student: &Student) -> RepositoryResult<Student>;

    /// Replace every column of row `id`. `None` when no such row exists; never inserts.
    async fn update(&self, id: i64, student: &Student) -> RepositoryResult<Option<Student>>;

    /// No-op when the id does not exist.
    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()>;

    /// All students ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<Student>>;

    async fn find_all_by_age(&self, age: i32) -> RepositoryResult<Vec<Student>>;

    /// Inclusive on both bounds.
    async fn find_by_age_between(&self, min_age: i32, max_age: i32) -> RepositoryResult<Vec<Student>>;

    /// Exact name match; lowest id wins when several students share the name.
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Student>>;

    async fn find_all_by_faculty_id(&self, faculty_id: i64) -> RepositoryResult<Vec<Student>>;

    async fn count_all_students(&self) -> RepositoryResult<i64>;

    /// Store-side mean age; 0.0 when there are no students.
    async fn get_average_age(&self) -> RepositoryResult<f64>;

    /// Up to five students, highest id first.
    async fn get_five_latest_students(&self) -> RepositoryResult<Vec<Student>>;
}

#[async_trait]
pub trait FacultyRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Faculty>>;

    async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool>;

    /// Insert a new row; the store assigns the id and any `faculty.id` is ignored.
    async fn insert(&self, faculty: &Faculty) -> RepositoryResult<Faculty>;

    /// Replace every column of row `id`. `None` when no such row exists; never inserts.
    async fn update(&self, id: i64, faculty: &Faculty) -> RepositoryResult<Option<Faculty>>;

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()>;

    /// All faculties ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<Faculty>>;

    async fn find_all_by_color_ignore_case(&self, color: &str) -> RepositoryResult<Vec<Faculty>>;

    async fn find_all_by_name_ignore_case(&self, name: &str) -> RepositoryResult<Vec<Faculty>>;

    async fn find_by_name_ignore_case(&self, name: &str) -> RepositoryResult<Option<Faculty>>;
}

/// Complete store: both entity repositories plus a store health check.
#[async_trait]
pub trait SchoolRepository: StudentRepository + FacultyRepository {
    async fn health_check(&self) -> RepositoryResult<bool>;
}
