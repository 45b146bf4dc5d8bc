//! Error type for repository operations.

use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Referential constraint rejected by the store (e.g. unknown faculty id).
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("database: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_foreign_key_violation() {
                return RepositoryError::Constraint(db.message().to_string());
            }
        }
        RepositoryError::Database(e)
    }
}
