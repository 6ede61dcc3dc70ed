// ABOUTME: Storage error type shared by every storage layer
// ABOUTME: Wraps sqlx failures and the domain conditions handlers map to HTTP codes

use drinkwise_core::ValidationError;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Resource not found")]
    NotFound,
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
    #[error("Only one active window permitted")]
    ActiveWindowConflict,
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// True when the error is a UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
