// ABOUTME: Error types for credential and token operations
// ABOUTME: Keeps credential failures generic so callers cannot tell which part was wrong

use drinkwise_storage::StorageError;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Could not validate credentials")]
    InvalidCredential,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
