// ABOUTME: Password hashing with Argon2id
// ABOUTME: Salted one-way digests in PHC string format plus blocking-pool wrappers

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::AuthError;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check a password against a stored digest. A malformed digest never verifies.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let parsed = match PasswordHash::new(digest) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored password digest could not be parsed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Run [`hash_password`] on the blocking thread pool
pub async fn spawn_hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}

/// Run [`verify_password`] on the blocking thread pool
pub async fn spawn_verify_password(password: String, digest: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &digest))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))
}
