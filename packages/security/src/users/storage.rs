// ABOUTME: User storage layer using SQLite
// ABOUTME: Handles registration, lookup and password authentication for users

use std::sync::LazyLock;

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use drinkwise_core::DEFAULT_TIMEZONE;
use drinkwise_storage::{is_unique_violation, StorageError};

use super::types::User;
use crate::error::AuthError;
use crate::password::{hash_password, spawn_verify_password};

/// Digest verified against when the email is unknown, so a miss costs the
/// same as a wrong password.
static DUMMY_DIGEST: LazyLock<String> =
    LazyLock::new(|| hash_password("drinkwise-timing-guard").unwrap_or_default());

pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user from an already-normalized email and a password digest
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StorageError> {
        debug!("Creating user: {}", email);

        if self.get_user_by_email(email).await?.is_some() {
            return Err(StorageError::DuplicateEmail(email.to_string()));
        }

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, timezone, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(DEFAULT_TIMEZONE)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StorageError::DuplicateEmail(email.to_string())
            } else {
                StorageError::Sqlx(e)
            }
        })?;

        self.get_user(result.last_insert_rowid()).await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User, StorageError> {
        debug!("Fetching user: {}", user_id);

        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        self.row_to_user(&row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        debug!("Fetching user by email: {}", email);

        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(r) => Ok(Some(self.row_to_user(&r)?)),
            None => Ok(None),
        }
    }

    /// Look up a user and check the password. `Ok(None)` covers both an
    /// unknown email and a wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, AuthError> {
        let user = self.get_user_by_email(email).await?;

        let digest = match &user {
            Some(u) => u.password_hash.clone(),
            None => DUMMY_DIGEST.clone(),
        };

        let verified = spawn_verify_password(password.to_string(), digest).await?;

        match user {
            Some(u) if verified => Ok(Some(u)),
            _ => Ok(None),
        }
    }

    #[cfg(test)]
    pub(crate) async fn count_users(&self) -> Result<i64, StorageError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)
    }

    /// Convert a database row to a User
    fn row_to_user(&self, row: &sqlx::sqlite::SqliteRow) -> Result<User, StorageError> {
        Ok(User {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            email: row.try_get("email").map_err(StorageError::Sqlx)?,
            password_hash: row.try_get("password_hash").map_err(StorageError::Sqlx)?,
            timezone: row.try_get("timezone").map_err(StorageError::Sqlx)?,
            created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
            updated_at: row.try_get("updated_at").map_err(StorageError::Sqlx)?,
        })
    }
}
