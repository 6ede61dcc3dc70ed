// ABOUTME: Drink log storage layer using SQLite
// ABOUTME: Writes logs with their in-window flag and answers per-user queries

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use drinkwise_core::{validate_label, validate_quantity};
use drinkwise_storage::{begin_immediate, StorageError};
use drinkwise_windows::{classify_drink, fetch_active_window};

use crate::types::{DrinkLog, DrinkLogCreateInput, DrinkSummary};

/// Maximum length of a drink type label
pub const MAX_DRINK_TYPE_SIZE: usize = 100;

pub struct DrinkStorage {
    pool: SqlitePool,
}

impl DrinkStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a drink. The active window is read in the same transaction as
    /// the insert, and the resulting flag is stored once.
    pub async fn log_drink(
        &self,
        user_id: i64,
        input: DrinkLogCreateInput,
        now: DateTime<Utc>,
    ) -> Result<DrinkLog, StorageError> {
        let drink_type = validate_label(&input.drink_type, "drink_type", MAX_DRINK_TYPE_SIZE)?;
        let quantity = validate_quantity(input.quantity)?;
        let timestamp = input.timestamp.unwrap_or(now);

        let mut tx = begin_immediate(&self.pool).await?;

        let active_window = fetch_active_window(&mut *tx, user_id).await?;
        let logged_in_window = classify_drink(active_window.as_ref(), timestamp);

        debug!(
            "Logging drink for user {}: {} x{} at {} (in window: {})",
            user_id, drink_type, quantity, timestamp, logged_in_window
        );

        let result = sqlx::query(
            r#"
            INSERT INTO drink_logs (user_id, drink_type, quantity, timestamp, logged_in_window, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&drink_type)
        .bind(quantity)
        .bind(timestamp)
        .bind(logged_in_window)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        let row = sqlx::query("SELECT * FROM drink_logs WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;
        let log = row_to_drink(&row)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        info!("Logged drink {} for user {}", log.id, user_id);
        Ok(log)
    }

    /// All logs of a user, oldest first
    pub async fn list_drinks(&self, user_id: i64) -> Result<Vec<DrinkLog>, StorageError> {
        debug!("Fetching drinks for user: {}", user_id);

        let rows = sqlx::query("SELECT * FROM drink_logs WHERE user_id = ? ORDER BY timestamp, id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_drink).collect()
    }

    /// Logs with `timestamp >= since`, oldest first
    pub async fn list_drinks_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<DrinkLog>, StorageError> {
        debug!("Fetching drinks for user {} since {}", user_id, since);

        let rows = sqlx::query(
            "SELECT * FROM drink_logs WHERE user_id = ? AND timestamp >= ? ORDER BY timestamp, id",
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_drink).collect()
    }

    pub async fn summarize(&self, user_id: i64) -> Result<DrinkSummary, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total,
                   COALESCE(SUM(CASE WHEN logged_in_window THEN 1 ELSE 0 END), 0) AS in_window
            FROM drink_logs
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let total: i64 = row.try_get("total").map_err(StorageError::Sqlx)?;
        let in_window: i64 = row.try_get("in_window").map_err(StorageError::Sqlx)?;

        Ok(DrinkSummary::new(total, in_window))
    }

    pub async fn delete_drink(&self, user_id: i64, drink_id: i64) -> Result<(), StorageError> {
        debug!("Deleting drink {} for user {}", drink_id, user_id);

        let result = sqlx::query("DELETE FROM drink_logs WHERE id = ? AND user_id = ?")
            .bind(drink_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

/// Convert a database row to a DrinkLog
fn row_to_drink(row: &sqlx::sqlite::SqliteRow) -> Result<DrinkLog, StorageError> {
    Ok(DrinkLog {
        id: row.try_get("id").map_err(StorageError::Sqlx)?,
        user_id: row.try_get("user_id").map_err(StorageError::Sqlx)?,
        drink_type: row.try_get("drink_type").map_err(StorageError::Sqlx)?,
        quantity: row.try_get("quantity").map_err(StorageError::Sqlx)?,
        timestamp: row.try_get("timestamp").map_err(StorageError::Sqlx)?,
        logged_in_window: row.try_get("logged_in_window").map_err(StorageError::Sqlx)?,
        created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
    })
}
