// ABOUTME: Drinking window storage layer using SQLite
// ABOUTME: Per-user CRUD with the one-active-window invariant enforced transactionally

use chrono::{NaiveDate, Utc};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::{debug, info};

use drinkwise_core::{
    validate_duration_hours, validate_label, validate_optional_label, ValidationError,
    DEFAULT_REPEAT_PATTERN,
};
use drinkwise_storage::{begin_immediate, is_unique_violation, StorageError};

use crate::evaluator::{compute_end_time, weekly_timeline};
use crate::types::{
    DailyWindowUsage, DrinkingWindow, DrinkingWindowCreateInput, DrinkingWindowUpdateInput,
};

/// Maximum length of a repeat pattern label
pub const MAX_REPEAT_PATTERN_SIZE: usize = 50;

pub struct WindowStorage {
    pool: SqlitePool,
}

impl WindowStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all windows owned by a user, oldest first
    pub async fn list_windows(&self, user_id: i64) -> Result<Vec<DrinkingWindow>, StorageError> {
        debug!("Fetching windows for user: {}", user_id);

        let rows = sqlx::query(
            "SELECT * FROM drinking_windows WHERE user_id = ? ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_window).collect()
    }

    /// Get a single window. Missing and foreign windows are both `NotFound`.
    pub async fn get_window(&self, user_id: i64, window_id: i64) -> Result<DrinkingWindow, StorageError> {
        fetch_window(&self.pool, user_id, window_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn get_active_window(&self, user_id: i64) -> Result<Option<DrinkingWindow>, StorageError> {
        fetch_active_window(&self.pool, user_id).await
    }

    /// Create a window. An active window is rejected when the user already
    /// has one; the caller has to deactivate the old one first.
    pub async fn create_window(
        &self,
        user_id: i64,
        input: DrinkingWindowCreateInput,
    ) -> Result<DrinkingWindow, StorageError> {
        let duration_hours = validate_duration_hours(input.duration_hours)?;
        let repeat_pattern = validate_optional_label(
            input.repeat_pattern.as_deref(),
            "repeat_pattern",
            MAX_REPEAT_PATTERN_SIZE,
        )?
        .unwrap_or_else(|| DEFAULT_REPEAT_PATTERN.to_string());
        validate_date_range(input.start_date.as_ref(), input.end_date.as_ref())?;

        let is_active = input.is_active.unwrap_or(true);
        let end_time = compute_end_time(input.start_time, duration_hours);
        let now = Utc::now();

        debug!(
            "Creating window for user {}: {} + {}h (active: {})",
            user_id, input.start_time, duration_hours, is_active
        );

        let mut tx = begin_immediate(&self.pool).await?;

        if is_active && fetch_active_window(&mut *tx, user_id).await?.is_some() {
            return Err(StorageError::ActiveWindowConflict);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO drinking_windows
                (user_id, start_time, end_time, duration_hours, start_date, end_date,
                 repeat_pattern, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(input.start_time)
        .bind(end_time)
        .bind(duration_hours)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&repeat_pattern)
        .bind(is_active)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_active_conflict)?;

        let window = fetch_window(&mut *tx, user_id, result.last_insert_rowid())
            .await?
            .ok_or(StorageError::NotFound)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        info!("Created window {} for user {}", window.id, user_id);
        Ok(window)
    }

    /// Apply a partial update. Setting `is_active` to true deactivates every
    /// other window of the user in the same transaction.
    pub async fn update_window(
        &self,
        user_id: i64,
        window_id: i64,
        input: DrinkingWindowUpdateInput,
    ) -> Result<DrinkingWindow, StorageError> {
        debug!("Updating window {} for user {}", window_id, user_id);

        if let Some(hours) = input.duration_hours {
            validate_duration_hours(hours)?;
        }
        let repeat_pattern = match &input.repeat_pattern {
            Some(Some(pattern)) => Some(Some(validate_label(
                pattern,
                "repeat_pattern",
                MAX_REPEAT_PATTERN_SIZE,
            )?)),
            other => other.clone(),
        };

        let mut tx = begin_immediate(&self.pool).await?;

        let current = fetch_window(&mut *tx, user_id, window_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        if input.is_empty() {
            return Ok(current);
        }

        let start_date = input.start_date.unwrap_or(current.start_date);
        let end_date = input.end_date.unwrap_or(current.end_date);
        validate_date_range(start_date.as_ref(), end_date.as_ref())?;

        let now = Utc::now();

        if input.is_active == Some(true) {
            deactivate_siblings(&mut tx, user_id, window_id).await?;
        }

        // Column names are literals; every value goes through push_bind
        let mut query_builder = QueryBuilder::<Sqlite>::new("UPDATE drinking_windows SET updated_at = ");
        query_builder.push_bind(now);

        if input.start_time.is_some() || input.duration_hours.is_some() {
            let start_time = input.start_time.unwrap_or(current.start_time);
            let duration_hours = input.duration_hours.unwrap_or(current.duration_hours);

            query_builder.push(", start_time = ");
            query_builder.push_bind(start_time);
            query_builder.push(", duration_hours = ");
            query_builder.push_bind(duration_hours);
            query_builder.push(", end_time = ");
            query_builder.push_bind(compute_end_time(start_time, duration_hours));
        }
        if let Some(value) = input.start_date {
            query_builder.push(", start_date = ");
            query_builder.push_bind(value);
        }
        if let Some(value) = input.end_date {
            query_builder.push(", end_date = ");
            query_builder.push_bind(value);
        }
        if let Some(value) = repeat_pattern {
            query_builder.push(", repeat_pattern = ");
            query_builder.push_bind(value);
        }
        if let Some(value) = input.is_active {
            query_builder.push(", is_active = ");
            query_builder.push_bind(value);
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(window_id);
        query_builder.push(" AND user_id = ");
        query_builder.push_bind(user_id);

        query_builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(map_active_conflict)?;

        let window = fetch_window(&mut *tx, user_id, window_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(window)
    }

    /// Make a window the user's single active window
    pub async fn activate_window(&self, user_id: i64, window_id: i64) -> Result<DrinkingWindow, StorageError> {
        debug!("Activating window {} for user {}", window_id, user_id);

        let mut tx = begin_immediate(&self.pool).await?;

        let current = fetch_window(&mut *tx, user_id, window_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        if current.is_active {
            return Ok(current);
        }

        deactivate_siblings(&mut tx, user_id, window_id).await?;

        sqlx::query(
            "UPDATE drinking_windows SET is_active = 1, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(Utc::now())
        .bind(window_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_active_conflict)?;

        let window = fetch_window(&mut *tx, user_id, window_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        info!("Window {} is now active for user {}", window_id, user_id);
        Ok(window)
    }

    /// Delete a window owned by the user
    pub async fn delete_window(&self, user_id: i64, window_id: i64) -> Result<(), StorageError> {
        debug!("Deleting window {} for user {}", window_id, user_id);

        let result = sqlx::query("DELETE FROM drinking_windows WHERE id = ? AND user_id = ?")
            .bind(window_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Which window applied on each of the seven days ending at `today`
    pub async fn weekly_usage(
        &self,
        user_id: i64,
        today: NaiveDate,
    ) -> Result<Vec<DailyWindowUsage>, StorageError> {
        let windows = self.list_windows(user_id).await?;
        Ok(weekly_timeline(&windows, today))
    }
}

/// Fetch one window scoped to its owner, on any executor (pool or transaction)
pub async fn fetch_window<'e, E>(
    executor: E,
    user_id: i64,
    window_id: i64,
) -> Result<Option<DrinkingWindow>, StorageError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT * FROM drinking_windows WHERE id = ? AND user_id = ?")
        .bind(window_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(StorageError::Sqlx)?;

    row.as_ref().map(row_to_window).transpose()
}

/// Fetch the user's active window, on any executor (pool or transaction)
pub async fn fetch_active_window<'e, E>(
    executor: E,
    user_id: i64,
) -> Result<Option<DrinkingWindow>, StorageError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(
        "SELECT * FROM drinking_windows WHERE user_id = ? AND is_active = 1 ORDER BY created_at DESC, id DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
    .map_err(StorageError::Sqlx)?;

    row.as_ref().map(row_to_window).transpose()
}

async fn deactivate_siblings(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    user_id: i64,
    window_id: i64,
) -> Result<(), StorageError> {
    let result = sqlx::query(
        "UPDATE drinking_windows SET is_active = 0, updated_at = ? WHERE user_id = ? AND id != ? AND is_active = 1",
    )
    .bind(Utc::now())
    .bind(user_id)
    .bind(window_id)
    .execute(&mut **tx)
    .await
    .map_err(StorageError::Sqlx)?;

    debug!(
        "Deactivated {} sibling window(s) for user {}",
        result.rows_affected(),
        user_id
    );
    Ok(())
}

fn validate_date_range(
    start_date: Option<&chrono::DateTime<Utc>>,
    end_date: Option<&chrono::DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match (start_date, end_date) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::new(
            "end_date",
            "End date must not be before start date",
        )),
        _ => Ok(()),
    }
}

fn map_active_conflict(err: sqlx::Error) -> StorageError {
    if is_unique_violation(&err) {
        StorageError::ActiveWindowConflict
    } else {
        StorageError::Sqlx(err)
    }
}

/// Convert a database row to a DrinkingWindow
fn row_to_window(row: &sqlx::sqlite::SqliteRow) -> Result<DrinkingWindow, StorageError> {
    Ok(DrinkingWindow {
        id: row.try_get("id").map_err(StorageError::Sqlx)?,
        user_id: row.try_get("user_id").map_err(StorageError::Sqlx)?,
        start_time: row.try_get("start_time").map_err(StorageError::Sqlx)?,
        end_time: row.try_get("end_time").map_err(StorageError::Sqlx)?,
        duration_hours: row.try_get("duration_hours").map_err(StorageError::Sqlx)?,
        start_date: row.try_get("start_date").map_err(StorageError::Sqlx)?,
        end_date: row.try_get("end_date").map_err(StorageError::Sqlx)?,
        repeat_pattern: row.try_get("repeat_pattern").map_err(StorageError::Sqlx)?,
        is_active: row.try_get("is_active").map_err(StorageError::Sqlx)?,
        created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
        updated_at: row.try_get("updated_at").map_err(StorageError::Sqlx)?,
    })
}
