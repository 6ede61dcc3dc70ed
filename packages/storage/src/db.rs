// ABOUTME: Database connection management and schema migrations
// ABOUTME: Builds the SQLite pool shared by all storage layers

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use crate::error::StorageError;

/// Embedded schema migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connect to a SQLite database, creating it if needed, and run migrations
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, StorageError> {
    if let Some(path) = file_path_from_url(database_url) {
        // Ensure parent directory exists
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    debug!("Connecting to database: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await?;

    info!("Database connection established");

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Single-connection in-memory database with the schema applied.
/// The connection is never recycled, otherwise the data would vanish with it.
pub async fn connect_in_memory() -> Result<SqlitePool, StorageError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Apply any pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    debug!("Database migrations completed");
    Ok(())
}

/// Open a write transaction that takes the RESERVED lock up front.
/// A deferred transaction that reads before writing cannot wait out a
/// concurrent writer under WAL and fails with SQLITE_BUSY instead.
pub async fn begin_immediate(
    pool: &SqlitePool,
) -> Result<Transaction<'static, Sqlite>, StorageError> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

/// Extract the filesystem path from a `sqlite:` URL, if it names a file
fn file_path_from_url(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(path)
    }
}
