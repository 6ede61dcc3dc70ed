// ABOUTME: Data layer and persistence for Drinkwise
// ABOUTME: SQLite pool setup, embedded migrations and the shared storage error type

pub mod db;
pub mod error;

pub use db::{begin_immediate, connect, connect_in_memory, run_migrations, MIGRATOR};
pub use error::{is_unique_violation, StorageError};
