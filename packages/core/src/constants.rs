// ABOUTME: Shared defaults and filesystem locations
// ABOUTME: Values used by more than one Drinkwise package

use std::env;
use std::path::PathBuf;

/// Lifetime of an access token when none is configured
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Timezone label assigned to newly registered users
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Repeat pattern stored on a window when the caller omits one
pub const DEFAULT_REPEAT_PATTERN: &str = "daily";

/// Get the path to the Drinkwise directory (~/.drinkwise)
pub fn drinkwise_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".drinkwise")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".drinkwise")
    }
}

/// Get the default SQLite database path (~/.drinkwise/drinkwise.db)
pub fn default_database_path() -> PathBuf {
    drinkwise_dir().join("drinkwise.db")
}
