// ABOUTME: Core constants and validation helpers for Drinkwise
// ABOUTME: Foundational package shared by the storage, domain and API packages

pub mod constants;
pub mod validation;

// Re-export constants
pub use constants::{
    default_database_path, drinkwise_dir, DEFAULT_REPEAT_PATTERN, DEFAULT_TIMEZONE,
    DEFAULT_TOKEN_TTL_MINUTES,
};

// Re-export validation
pub use validation::{
    validate_duration_hours, validate_email, validate_label, validate_optional_label,
    validate_password, validate_quantity, ValidationError,
};
