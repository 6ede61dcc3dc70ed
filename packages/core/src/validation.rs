// ABOUTME: Input validation for user-supplied fields
// ABOUTME: Field-specific checks shared by the storage and API layers

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Maximum length of an email address
pub const MAX_EMAIL_SIZE: usize = 255;

/// Maximum length of a password accepted for hashing
pub const MAX_PASSWORD_SIZE: usize = 256;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

/// A rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate an email address and normalize it to lowercase
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::new("email", "Email cannot be empty"));
    }

    if trimmed.len() > MAX_EMAIL_SIZE {
        return Err(ValidationError::new(
            "email",
            format!(
                "Email exceeds maximum size of {} characters",
                MAX_EMAIL_SIZE
            ),
        ));
    }

    if !EMAIL_REGEX.is_match(trimmed) {
        return Err(ValidationError::new(
            "email",
            "Value is not a valid email address",
        ));
    }

    Ok(trimmed.to_lowercase())
}

/// Validate a password before hashing. The value is never trimmed.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new("password", "Password cannot be empty"));
    }

    if password.len() > MAX_PASSWORD_SIZE {
        return Err(ValidationError::new(
            "password",
            format!(
                "Password exceeds maximum size of {} characters",
                MAX_PASSWORD_SIZE
            ),
        ));
    }

    if password.contains('\0') {
        return Err(ValidationError::new(
            "password",
            "Password contains invalid null bytes",
        ));
    }

    Ok(())
}

/// Validate a short free-text label (drink type, repeat pattern)
pub fn validate_label(value: &str, field: &str, max_len: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "Value cannot be empty"));
    }

    if trimmed.chars().count() > max_len {
        return Err(ValidationError::new(
            field,
            format!("Value exceeds maximum size of {} characters", max_len),
        ));
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err(ValidationError::new(
            field,
            "Value contains invalid control characters",
        ));
    }

    Ok(trimmed.to_string())
}

/// Same as [`validate_label`] but passes `None` through
pub fn validate_optional_label(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<Option<String>, ValidationError> {
    value
        .map(|v| validate_label(v, field, max_len))
        .transpose()
}

/// Quantity must be a positive, finite number of servings
pub fn validate_quantity(quantity: f64) -> Result<f64, ValidationError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(ValidationError::new(
            "quantity",
            "Quantity must be a positive number",
        ));
    }

    Ok(quantity)
}

/// Window length in whole hours, 1 through 24
pub fn validate_duration_hours(hours: i64) -> Result<i64, ValidationError> {
    if !(1..=24).contains(&hours) {
        return Err(ValidationError::new(
            "duration_hours",
            "Duration must be between 1 and 24 hours",
        ));
    }

    Ok(hours)
}
