// ABOUTME: API error type and its JSON response shape
// ABOUTME: Maps storage, auth and validation failures onto status codes and error codes

use std::collections::HashMap;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use drinkwise_core::ValidationError;
use drinkwise_security::AuthError;
use drinkwise_storage::StorageError;

/// Main application error type that all handlers return
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    #[error("Incorrect email or password")]
    InvalidLogin,

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Only one active window permitted")]
    ActiveWindowConflict,

    #[error("Resource not found")]
    NotFound,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Structured error response format for API consistency
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

/// Error detail structure with machine-readable codes
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<HashMap<String, String>>,
}

impl AppError {
    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::InvalidLogin => (StatusCode::BAD_REQUEST, "INVALID_LOGIN"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::EmailTaken => (StatusCode::BAD_REQUEST, "EMAIL_TAKEN"),
            AppError::ActiveWindowConflict => (StatusCode::BAD_REQUEST, "ACTIVE_WINDOW_CONFLICT"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// User-facing message; internal details never leave the server
    fn to_user_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.message.clone(),
            AppError::InvalidLogin => "Incorrect email or password".to_string(),
            AppError::Unauthorized => "Could not validate credentials".to_string(),
            AppError::EmailTaken => "Email already registered".to_string(),
            AppError::ActiveWindowConflict => {
                "Only one active window permitted. Deactivate the current window first".to_string()
            }
            AppError::NotFound => "The requested resource was not found".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    fn details(&self) -> Option<HashMap<String, String>> {
        match self {
            AppError::Validation(err) => Some(HashMap::from([("field".to_string(), err.field.clone())])),
            _ => None,
        }
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => AppError::NotFound,
            StorageError::DuplicateEmail(_) => AppError::EmailTaken,
            StorageError::ActiveWindowConflict => AppError::ActiveWindowConflict,
            StorageError::Validation(err) => AppError::Validation(err),
            other => AppError::Internal(other.into()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredential => AppError::Unauthorized,
            AuthError::Storage(err) => err.into(),
            other => AppError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();

        match &self {
            AppError::Internal(err) => {
                error!(
                    request_id = %request_id,
                    error = %err,
                    "Internal server error occurred"
                );
            }
            _ => {
                info!(
                    request_id = %request_id,
                    error_code = %error_code,
                    error = %self,
                    "API error response"
                );
            }
        }

        let error_response = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.to_user_message(),
                details: self.details(),
            },
            request_id,
        };

        let mut response = Json(error_response).into_response();
        *response.status_mut() = status_code;

        if matches!(self, AppError::Unauthorized) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_map_to_codes() {
        let cases = [
            (StorageError::NotFound, StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                StorageError::DuplicateEmail("a@example.com".to_string()),
                StatusCode::BAD_REQUEST,
                "EMAIL_TAKEN",
            ),
            (
                StorageError::ActiveWindowConflict,
                StatusCode::BAD_REQUEST,
                "ACTIVE_WINDOW_CONFLICT",
            ),
            (
                StorageError::Validation(ValidationError::new("quantity", "bad")),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                StorageError::Sqlx(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];

        for (storage_error, status, code) in cases {
            let error = AppError::from(storage_error);
            assert_eq!(error.to_status_and_code(), (status, code));
        }
    }

    #[test]
    fn test_invalid_credential_is_unauthorized() {
        let error = AppError::from(AuthError::InvalidCredential);
        assert_eq!(
            error.to_status_and_code(),
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
        );

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_validation_error_carries_field() {
        let error = AppError::from(ValidationError::new("email", "Invalid email address"));

        assert_eq!(error.to_user_message(), "Invalid email address");
        assert_eq!(
            error.details().unwrap().get("field").map(String::as_str),
            Some("email")
        );
    }

    #[test]
    fn test_user_message_sanitization() {
        let internal_error = AppError::internal(anyhow::anyhow!(
            "Database connection failed with password xyz"
        ));
        let message = internal_error.to_user_message();
        assert_eq!(message, "An internal server error occurred");
        assert!(!message.contains("password"));
        assert!(!message.contains("xyz"));
    }
}
