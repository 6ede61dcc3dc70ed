// ABOUTME: HTTP request handlers for registration and login
// ABOUTME: Creates accounts and exchanges email/password form posts for bearer tokens

use axum::{extract::State, http::StatusCode, Form, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use drinkwise_core::{validate_email, validate_password};
use drinkwise_security::{spawn_hash_password, UserProfile};

use crate::error::{ApiResult, AppError};
use crate::state::AppState;

/// Request body for registration
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Login form; `username` carries the email
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let email = validate_email(&request.email)?;
    validate_password(&request.password)?;

    info!("Registering user: {}", email);

    let digest = spawn_hash_password(request.password).await?;
    let user = state.users.create_user(&email, &digest).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchange credentials for an access token
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let Ok(email) = validate_email(&form.username) else {
        warn!("Login rejected: malformed email");
        return Err(AppError::InvalidLogin);
    };

    let user = state
        .users
        .authenticate(&email, &form.password)
        .await?
        .ok_or_else(|| {
            warn!("Login rejected for {}", email);
            AppError::InvalidLogin
        })?;

    let access_token = state.tokens.issue_token(&user.email)?;

    info!("Issued access token for user {}", user.id);
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
