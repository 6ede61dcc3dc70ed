// ABOUTME: Authentication context for API requests
// ABOUTME: Resolves the bearer token to the user row every protected handler runs as

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::warn;

use drinkwise_security::User;

use crate::error::AppError;
use crate::state::AppState;

/// Current authenticated user
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            warn!("Request without bearer token");
            AppError::Unauthorized
        })?;

        let email = state.tokens.resolve_token(token)?;

        match state.users.get_user_by_email(&email).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                warn!("Token subject no longer exists: {}", email);
                Err(AppError::Unauthorized)
            }
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
