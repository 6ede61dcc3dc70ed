// ABOUTME: HTTP request handlers for the authenticated user
// ABOUTME: Profile lookup and a minimal token check endpoint

use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use drinkwise_security::UserProfile;

use crate::auth::CurrentUser;

/// Get the current user
pub async fn get_current_user(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    info!("Getting current user: {}", user.id);
    Json(user.into())
}

pub async fn protected_endpoint(CurrentUser(user): CurrentUser) -> Json<Value> {
    Json(json!({ "message": format!("Hello, {}!", user.email) }))
}
