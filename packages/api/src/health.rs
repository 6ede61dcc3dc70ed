// ABOUTME: Welcome and health check endpoints
// ABOUTME: Liveness reporting including a database round trip

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::error;

use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Drinkwise API" }))
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "ok",
        Err(e) => {
            error!("Health check database ping failed: {}", e);
            "unavailable"
        }
    };

    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "drinkwise",
        "database": database
    }))
}
