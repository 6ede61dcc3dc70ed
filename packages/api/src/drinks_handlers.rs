// ABOUTME: HTTP request handlers for drink logs
// ABOUTME: Logging, listing, the last-seven-days view and the in/out-of-window summary

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use tracing::info;

use drinkwise_drinks::{DrinkLog, DrinkLogCreateInput, DrinkSummary};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::state::AppState;

/// Days covered by the weekly drink listing
const WEEKLY_USAGE_DAYS: i64 = 7;

/// Log a drink for the current user
pub async fn log_drink(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<DrinkLogCreateInput>,
) -> ApiResult<(StatusCode, Json<DrinkLog>)> {
    info!("Logging drink for user {}", user.id());

    let log = state.drinks.log_drink(user.id(), input, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn list_drinks(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<DrinkLog>>> {
    let logs = state.drinks.list_drinks(user.id()).await?;
    Ok(Json(logs))
}

/// Logs from the last seven days
pub async fn weekly_usage(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<DrinkLog>>> {
    let since = Utc::now() - Duration::days(WEEKLY_USAGE_DAYS);
    let logs = state.drinks.list_drinks_since(user.id(), since).await?;
    Ok(Json(logs))
}

pub async fn summary(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<DrinkSummary>> {
    let summary = state.drinks.summarize(user.id()).await?;
    Ok(Json(summary))
}

pub async fn delete_drink(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(drink_id): Path<i64>,
) -> ApiResult<StatusCode> {
    info!("Deleting drink {} for user {}", drink_id, user.id());

    state.drinks.delete_drink(user.id(), drink_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
