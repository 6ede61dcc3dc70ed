// ABOUTME: HTTP request handlers for drinking window operations
// ABOUTME: CRUD, explicit activation and the weekly window timeline for the current user

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};
use tracing::info;

use drinkwise_windows::{
    DailyWindowUsage, DrinkingWindow, DrinkingWindowCreateInput, DrinkingWindowUpdateInput,
};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::state::AppState;

/// Request body for a partial window update. For nullable fields, a missing
/// key leaves the column alone and an explicit `null` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWindowRequest {
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub duration_hours: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub repeat_pattern: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl From<UpdateWindowRequest> for DrinkingWindowUpdateInput {
    fn from(request: UpdateWindowRequest) -> Self {
        Self {
            start_time: request.start_time,
            duration_hours: request.duration_hours,
            start_date: request.start_date,
            end_date: request.end_date,
            repeat_pattern: request.repeat_pattern,
            is_active: request.is_active,
        }
    }
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// List the current user's windows
pub async fn list_windows(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<DrinkingWindow>>> {
    info!("Listing windows for user {}", user.id());

    let windows = state.windows.list_windows(user.id()).await?;
    Ok(Json(windows))
}

/// Create a window
pub async fn create_window(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<DrinkingWindowCreateInput>,
) -> ApiResult<(StatusCode, Json<DrinkingWindow>)> {
    info!("Creating window for user {}", user.id());

    let window = state.windows.create_window(user.id(), input).await?;
    Ok((StatusCode::CREATED, Json(window)))
}

/// Partially update a window
pub async fn update_window(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(window_id): Path<i64>,
    Json(request): Json<UpdateWindowRequest>,
) -> ApiResult<Json<DrinkingWindow>> {
    info!("Updating window {} for user {}", window_id, user.id());

    let window = state
        .windows
        .update_window(user.id(), window_id, request.into())
        .await?;
    Ok(Json(window))
}

/// Make a window the active one
pub async fn activate_window(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(window_id): Path<i64>,
) -> ApiResult<Json<DrinkingWindow>> {
    info!("Activating window {} for user {}", window_id, user.id());

    let window = state.windows.activate_window(user.id(), window_id).await?;
    Ok(Json(window))
}

/// Delete a window
pub async fn delete_window(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(window_id): Path<i64>,
) -> ApiResult<StatusCode> {
    info!("Deleting window {} for user {}", window_id, user.id());

    state.windows.delete_window(user.id(), window_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Which window applied on each of the last seven days
pub async fn weekly_usage(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<DailyWindowUsage>>> {
    let today = Utc::now().date_naive();
    let usage = state.windows.weekly_usage(user.id(), today).await?;
    Ok(Json(usage))
}
