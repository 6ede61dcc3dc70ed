// ABOUTME: HTTP API layer for Drinkwise providing REST endpoints and routing
// ABOUTME: Integration layer that depends on all domain packages

use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub mod auth;
pub mod auth_handlers;
pub mod drinks_handlers;
pub mod error;
pub mod health;
pub mod state;
pub mod users_handlers;
pub mod windows_handlers;

pub use error::{ApiResult, AppError};
pub use state::AppState;

/// Creates the registration and token routes
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/token", post(auth_handlers::login))
        .route("/token", post(auth_handlers::login))
}

/// Creates the current-user routes
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(users_handlers::get_current_user))
        .route(
            "/users/protected-endpoint",
            get(users_handlers::protected_endpoint),
        )
}

/// Creates the drinking window routes. Collections answer with and without
/// the trailing slash.
pub fn create_windows_router() -> Router<AppState> {
    Router::new()
        .route(
            "/drinking-windows",
            get(windows_handlers::list_windows).post(windows_handlers::create_window),
        )
        .route(
            "/drinking-windows/",
            get(windows_handlers::list_windows).post(windows_handlers::create_window),
        )
        .route(
            "/drinking-windows/weekly-usage",
            get(windows_handlers::weekly_usage),
        )
        .route("/drinking-windows/{id}", put(windows_handlers::update_window))
        .route(
            "/drinking-windows/{id}",
            delete(windows_handlers::delete_window),
        )
        .route(
            "/drinking-windows/{id}/activate",
            post(windows_handlers::activate_window),
        )
}

/// Creates the drink log routes
pub fn create_drinks_router() -> Router<AppState> {
    Router::new()
        .route(
            "/drinks",
            get(drinks_handlers::list_drinks).post(drinks_handlers::log_drink),
        )
        .route(
            "/drinks/",
            get(drinks_handlers::list_drinks).post(drinks_handlers::log_drink),
        )
        .route("/drinks/weekly-usage", get(drinks_handlers::weekly_usage))
        .route("/drinks/summary", get(drinks_handlers::summary))
        .route("/drinks/{id}", delete(drinks_handlers::delete_drink))
}

/// Creates the full application router with state attached
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .merge(create_auth_router())
        .merge(create_users_router())
        .merge(create_windows_router())
        .merge(create_drinks_router())
        .with_state(state)
}
