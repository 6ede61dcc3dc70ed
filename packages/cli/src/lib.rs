// ABOUTME: Server bootstrap for Drinkwise
// ABOUTME: Logging setup, database connection, middleware stack and the listener loop

use std::net::SocketAddr;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use drinkwise_api::{create_router, AppState};
use drinkwise_security::TokenService;

pub mod config;

use config::Config;

/// Install the global tracing subscriber. `RUST_LOG` wins over the default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Build the application with CORS and request tracing applied
pub fn build_app(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    Ok(create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// Apply pending migrations and exit
pub async fn run_migrations(config: &Config) -> anyhow::Result<()> {
    // connect() migrates as part of opening the pool
    let pool = drinkwise_storage::connect(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to open database")?;
    pool.close().await;

    info!("Database migrations are up to date");
    Ok(())
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let pool = drinkwise_storage::connect(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to open database")?;

    let tokens = TokenService::new(
        &config.secret_key,
        chrono::Duration::minutes(config.access_token_expire_minutes),
    )?;

    let app = build_app(AppState::new(pool, tokens), &config.cors_origin)?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
