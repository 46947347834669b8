//! eventgate server entry point.
//!
//! Starts the Axum HTTP server over a PostgreSQL-backed store.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use eventgate::api;
use eventgate::app_state::AppState;
use eventgate::config::AppConfig;
use eventgate::persistence::{EventStore, PostgresStore};
use eventgate::service::{EventService, RegistrationService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("loading configuration")?;
    tracing::info!(addr = %config.listen_addr, "starting eventgate");

    // Connect to PostgreSQL and apply migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await
        .context("connecting to database")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("running migrations")?;

    // Build persistence and service layers
    let store: Arc<dyn EventStore> = Arc::new(PostgresStore::new(pool));
    let event_service = Arc::new(EventService::new(Arc::clone(&store)));
    let registration_service = Arc::new(RegistrationService::new(Arc::clone(&store)));

    // Build application state
    let app_state = AppState {
        event_service,
        registration_service,
        public_base_url: config.public_base_url.clone(),
    };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .context("binding listen address")?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await.context("serving")?;

    Ok(())
}
