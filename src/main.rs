//! ASGRC catalog service entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use asgrc_catalog::adapters::http::api_router;
use asgrc_catalog::adapters::postgres::{
    self, PostgresMacroprocessRepository, PostgresProcessRepository,
    PostgresSubprocessRepository,
};
use asgrc_catalog::application::catalog::CatalogStore;
use asgrc_catalog::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = postgres::connect(&config.database).await?;
    info!("Database pool established");

    let store = Arc::new(CatalogStore::new(
        Arc::new(PostgresMacroprocessRepository::new(pool.clone())),
        Arc::new(PostgresProcessRepository::new(pool.clone())),
        Arc::new(PostgresSubprocessRepository::new(pool)),
    ));

    // Warm the snapshot; a cold start with an unreachable store still
    // serves, every collection refreshes on the next mutation or refresh.
    if let Err(e) = store.refresh().await {
        warn!(error = %e, "Initial catalog load failed; starting with an empty snapshot");
    }

    let cors = build_cors(&config)?;
    let app = api_router(store, config.server.environment)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "ASGRC catalog service listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<_, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any))
}
