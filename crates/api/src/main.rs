// Processed events API server
// Decision: Read-only query service; ingestion happens elsewhere
// Decision: DEV_MODE swaps PostgreSQL for an in-memory table

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use processed_events_api::build_router;
use processed_events_api::config::{ServerConfig, StorageConfig};
use processed_events_api::storage::{InMemoryDatabase, StorageBackend};
use processed_events_core::telemetry::{init_telemetry, TelemetryConfig};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Configure via environment variables:
    // - SERVICE_NAME: Service name (default: "processed-events-api")
    // - RUST_LOG: Log filter (default: "processed_events_api=debug,tower_http=debug")
    // - LOG_FORMAT=json: structured output
    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.service_name == "processed-events" {
        telemetry_config.service_name = "processed-events-api".to_string();
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());
    init_telemetry(telemetry_config);

    tracing::info!("processed-events-api starting...");

    let config = ServerConfig::from_env()?;
    let db = Arc::new(connect_storage(&config.storage).await?);

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }

    let cors_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    if cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
    }

    let app = build_router(db, &config.api_prefix);

    // Add CORS layer only if origins are configured
    let app = if !cors_origins.is_empty() {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]),
        )
    } else {
        app
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.http_addr))?;
    tracing::info!(
        dev_mode = config.is_dev_mode(),
        "HTTP server listening on {}",
        config.http_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("processed-events-api stopped");
    Ok(())
}

async fn connect_storage(config: &StorageConfig) -> Result<StorageBackend> {
    match config {
        StorageConfig::Postgres {
            database_url,
            max_connections,
            acquire_timeout,
        } => {
            let backend = StorageBackend::postgres(database_url, *max_connections, *acquire_timeout)
                .await
                .context("Failed to connect to database")?;
            tracing::info!(max_connections, "Connected to database");
            Ok(backend)
        }
        StorageConfig::InMemory { seed_file } => {
            let db = match seed_file {
                Some(path) => {
                    let json = tokio::fs::read_to_string(path)
                        .await
                        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
                    InMemoryDatabase::from_seed_json(&json)
                        .with_context(|| format!("Invalid seed file {}", path.display()))?
                }
                None => InMemoryDatabase::new(),
            };
            tracing::warn!(events = db.len(), "DEV_MODE: serving events from memory");
            Ok(StorageBackend::from_memory(Arc::new(db)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
