//! sensor-gateway server entry point.
//!
//! Loads configuration, opens the shared store and starts the Axum HTTP
//! server.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use sensor_gateway::api;
use sensor_gateway::app_state::AppState;
use sensor_gateway::config::{GatewayConfig, LogFormat, StoreBackend};
use sensor_gateway::persistence::{InMemoryStore, MeasurementStore, PostgresStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env().context("invalid configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
    tracing::info!(addr = %config.listen_addr, backend = ?config.store_backend, "starting sensor-gateway");

    // Build the process-wide store
    let store: Arc<dyn MeasurementStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let store = PostgresStore::connect_lazy(&config.database);
            let probe = store.clone();
            let host = config.database.host.clone();
            let port = config.database.port;
            tokio::spawn(async move {
                match probe.ping().await {
                    Ok(()) => tracing::info!(%host, port, "database reachable"),
                    Err(e) => tracing::warn!(
                        error = %e,
                        %host,
                        port,
                        "database not reachable yet, inserts will fail until it is"
                    ),
                }
            });
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store, measurements are lost on restart");
            Arc::new(InMemoryStore::new())
        }
    };

    // Build router
    let app = api::build_app(AppState::new(store));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "waiting for station data on /api/datos");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
