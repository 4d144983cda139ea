//! # nfe-api Binary Entry Point
//!
//! Starts the Axum HTTP server for the NFe gateway.
//! Binds to a configurable port (default 3000).

use nfe_api::state::{AppConfig, AppState};
use nfe_provider_client::{NfeClient, ProviderConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    // Provider credentials are mandatory: a gateway that cannot reach the
    // provider has nothing to serve.
    let provider_config = ProviderConfig::from_env().map_err(|e| {
        tracing::error!("Provider configuration failed: {e}");
        e
    })?;

    let client = NfeClient::new(provider_config).map_err(|e| {
        tracing::error!("Provider client initialization failed: {e}");
        e
    })?;

    // Initialize database pool (optional; absent disables the sink).
    let db_pool = nfe_api::db::init_pool().await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    let port = config.port;
    let state = AppState {
        config,
        client,
        db_pool,
    };

    let app = nfe_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("NFe gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
