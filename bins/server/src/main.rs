//! Painel API Server
//!
//! Main entry point for the operations dashboard service.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use painel_api::{AppState, create_router};
use painel_core::dashboard::{DashboardService, FeedOptions};
use painel_db::{DocumentRepository, connect_with};
use painel_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "painel=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    let timezone = config.dashboard.timezone()?;

    // Connect to database
    let db = connect_with(&config.database).await?;
    info!("Connected to database");

    // Create dashboard service
    let dashboard = DashboardService::new(Arc::new(DocumentRepository::new(db)))
        .with_options(FeedOptions { timezone });
    info!(timezone = %timezone, "Dashboard service configured");

    // Create router
    let app = create_router(
        AppState { dashboard },
        Duration::from_secs(config.server.request_timeout_secs),
    );

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
