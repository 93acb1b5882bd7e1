//! Contact intake MCP server - Main entry point
//!
//! Serves the M Legasi contact form over the Model Context Protocol on stdio.

use anyhow::Result;
use contact_intake::services::{IntakeService, IntakeServiceImpl};
use contact_intake::{delivery, Config, IntakeMcpServer, Metrics};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let fallback = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting contact intake with {} delivery",
        config.delivery_strategy
    );

    let metrics = Metrics::new();
    let delivery = delivery::from_config(&config, metrics.clone());
    let intake_service =
        Arc::new(IntakeServiceImpl::new(delivery, metrics.clone())) as Arc<dyn IntakeService>;

    let server = IntakeMcpServer::new(intake_service);

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    contact_intake::server::run_server(server).await?;

    info!(summary = ?metrics.summary(), "Contact intake shutdown complete");
    Ok(())
}
