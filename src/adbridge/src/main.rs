//! AdBridge — multi-platform advertising campaign backend.
//!
//! Main entry point that wires the credential store, orchestrator and API
//! server together.

use adbridge_api::ApiServer;
use adbridge_core::config::AppConfig;
use adbridge_orchestrator::CampaignOrchestrator;
use adbridge_platforms::{CredentialProvider, InMemoryCredentialStore};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "adbridge")]
#[command(about = "Multi-platform advertising campaign backend")]
#[command(version)]
struct Cli {
    /// Bind host (overrides config)
    #[arg(long, env = "ADBRIDGE__API__HOST")]
    host: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "ADBRIDGE__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Prometheus exporter port (overrides config)
    #[arg(long, env = "ADBRIDGE__METRICS__PORT")]
    metrics_port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adbridge=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("AdBridge starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(port) = cli.metrics_port {
        config.metrics.port = port;
    }

    info!(
        host = %config.api.host,
        http_port = config.api.http_port,
        metrics_port = config.metrics.port,
        "Configuration loaded"
    );

    // Credential store, seeded from config for development deployments
    let store = Arc::new(InMemoryCredentialStore::new());
    store.seed_from_config(&config.credentials);
    let credentials: Arc<dyn CredentialProvider> = store;

    // Orchestrator and API server
    let orchestrator = Arc::new(CampaignOrchestrator::new(credentials, config.clone()));
    let api_server = ApiServer::new(config, orchestrator);

    // Start metrics exporter
    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("AdBridge is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
