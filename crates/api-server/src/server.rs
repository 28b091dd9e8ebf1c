//! API server wiring: HTTP router and the Prometheus exporter.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use adbridge_copygen::CopyGenerator;
use adbridge_core::config::AppConfig;
use adbridge_orchestrator::CampaignOrchestrator;
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::rest::{self, AppState};

pub struct ApiServer {
    config: AppConfig,
    orchestrator: Arc<CampaignOrchestrator>,
}

impl ApiServer {
    pub fn new(config: AppConfig, orchestrator: Arc<CampaignOrchestrator>) -> Self {
        Self {
            config,
            orchestrator,
        }
    }

    fn router(&self) -> Router {
        let state = AppState {
            orchestrator: self.orchestrator.clone(),
            generator: CopyGenerator::new(),
            config: self.config.clone(),
            start_time: Instant::now(),
        };

        Router::new()
            // Campaign endpoints
            .route("/api/health", get(rest::health_check))
            .route("/api/generate-copy", post(rest::generate_copy))
            .route("/api/create-campaign", post(rest::create_campaign))
            .route("/api/get-performance", post(rest::get_performance))
            // OAuth redirect target
            .route("/callback/linkedin", get(rest::linkedin_callback))
            // Operational endpoints
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the HTTP REST server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = self.router();
        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics exporter on a separate port. Installs the recorder
    /// and spawns the scrape endpoint onto the current runtime.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        Ok(())
    }
}
