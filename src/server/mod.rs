// Telemetry Server Module
// HTTP daemon exposing record/log/stats to producers and dashboards

mod handlers;

pub use handlers::{create_router, health_check, metrics_endpoint, AppError, HealthStatus};

use anyhow::{Context, Result};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::metrics::RoutingTelemetry;

/// Shared daemon state
///
/// The telemetry store sits behind a single mutex: every record and every
/// stats read (snapshot plus aggregation) runs entirely under that lock.
pub struct TelemetryServer {
    telemetry: Arc<Mutex<RoutingTelemetry>>,
    started_at: Instant,
    config: ServerConfig,
}

impl TelemetryServer {
    pub fn new(config: ServerConfig, telemetry: RoutingTelemetry) -> Self {
        Self::with_shared(config, Arc::new(Mutex::new(telemetry)))
    }

    /// Serve an existing handle, e.g. one also fed by in-process producers
    pub fn with_shared(config: ServerConfig, telemetry: Arc<Mutex<RoutingTelemetry>>) -> Self {
        Self {
            telemetry,
            started_at: Instant::now(),
            config,
        }
    }

    /// Build the axum application for this server
    pub fn into_app(self) -> axum::Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(Arc::new(self))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Start the HTTP server, draining in-flight requests on Ctrl+C
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                return;
            }
            tracing::info!("Received SIGINT, shutting down gracefully");
        })
        .await
    }

    /// Start the HTTP server and stop accepting connections once `shutdown`
    /// resolves. Returns after in-flight requests have completed.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;

        let app = self.into_app();

        tracing::info!("Starting route telemetry server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    pub fn telemetry(&self) -> &Arc<Mutex<RoutingTelemetry>> {
        &self.telemetry
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
