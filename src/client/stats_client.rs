// Stats client implementation
//
// HTTP client for a running telemetry daemon.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::ClientConfig;
use crate::ingest::RecordRequest;
use crate::metrics::AggregateStats;
use crate::server::HealthStatus;

/// HTTP client for communicating with the telemetry daemon
#[derive(Debug, Clone)]
pub struct StatsClient {
    base_url: String,
    client: Client,
}

impl StatsClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: format!("http://{}", config.daemon_address),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the current stats snapshot
    pub async fn fetch_stats(&self) -> Result<AggregateStats> {
        let url = format!("{}/v1/stats", self.base_url);
        debug!(url = %url, "Fetching stats");

        self.client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach daemon at {}", self.base_url))?
            .error_for_status()
            .context("Daemon returned an error for /v1/stats")?
            .json()
            .await
            .context("Failed to parse stats response")
    }

    /// Record one event on the daemon
    pub async fn record(&self, request: &RecordRequest) -> Result<()> {
        let url = format!("{}/v1/events", self.base_url);

        self.client
            .post(&url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to reach daemon at {}", self.base_url))?
            .error_for_status()
            .context("Daemon rejected event")?;

        Ok(())
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);

        self.client
            .get(&url)
            .send()
            .await
            .context("Failed to check daemon health")?
            .error_for_status()
            .context("Daemon health check failed")?
            .json()
            .await
            .context("Failed to parse health response")
    }
}
