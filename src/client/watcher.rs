// Polling stats watcher
//
// Keeps the last successfully fetched stats. A failed poll is logged and the
// previous view is kept, so a dashboard never blanks out on a transient
// transport error.

use super::stats_client::StatsClient;
use crate::metrics::AggregateStats;

pub struct StatsWatcher {
    client: StatsClient,
    view: Option<AggregateStats>,
    consecutive_failures: u32,
}

impl StatsWatcher {
    pub fn new(client: StatsClient) -> Self {
        Self {
            client,
            view: None,
            consecutive_failures: 0,
        }
    }

    /// Fetch once. Returns true if the view was refreshed.
    pub async fn poll(&mut self) -> bool {
        match self.client.fetch_stats().await {
            Ok(stats) => {
                if self.consecutive_failures > 0 {
                    tracing::info!(
                        failures = self.consecutive_failures,
                        "Stats polling recovered"
                    );
                }
                self.consecutive_failures = 0;
                self.view = Some(stats);
                true
            }
            Err(e) => {
                self.consecutive_failures += 1;
                tracing::warn!(
                    error = %format!("{:#}", e),
                    failures = self.consecutive_failures,
                    "Stats poll failed, keeping last view"
                );
                false
            }
        }
    }

    /// Last successfully fetched stats, if any poll has succeeded yet
    pub fn view(&self) -> Option<&AggregateStats> {
        self.view.as_ref()
    }

    pub fn is_stale(&self) -> bool {
        self.consecutive_failures > 0
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}
