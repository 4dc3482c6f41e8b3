// HTTP client for daemon communication
//
// Provides StatsClient for CLI commands and StatsWatcher for polling
// dashboards.

mod stats_client;
mod watcher;

pub use stats_client::StatsClient;
pub use watcher::StatsWatcher;
