// Configuration structs

use serde::{Deserialize, Serialize};

use crate::errors::TelemetryError;
use crate::metrics::DEFAULT_CAPACITY;

/// Default daemon address (11434/11435 are usually taken by local model daemons)
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:11436";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of events kept in the rolling window
    pub capacity: usize,

    /// Emit a debug trace for every recorded event and stats read
    pub log_events: bool,

    pub server: ServerConfig,

    pub client: ClientConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            log_events: false,
            server: ServerConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), TelemetryError> {
        if self.capacity == 0 {
            return Err(TelemetryError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.client.poll_interval_seconds == 0 {
            return Err(TelemetryError::InvalidConfig(
                "client.poll_interval_seconds must be at least 1".to_string(),
            ));
        }
        if self.server.bind_address.trim().is_empty() {
            return Err(TelemetryError::InvalidConfig(
                "server.bind_address must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// HTTP daemon settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:11436")
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_ADDRESS.to_string(),
        }
    }
}

/// Settings for CLI commands that talk to a running daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub daemon_address: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// How often `watch` polls for stats
    pub poll_interval_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            daemon_address: DEFAULT_ADDRESS.to_string(),
            timeout_seconds: 5,
            poll_interval_seconds: 2,
        }
    }
}
