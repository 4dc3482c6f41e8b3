// Configuration loader
// Loads settings from $ROUTE_TELEMETRY_CONFIG or ~/.route-telemetry/config.toml

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "ROUTE_TELEMETRY_CONFIG";

/// Load configuration: file (if any), then env overrides, then validation
pub fn load_config() -> Result<Config> {
    let mut config = match config_path()? {
        Some(path) => load_config_from(&path)?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Parse a config file. Missing fields take their defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

fn config_path() -> Result<Option<PathBuf>> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        if !explicit.is_empty() {
            return Ok(Some(PathBuf::from(explicit)));
        }
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let default_path = home.join(".route-telemetry/config.toml");
    Ok(default_path.exists().then_some(default_path))
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Ok(capacity) = std::env::var("ROUTE_TELEMETRY_CAPACITY") {
        config.capacity = capacity
            .parse()
            .with_context(|| format!("ROUTE_TELEMETRY_CAPACITY is not a number: {}", capacity))?;
    }

    if let Ok(bind) = std::env::var("ROUTE_TELEMETRY_BIND") {
        if !bind.is_empty() {
            config.server.bind_address = bind;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.capacity, 1000);
        assert!(!config.log_events);
        assert_eq!(config.server.bind_address, "127.0.0.1:11436");
        assert_eq!(config.client.poll_interval_seconds, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config: Config = toml::from_str("capacity = 50\n[client]\ntimeout_seconds = 9\n").unwrap();
        assert_eq!(config.capacity, 50);
        assert_eq!(config.client.timeout_seconds, 9);
        assert_eq!(config.client.poll_interval_seconds, 2);
        assert_eq!(config.server, crate::config::ServerConfig::default());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = Config {
            capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
