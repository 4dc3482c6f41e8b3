// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

pub use loader::{load_config, load_config_from, CONFIG_ENV};
pub use settings::{ClientConfig, Config, ServerConfig, DEFAULT_ADDRESS};
