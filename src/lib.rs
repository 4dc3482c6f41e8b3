// Route Telemetry - rolling-window routing statistics
// Library exports

pub mod cli; // Terminal report rendering
pub mod client; // HTTP client and polling watcher
pub mod config;
pub mod errors;
pub mod ingest; // Producer request bodies and JSONL replay
pub mod metrics; // Event log, normalization, aggregation
pub mod server; // HTTP daemon

pub use errors::TelemetryError;
pub use metrics::{AggregateStats, RoutingTelemetry};
