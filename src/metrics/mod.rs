// Metrics module
// Public interface for recording routing events and reading stats

mod aggregator;
mod event_log;
mod exporter;
mod hooks;
mod normalize;
mod telemetry;
mod types;

pub use aggregator::{compute_stats, nearest_rank};
pub use event_log::{EventLog, EventSnapshot, DEFAULT_CAPACITY};
pub use exporter::render_prometheus;
pub use hooks::{NoopHook, TelemetryHook, TracingHook};
pub use normalize::{normalize, CanonicalRoute};
pub use telemetry::RoutingTelemetry;
pub use types::{AggregateStats, ExecutionEvent, RoutePercentages, RouteStats};
