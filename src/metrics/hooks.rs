// Observability hooks
//
// The telemetry store never writes to a sink itself. Callers inject a hook to
// see writes, evictions and stats reads.

use super::types::{AggregateStats, ExecutionEvent};

/// Observer for telemetry activity. All methods default to no-ops.
pub trait TelemetryHook: Send + Sync {
    /// Called after `event` was appended to the log (and after any
    /// `on_evict` that append caused)
    fn on_record(&self, _event: &ExecutionEvent) {}

    /// Called when appending pushed the oldest event out of the window
    fn on_evict(&self, _evicted: &ExecutionEvent) {}

    /// Called after every stats computation
    fn on_stats(&self, _stats: &AggregateStats) {}
}

/// Hook that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl TelemetryHook for NoopHook {}

/// Hook that emits structured `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHook;

impl TelemetryHook for TracingHook {
    fn on_record(&self, event: &ExecutionEvent) {
        tracing::debug!(
            route = %event.route,
            latency_ms = event.latency_ms,
            success = event.success,
            model = ?event.model,
            "Recorded routing event"
        );
    }

    fn on_evict(&self, evicted: &ExecutionEvent) {
        tracing::trace!(
            route = %evicted.route,
            timestamp = %evicted.timestamp,
            "Evicted oldest routing event"
        );
    }

    fn on_stats(&self, stats: &AggregateStats) {
        tracing::debug!(
            total = stats.total,
            avg_latency = stats.avg_latency,
            routes = stats.route_breakdown.len(),
            "Computed routing stats"
        );
    }
}
