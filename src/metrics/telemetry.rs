// Routing telemetry store
//
// Owns the bounded event log and answers stats queries over it. There is no
// global instance: construct one and hand it (or an Arc<Mutex<_>> of it) to
// producers and consumers.

use chrono::Utc;
use std::sync::Arc;

use super::aggregator::compute_stats;
use super::event_log::{EventLog, EventSnapshot, DEFAULT_CAPACITY};
use super::hooks::{NoopHook, TelemetryHook};
use super::types::{AggregateStats, ExecutionEvent};

pub struct RoutingTelemetry {
    log: EventLog,
    hook: Arc<dyn TelemetryHook>,
}

impl RoutingTelemetry {
    /// Create a store retaining at most `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            log: EventLog::new(capacity),
            hook: Arc::new(NoopHook),
        }
    }

    /// Replace the observability hook
    pub fn with_hook(mut self, hook: Arc<dyn TelemetryHook>) -> Self {
        self.hook = hook;
        self
    }

    /// Record one routed query
    ///
    /// Never fails. A negative or non-finite latency is stored as 0; ingest
    /// boundaries are expected to reject those before they get here.
    pub fn record(
        &mut self,
        route: &str,
        latency_ms: f64,
        success: bool,
        query: Option<String>,
        confidence: Option<f64>,
        model: Option<String>,
    ) {
        let latency_ms = if latency_ms.is_finite() && latency_ms >= 0.0 {
            latency_ms
        } else {
            tracing::warn!(route, latency_ms, "Clamping invalid latency to 0");
            0.0
        };

        // Keep timestamps non-decreasing even if the wall clock steps back
        let now = Utc::now();
        let timestamp = match self.log.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };

        let event = ExecutionEvent::new(route, latency_ms, success, timestamp)
            .with_query(query)
            .with_confidence(confidence)
            .with_model(model);

        if let Some(evicted) = self.log.append(event) {
            self.hook.on_evict(&evicted);
        }
        if let Some(recorded) = self.log.last() {
            self.hook.on_record(recorded);
        }
    }

    /// Shorthand for a successful query on `route`
    pub fn log(&mut self, query: &str, route: &str, latency_ms: f64) {
        self.record(route, latency_ms, true, Some(query.to_string()), None, None);
    }

    /// Fresh statistics over the current window (never cached)
    pub fn get_stats(&self) -> AggregateStats {
        let stats = compute_stats(self.log.snapshot().iter());
        self.hook.on_stats(&stats);
        stats
    }

    /// Ordered read-only view of the stored events
    pub fn snapshot(&self) -> EventSnapshot<'_> {
        self.log.snapshot()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.log.capacity()
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }
}

impl Default for RoutingTelemetry {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
