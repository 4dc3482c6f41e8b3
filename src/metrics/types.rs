// Metrics data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One observation of a routed query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionEvent {
    /// Raw route name as the producer spelled it (normalized at read time)
    pub route: String,
    pub latency_ms: f64,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    /// Originating request, kept for traceability only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ExecutionEvent {
    pub fn new(
        route: impl Into<String>,
        latency_ms: f64,
        success: bool,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            route: route.into(),
            latency_ms,
            success,
            timestamp,
            query: None,
            confidence: None,
            model: None,
        }
    }

    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }

    pub fn with_confidence(mut self, confidence: Option<f64>) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

/// Statistics for a single canonical route bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStats {
    pub count: usize,
    pub avg_latency: f64,
    /// Percentage (0-100) of events in the bucket that succeeded
    pub success_rate: f64,
    /// Nearest-rank 95th percentile latency
    pub p95_latency: f64,
}

/// Share of the window handled by each named route, in percent
///
/// Unrecognized ("other") buckets never appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePercentages {
    pub pattern: f64,
    pub t5: f64,
    pub slm: f64,
    pub gemini: f64,
    pub direct_llm: f64,
    pub fallback: f64,
}

impl RoutePercentages {
    /// (route name, percentage) pairs in canonical order
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("pattern", self.pattern),
            ("t5", self.t5),
            ("slm", self.slm),
            ("gemini", self.gemini),
            ("direct_llm", self.direct_llm),
            ("fallback", self.fallback),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.entries().iter().map(|(_, pct)| pct).sum()
    }
}

/// Snapshot statistics over the whole event window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total: usize,
    pub avg_latency: f64,
    /// Keyed by canonical route name; only routes with at least one event
    pub route_breakdown: BTreeMap<String, RouteStats>,
    pub route_percentages: RoutePercentages,
}

impl AggregateStats {
    /// Breakdown entries ordered by descending count, ties by route name
    pub fn sorted_breakdown(&self) -> Vec<(&str, &RouteStats)> {
        let mut entries: Vec<(&str, &RouteStats)> = self
            .route_breakdown
            .iter()
            .map(|(route, stats)| (route.as_str(), stats))
            .collect();
        entries.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(b.0)));
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
