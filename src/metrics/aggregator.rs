// Stats aggregation over an event window
//
// Pure computation: the same ordered events always produce the same stats.
// Every empty case resolves to 0 rather than NaN. Means are running means so
// that large finite latencies never sum past f64::MAX.

use std::collections::BTreeMap;

use super::normalize::{normalize, CanonicalRoute};
use super::types::{AggregateStats, ExecutionEvent, RoutePercentages, RouteStats};

/// Per-bucket accumulator, latencies kept in insertion order
#[derive(Default)]
struct Bucket {
    latencies: Vec<f64>,
    successes: usize,
}

impl Bucket {
    fn finish(mut self) -> RouteStats {
        let count = self.latencies.len();
        let avg_latency = running_mean(self.latencies.iter().copied());
        let success_rate = percentage(self.successes, count);

        self.latencies.sort_by(f64::total_cmp);
        let p95_latency = nearest_rank(&self.latencies, 95);

        RouteStats {
            count,
            avg_latency,
            success_rate,
            p95_latency,
        }
    }
}

/// Compute grouped and overall statistics for `events` (oldest first)
pub fn compute_stats<'a, I>(events: I) -> AggregateStats
where
    I: IntoIterator<Item = &'a ExecutionEvent>,
{
    let mut buckets: BTreeMap<CanonicalRoute, Bucket> = BTreeMap::new();
    let mut total = 0usize;
    let mut avg_latency = 0.0;

    for event in events {
        total += 1;
        avg_latency += (event.latency_ms - avg_latency) / total as f64;

        let bucket = buckets.entry(normalize(&event.route)).or_default();
        bucket.latencies.push(event.latency_ms);
        if event.success {
            bucket.successes += 1;
        }
    }

    let share = |route: &CanonicalRoute| -> f64 {
        let count = buckets.get(route).map_or(0, |b| b.latencies.len());
        percentage(count, total)
    };

    let route_percentages = RoutePercentages {
        pattern: share(&CanonicalRoute::Pattern),
        t5: share(&CanonicalRoute::T5),
        slm: share(&CanonicalRoute::Slm),
        gemini: share(&CanonicalRoute::Gemini),
        direct_llm: share(&CanonicalRoute::DirectLlm),
        fallback: share(&CanonicalRoute::Fallback),
    };

    let route_breakdown = buckets
        .into_iter()
        .map(|(route, bucket)| (route.as_str().to_string(), bucket.finish()))
        .collect();

    AggregateStats {
        total,
        avg_latency,
        route_breakdown,
        route_percentages,
    }
}

/// Nearest-rank percentile of an ascending-sorted slice
///
/// Rank index is `ceil(p/100 * n) - 1`, clamped to the slice. Computed in
/// integers so that e.g. n = 20 lands exactly on index 18.
pub fn nearest_rank(sorted: &[f64], percentile: usize) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let n = sorted.len();
    let rank = (percentile * n).div_ceil(100);
    let index = rank.saturating_sub(1).min(n - 1);
    sorted[index]
}

/// Incremental mean, 0 for no values
fn running_mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut avg = 0.0;
    for (k, value) in values.into_iter().enumerate() {
        avg += (value - avg) / (k + 1) as f64;
    }
    avg
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    100.0 * part as f64 / whole as f64
}
