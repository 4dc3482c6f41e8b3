// Prometheus exposition of routing stats
//
// Stats are recomputed on every scrape, so each render builds a fresh
// registry from one AggregateStats value instead of keeping live collectors.

use anyhow::{Context, Result};
use prometheus::{Encoder, Gauge, GaugeVec, Opts, Registry, TextEncoder};

use super::types::AggregateStats;

const NAMESPACE: &str = "route_telemetry";

fn gauge(registry: &Registry, name: &str, help: &str) -> Result<Gauge> {
    let gauge = Gauge::with_opts(Opts::new(name, help).namespace(NAMESPACE))?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

fn route_gauge(registry: &Registry, name: &str, help: &str) -> Result<GaugeVec> {
    let gauge = GaugeVec::new(Opts::new(name, help).namespace(NAMESPACE), &["route"])?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

/// Render `stats` in the Prometheus text format
pub fn render_prometheus(stats: &AggregateStats) -> Result<String> {
    let registry = Registry::new();

    gauge(&registry, "events_total", "Events currently in the telemetry window")?
        .set(stats.total as f64);
    gauge(&registry, "avg_latency_ms", "Mean latency across all events")?
        .set(stats.avg_latency);

    let count = route_gauge(&registry, "route_count", "Events per route")?;
    let avg = route_gauge(&registry, "route_avg_latency_ms", "Mean latency per route")?;
    let p95 = route_gauge(
        &registry,
        "route_p95_latency_ms",
        "Nearest-rank p95 latency per route",
    )?;
    let success = route_gauge(
        &registry,
        "route_success_rate",
        "Percentage of successful events per route",
    )?;

    for (route, route_stats) in &stats.route_breakdown {
        let labels = [route.as_str()];
        count.with_label_values(&labels).set(route_stats.count as f64);
        avg.with_label_values(&labels).set(route_stats.avg_latency);
        p95.with_label_values(&labels).set(route_stats.p95_latency);
        success.with_label_values(&labels).set(route_stats.success_rate);
    }

    let share = route_gauge(
        &registry,
        "route_percentage",
        "Share of window events handled by each named route",
    )?;
    for (route, pct) in stats.route_percentages.entries() {
        share.with_label_values(&[route]).set(pct);
    }

    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&registry.gather(), &mut buffer)
        .context("Failed to encode Prometheus metrics")?;
    String::from_utf8(buffer).context("Prometheus output was not UTF-8")
}
