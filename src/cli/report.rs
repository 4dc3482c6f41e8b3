// Plain-text stats report for the terminal

use std::fmt::Write;

use crate::metrics::AggregateStats;

/// Render stats as a table sorted by event count, followed by the share
/// summary for the named routes
pub fn render_report(stats: &AggregateStats) -> String {
    if stats.is_empty() {
        return "No routing data yet\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Routing stats: {} events, avg latency {:.1} ms",
        stats.total, stats.avg_latency
    );
    let _ = writeln!(
        out,
        "{:<16} {:>7} {:>7} {:>10} {:>10} {:>8}",
        "route", "count", "share", "avg ms", "p95 ms", "success"
    );

    for (route, route_stats) in stats.sorted_breakdown() {
        let share = 100.0 * route_stats.count as f64 / stats.total as f64;
        let _ = writeln!(
            out,
            "{:<16} {:>7} {:>6.1}% {:>10.1} {:>10.1} {:>7.1}%",
            route,
            route_stats.count,
            share,
            route_stats.avg_latency,
            route_stats.p95_latency,
            route_stats.success_rate
        );
    }

    let summary: Vec<String> = stats
        .route_percentages
        .entries()
        .iter()
        .map(|(route, pct)| format!("{} {:.1}%", route, pct))
        .collect();
    let _ = writeln!(out, "Share: {}", summary.join(" | "));

    out
}
