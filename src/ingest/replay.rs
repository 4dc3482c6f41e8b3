// JSON Lines replay
//
// Feeds a recorded event stream (one RecordRequest per line) through a
// telemetry store, e.g. to inspect stats for a captured session offline.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::request::RecordRequest;
use crate::errors::TelemetryError;
use crate::metrics::RoutingTelemetry;

/// Replay every event in `reader`, returning how many were recorded
///
/// Blank lines are skipped. The first unparsable or invalid line aborts the
/// replay with `TelemetryError::MalformedEvent`; events before it stay
/// recorded.
pub fn replay_events<R: BufRead>(reader: R, telemetry: &mut RoutingTelemetry) -> Result<usize> {
    let mut recorded = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;
        if line.trim().is_empty() {
            continue;
        }

        let request: RecordRequest =
            serde_json::from_str(&line).map_err(|e| TelemetryError::MalformedEvent {
                line: line_no,
                reason: e.to_string(),
            })?;

        request
            .apply(telemetry)
            .map_err(|e| TelemetryError::MalformedEvent {
                line: line_no,
                reason: e.to_string(),
            })?;
        recorded += 1;
    }

    tracing::info!(recorded, "Replayed routing events");
    Ok(recorded)
}

/// Replay a JSON Lines file from disk
pub fn replay_file<P: AsRef<Path>>(path: P, telemetry: &mut RoutingTelemetry) -> Result<usize> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    replay_events(BufReader::new(file), telemetry)
        .with_context(|| format!("Failed to replay {}", path.display()))
}
