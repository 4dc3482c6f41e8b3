// Producer request bodies
//
// These are the untrusted forms of `record` and `log`. They are validated
// before reaching the telemetry store, which itself never fails.

use serde::{Deserialize, Serialize};

use crate::errors::{validate_confidence, validate_latency, TelemetryError};
use crate::metrics::RoutingTelemetry;

/// Body of `POST /v1/events` and one line of a replay file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    pub route: String,
    pub latency_ms: f64,
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

fn default_success() -> bool {
    true
}

impl RecordRequest {
    pub fn new(route: impl Into<String>, latency_ms: f64, success: bool) -> Self {
        Self {
            route: route.into(),
            latency_ms,
            success,
            query: None,
            confidence: None,
            model: None,
        }
    }

    pub fn validate(&self) -> Result<(), TelemetryError> {
        validate_latency(self.latency_ms)?;
        validate_confidence(self.confidence)?;
        Ok(())
    }

    /// Validate and record into `telemetry`
    pub fn apply(self, telemetry: &mut RoutingTelemetry) -> Result<(), TelemetryError> {
        self.validate()?;
        telemetry.record(
            &self.route,
            self.latency_ms,
            self.success,
            self.query,
            self.confidence,
            self.model,
        );
        Ok(())
    }
}

/// Body of `POST /v1/log`: a successful query on a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRequest {
    pub query: String,
    pub route: String,
    pub latency_ms: f64,
}

impl LogRequest {
    pub fn apply(self, telemetry: &mut RoutingTelemetry) -> Result<(), TelemetryError> {
        validate_latency(self.latency_ms)?;
        telemetry.log(&self.query, &self.route, self.latency_ms);
        Ok(())
    }
}
