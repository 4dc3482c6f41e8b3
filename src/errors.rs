// Boundary errors
//
// The aggregation core is total and never fails. These errors only surface
// where untrusted input enters the process: HTTP bodies, replay files and
// configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Latency must be a finite, non-negative number of milliseconds
    #[error("invalid latency {0}: expected a finite number >= 0")]
    InvalidLatency(f64),

    #[error("invalid confidence {0}: expected a finite number")]
    InvalidConfidence(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A replay line could not be parsed (line numbers are 1-based)
    #[error("malformed event on line {line}: {reason}")]
    MalformedEvent { line: usize, reason: String },
}

impl TelemetryError {
    /// Short machine-readable kind, used in HTTP error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            TelemetryError::InvalidLatency(_) => "invalid_latency",
            TelemetryError::InvalidConfidence(_) => "invalid_confidence",
            TelemetryError::InvalidConfig(_) => "invalid_config",
            TelemetryError::MalformedEvent { .. } => "malformed_event",
        }
    }
}

/// Check that a producer-supplied latency is usable
pub fn validate_latency(latency_ms: f64) -> Result<f64, TelemetryError> {
    if latency_ms.is_finite() && latency_ms >= 0.0 {
        Ok(latency_ms)
    } else {
        Err(TelemetryError::InvalidLatency(latency_ms))
    }
}

pub fn validate_confidence(confidence: Option<f64>) -> Result<Option<f64>, TelemetryError> {
    match confidence {
        Some(c) if !c.is_finite() => Err(TelemetryError::InvalidConfidence(c)),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_latency() {
        assert_eq!(validate_latency(0.0).unwrap(), 0.0);
        assert_eq!(validate_latency(12.5).unwrap(), 12.5);
        assert!(validate_latency(-1.0).is_err());
        assert!(validate_latency(f64::NAN).is_err());
        assert!(validate_latency(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_confidence() {
        assert_eq!(validate_confidence(None).unwrap(), None);
        assert_eq!(validate_confidence(Some(0.8)).unwrap(), Some(0.8));
        assert!(validate_confidence(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = TelemetryError::MalformedEvent {
            line: 3,
            reason: "missing field `route`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed event on line 3: missing field `route`"
        );
        assert_eq!(err.kind(), "malformed_event");
    }
}
