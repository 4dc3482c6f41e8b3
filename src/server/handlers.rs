// HTTP request handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::TelemetryServer;
use crate::errors::TelemetryError;
use crate::ingest::{LogRequest, RecordRequest};
use crate::metrics::{render_prometheus, AggregateStats};

/// Create the main application router
pub fn create_router(server: Arc<TelemetryServer>) -> Router {
    Router::new()
        .route("/v1/events", post(record_event))
        .route("/v1/log", post(log_query))
        .route("/v1/stats", get(get_stats))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .with_state(server)
}

/// Handle POST /v1/events - record one routed query
async fn record_event(
    State(server): State<Arc<TelemetryServer>>,
    Json(request): Json<RecordRequest>,
) -> Result<StatusCode, AppError> {
    let mut telemetry = server.telemetry().lock().await;
    request.apply(&mut telemetry)?;
    Ok(StatusCode::ACCEPTED)
}

/// Handle POST /v1/log - record a successful query
async fn log_query(
    State(server): State<Arc<TelemetryServer>>,
    Json(request): Json<LogRequest>,
) -> Result<StatusCode, AppError> {
    let mut telemetry = server.telemetry().lock().await;
    request.apply(&mut telemetry)?;
    Ok(StatusCode::ACCEPTED)
}

/// Handle GET /v1/stats - fresh stats for dashboards
async fn get_stats(State(server): State<Arc<TelemetryServer>>) -> Json<AggregateStats> {
    let stats = server.telemetry().lock().await.get_stats();
    Json(stats)
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub uptime_seconds: u64,
    pub events: usize,
    pub capacity: usize,
}

/// Handle GET /health
pub async fn health_check(State(server): State<Arc<TelemetryServer>>) -> Json<HealthStatus> {
    let (events, capacity) = {
        let telemetry = server.telemetry().lock().await;
        (telemetry.len(), telemetry.capacity())
    };

    Json(HealthStatus {
        status: "healthy".to_string(),
        uptime_seconds: server.uptime_seconds(),
        events,
        capacity,
    })
}

/// Handle GET /metrics - Prometheus metrics endpoint
pub async fn metrics_endpoint(
    State(server): State<Arc<TelemetryServer>>,
) -> Result<Response, AppError> {
    let stats = server.telemetry().lock().await.get_stats();
    let body = render_prometheus(&stats)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}

/// Application error wrapper for proper HTTP error responses
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = match self.0.downcast_ref::<TelemetryError>() {
            Some(err) => (StatusCode::BAD_REQUEST, err.kind()),
            None => (StatusCode::INTERNAL_SERVER_ERROR, "api_error"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::warn!(error = %self.0, "Rejected request");
        }

        let body = serde_json::json!({
            "error": {
                "message": self.0.to_string(),
                "type": error_type
            }
        });

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
