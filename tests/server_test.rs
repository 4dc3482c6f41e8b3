// Integration tests for the HTTP server

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use route_telemetry::{
    config::ServerConfig,
    metrics::{AggregateStats, RoutingTelemetry},
    server::{HealthStatus, TelemetryServer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

fn app_with(telemetry: Arc<Mutex<RoutingTelemetry>>) -> axum::Router {
    TelemetryServer::with_shared(ServerConfig::default(), telemetry).into_app()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_record_then_stats() {
    let telemetry = Arc::new(Mutex::new(RoutingTelemetry::new(100)));
    let app = app_with(telemetry.clone());

    let events = [
        serde_json::json!({"route": "pattern", "latencyMs": 10, "success": true}),
        serde_json::json!({"route": "Pattern", "latencyMs": 30, "success": true}),
        serde_json::json!({"route": "gemini-api", "latencyMs": 100, "success": false,
                           "query": "hi", "model": "gemini-pro"}),
    ];
    for event in events {
        let response = app
            .clone()
            .oneshot(post_json("/v1/events", event))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    let response = app.oneshot(get("/v1/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats: AggregateStats = body_json(response).await;
    assert_eq!(stats.total, 3);
    assert_eq!(stats.route_breakdown["pattern"].avg_latency, 20.0);
    assert_eq!(stats.route_breakdown["gemini"].success_rate, 0.0);

    // Same handle is visible to in-process readers
    assert_eq!(telemetry.lock().await.len(), 3);
}

#[tokio::test]
async fn test_log_endpoint_records_success() {
    let app = app_with(Arc::new(Mutex::new(RoutingTelemetry::new(10))));

    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/log",
            serde_json::json!({"query": "what is rust", "route": "T5-Distilled", "latencyMs": 8}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let stats: AggregateStats = body_json(app.oneshot(get("/v1/stats")).await.unwrap()).await;
    assert_eq!(stats.route_breakdown["t5"].success_rate, 100.0);
    assert_eq!(stats.route_percentages.t5, 100.0);
}

#[tokio::test]
async fn test_negative_latency_rejected() {
    let telemetry = Arc::new(Mutex::new(RoutingTelemetry::new(10)));
    let app = app_with(telemetry.clone());

    let response = app
        .oneshot(post_json(
            "/v1/events",
            serde_json::json!({"route": "slm", "latencyMs": -3}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = body_json(response).await;
    assert_eq!(body["error"]["type"], "invalid_latency");
    assert!(telemetry.lock().await.is_empty());
}

#[tokio::test]
async fn test_empty_stats_shape() {
    let app = app_with(Arc::new(Mutex::new(RoutingTelemetry::default())));

    let body: serde_json::Value = body_json(app.oneshot(get("/v1/stats")).await.unwrap()).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["routeBreakdown"], serde_json::json!({}));
    assert_eq!(body["routePercentages"]["direct_llm"], 0.0);
}

#[tokio::test]
async fn test_health_reports_window() {
    let telemetry = Arc::new(Mutex::new(RoutingTelemetry::new(5)));
    telemetry.lock().await.log("q", "slm", 1.0);
    let app = app_with(telemetry);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthStatus = body_json(response).await;
    assert_eq!(health.status, "healthy");
    assert_eq!(health.events, 1);
    assert_eq!(health.capacity, 5);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let telemetry = Arc::new(Mutex::new(RoutingTelemetry::new(5)));
    telemetry.lock().await.log("q", "fallback", 7.0);
    let app = app_with(telemetry);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("route_telemetry_events_total 1"));
    assert!(text.contains("route_telemetry_route_p95_latency_ms{route=\"fallback\"} 7"));
}

#[tokio::test]
async fn test_serve_stops_on_shutdown_signal() {
    let config = ServerConfig {
        bind_address: "127.0.0.1:0".to_string(),
    };
    let server = TelemetryServer::new(config, RoutingTelemetry::new(10));
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(server.serve_with_shutdown(async {
        let _ = rx.await;
    }));

    tx.send(()).unwrap();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("server did not stop after shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}
