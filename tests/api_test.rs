//! HTTP API tests driven through the router without a socket

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use scam_sentry::api::{create_router, handlers::AppState};
use scam_sentry::{ServerConfig, TelemetryCollector};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(config: ServerConfig) -> (Router, Arc<TelemetryCollector>) {
    let dir = std::env::temp_dir().join(format!("scam_sentry_api_{}", std::process::id()));
    let telemetry = Arc::new(TelemetryCollector::with_config(dir, 1000));
    let state = Arc::new(AppState::new(telemetry.clone(), config));
    (create_router(state), telemetry)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app(ServerConfig::default());
    let (status, body) = send(app, get("/v1/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["version"], scam_sentry::utils::constants::APP_VERSION);
}

#[tokio::test]
async fn test_analyze_text_returns_assessment() {
    let (app, telemetry) = test_app(ServerConfig::default());
    let request = post_json(
        "/v1/analyze/text",
        json!({ "text": "Digital arrest warrant issued. Pay fine now!", "channel": "SMS" }),
    );

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["channel"], "SMS");
    assert_eq!(data["assessment"]["riskScore"], 100);
    assert_eq!(data["assessment"]["riskLevel"], "CRITICAL");
    assert_eq!(data["assessment"]["sentiment"], "threatening");
    assert_eq!(data["level_badge"], "destructive");
    assert!(data["analysis_id"].is_string());

    let stats = telemetry.get_stats();
    assert_eq!(stats.total_analyzed, 1);
    assert_eq!(stats.total_threats, 1);
}

#[tokio::test]
async fn test_blank_text_is_bad_request() {
    let (app, telemetry) = test_app(ServerConfig::default());
    let (status, body) = send(app, post_json("/v1/analyze/text", json!({ "text": "   " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "API_BAD_REQUEST");
    assert_eq!(telemetry.get_stats().total_analyzed, 0);
}

#[tokio::test]
async fn test_missing_text_is_bad_request() {
    let (app, _) = test_app(ServerConfig::default());
    let (status, _) = send(app, post_json("/v1/analyze/text", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_text_rejected() {
    let config = ServerConfig {
        max_text_bytes: 16,
        ..ServerConfig::default()
    };
    let (app, _) = test_app(config);
    let request = post_json(
        "/v1/analyze/text",
        json!({ "text": "this message is definitely longer than sixteen bytes" }),
    );

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "API_PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_batch_counts_levels_and_errors() {
    let (app, telemetry) = test_app(ServerConfig::default());
    let request = post_json(
        "/v1/analyze/batch",
        json!({ "texts": ["hello there", "arrest by police", "", "digital arrest, pay fine now"] }),
    );

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["total_requested"], 4);
    assert_eq!(data["total_processed"], 3);
    assert_eq!(data["total_low"], 1);
    assert_eq!(data["total_high"], 1);
    assert_eq!(data["total_critical"], 1);
    assert_eq!(data["results"][2]["status"], "error");
    assert_eq!(telemetry.get_stats().total_analyzed, 3);
}

#[tokio::test]
async fn test_batch_limit_enforced() {
    let config = ServerConfig {
        max_batch_size: 2,
        ..ServerConfig::default()
    };
    let (app, _) = test_app(config);
    let request = post_json("/v1/analyze/batch", json!({ "texts": ["a", "b", "c"] }));

    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_samples_listed_with_assessments() {
    let (app, _) = test_app(ServerConfig::default());
    let (status, body) = send(app, get("/v1/samples")).await;

    assert_eq!(status, StatusCode::OK);
    let samples = body["data"].as_array().unwrap();
    assert_eq!(samples.len(), 3);
    assert_eq!(samples[0]["channel"], "SMS");
    assert_eq!(samples[0]["assessment"]["riskLevel"], "CRITICAL");
    assert_eq!(samples[2]["assessment"]["riskLevel"], "HIGH");
}

#[tokio::test]
async fn test_stats_reflect_analyses() {
    let (app, _) = test_app(ServerConfig::default());

    let (status, _) = send(
        app.clone(),
        post_json("/v1/analyze/text", json!({ "text": "cybercrime cell", "channel": "CALL" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app, get("/v1/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_analyzed"], 1);
    assert_eq!(body["data"]["by_channel"]["CALL"], 1);
    assert_eq!(body["data"]["api_version"], scam_sentry::utils::constants::APP_VERSION);
    assert_eq!(body["data"]["top_keywords"][0]["keyword"], "cybercrime");
}

#[tokio::test]
async fn test_malformed_api_key_rejected() {
    let (app, _) = test_app(ServerConfig::default());
    let request = Request::builder()
        .uri("/v1/stats")
        .header("x-api-key", "not-a-key")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "API_UNAUTHORIZED");
}

#[tokio::test]
async fn test_root_health_skips_auth() {
    let (app, _) = test_app(ServerConfig::default());
    let request = Request::builder()
        .uri("/health")
        .header("x-api-key", "not-a-key")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-ratelimit-remaining").is_none());
}

#[tokio::test]
async fn test_rate_limit_headers_and_429() {
    let (app, _) = test_app(ServerConfig::default());
    // Dedicated bucket so the other tests' anonymous requests do not count
    let stats = || {
        Request::builder()
            .uri("/v1/stats")
            .header("x-api-key", "sk_ratelimit_bucket")
            .body(Body::empty())
            .unwrap()
    };

    let first = app.clone().oneshot(stats()).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["x-ratelimit-remaining"], "99");
    assert!(first.headers().contains_key("x-ratelimit-reset"));

    for _ in 1..100 {
        let response = app.clone().oneshot(stats()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let (status, body) = send(app, stats()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "API_RATE_LIMITED");
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let (app, _) = test_app(ServerConfig::default());
    let (status, body) = send(app, get("/v1/nothing-here")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "API_NOT_FOUND");
}

#[tokio::test]
async fn test_mistyped_text_is_bad_request() {
    let (app, _) = test_app(ServerConfig::default());
    let (status, body) = send(app, post_json("/v1/analyze/text", json!({ "text": 5 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "API_BAD_REQUEST");
}

#[tokio::test]
async fn test_non_json_body_is_bad_request() {
    let (app, _) = test_app(ServerConfig::default());
    let request = Request::builder()
        .method("POST")
        .uri("/v1/analyze/batch")
        .header("content-type", "application/json")
        .body(Body::from("texts=hello"))
        .unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "API_BAD_REQUEST");
}
