//! Router test helpers

use axum::body::{Body, Bytes};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use image_insight::{app_state::AppState, config::AppConfig, routes::build_router};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

pub const API_KEY: &str = "sk-test-key";
pub const UPSTREAM_PATH: &str = "/api/v1/services/aigc/multimodal-generation/generation";

/// Configuration pointing the relay at `upstream` and the bundle at `static_dir`.
pub fn test_config(upstream: &str, static_dir: &Path) -> AppConfig {
    AppConfig::from_vars([
        ("DASHSCOPE_API_KEY".to_string(), API_KEY.to_string()),
        ("DASHSCOPE_ENDPOINT".to_string(), upstream.to_string()),
        ("STATIC_DIR".to_string(), static_dir.display().to_string()),
    ])
    .expect("test config should deserialize")
}

/// Full application router with a private (non-global) metrics recorder.
pub fn test_app(upstream: &str, static_dir: &Path) -> Router {
    app_from_config(test_config(upstream, static_dir))
}

pub fn app_from_config(config: AppConfig) -> Router {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    build_router(AppState::from_config(config), Arc::new(handle))
}

/// Send one request through the router and collect the body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Bytes) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).expect("response should be JSON"))
}

pub async fn post_raw(
    app: &Router,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let (status, bytes) = send(app, builder.body(Body::from(body)).unwrap()).await;
    (status, serde_json::from_slice(&bytes).expect("response should be JSON"))
}
