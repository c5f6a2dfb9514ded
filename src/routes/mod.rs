use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::error::panic_response;

pub mod analyze;
pub mod assets;
pub mod health;
pub mod metrics;

/// Assemble the HTTP surface: relay endpoint, operational endpoints, and
/// the SPA bundle for everything else.
pub fn build_router(state: AppState, prometheus: Arc<PrometheusHandle>) -> Router {
    let body_limit = state.config.body_limit_bytes;

    Router::new()
        // Non-POST requests to the relay path fall through to the SPA like any other path
        .route(
            "/api/analyze",
            post(analyze::analyze_image).fallback(assets::serve_asset),
        )
        .route("/health", get(health::health_check))
        .fallback(assets::serve_asset)
        .with_state(state)
        .route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(prometheus),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        // Enforced by the body extractors so oversize bodies get the JSON error
        .layer(DefaultBodyLimit::max(body_limit))
}
