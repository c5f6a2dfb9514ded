use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use image_insight::{app_state::AppState, config::AppConfig, routes};

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing image-insight server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    metrics::describe_counter!(
        "analysis_requests_total",
        "Total image analysis requests received"
    );
    metrics::describe_counter!(
        "analysis_requests_failed",
        "Image analysis requests that failed, by failure kind"
    );
    metrics::describe_histogram!(
        "analysis_upstream_seconds",
        "Latency of DashScope generation calls"
    );

    let bind_addr = config.bind_addr();
    let state = AppState::from_config(config);

    tracing::info!(
        model = %state.vision.model(),
        static_dir = %state.assets.root().display(),
        "DashScope client and static assets ready"
    );
    if !state.assets.entry_exists().await {
        tracing::warn!(
            entry = %state.assets.entry().display(),
            "SPA entry document not found; unmatched routes will fail until the bundle is built"
        );
    }

    let app = routes::build_router(state, prometheus_handle);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
