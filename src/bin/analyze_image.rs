//! Describe a local image with the same DashScope client the server uses.
//!
//! Usage:
//!   analyze-image <path/to/image.png>
//!
//! Reads DASHSCOPE_API_KEY (and the optional DASHSCOPE_* overrides) from the
//! environment or a `.env` file.

use std::path::Path;
use std::process::ExitCode;

use image_insight::{
    config::AppConfig,
    models::analysis::AnalysisRequest,
    services::vision::{DashScopeClient, RelayError},
};
use tracing_subscriber::EnvFilter;

/// MIME type for the data URI, picked from the file extension.
fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: analyze-image <image-file>");
        return ExitCode::from(2);
    };
    let path = Path::new(&path);

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let request = AnalysisRequest::from_image_bytes(&bytes, mime_for_path(path));
    let client = DashScopeClient::from_config(&config);

    tracing::info!(model = %client.model(), bytes = bytes.len(), "Analyzing image");

    match client.describe_image(request.image.as_ref()).await {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(RelayError::Upstream { status, body }) => {
            let body = body.map(|b| b.to_string()).unwrap_or_default();
            eprintln!("DashScope returned {status}: {body}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
