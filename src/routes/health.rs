use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub assets: ComponentHealth,
}

#[derive(Serialize)]
pub struct ComponentHealth {
    pub status: String,
}

/// GET /health — reports whether the SPA entry document can be served.
///
/// The upstream model is not probed; every probe would cost an inference call.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let assets_ok = state.assets.entry_exists().await;

    let (status_code, status) = if assets_ok {
        (StatusCode::OK, "ok")
    } else {
        tracing::warn!(entry = %state.assets.entry().display(), "SPA entry document missing");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            assets: ComponentHealth {
                status: if assets_ok { "ok" } else { "error" }.to_string(),
            },
        },
    };

    (status_code, Json(response))
}
