use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde_json::Value;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::models::analysis::{AnalysisForm, AnalysisRequest, AnalysisResponse};
use crate::services::vision::RelayError;

/// Analysis request decoded from a JSON or URL-encoded form body.
///
/// Bodies of any other content type are ignored and yield an empty request.
/// Reading past the configured body limit is rejected like any unreadable body.
pub struct AnalysisPayload(pub AnalysisRequest);

impl<S> FromRequest<S> for AnalysisPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<AnalysisForm>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::Body(rejection.body_text()))?;
            return Ok(Self(form.into()));
        }

        if !content_type.starts_with("application/json") {
            return Ok(Self(AnalysisRequest::default()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Body(rejection.body_text()))?;
        if bytes.is_empty() {
            return Ok(Self(AnalysisRequest::default()));
        }

        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| AppError::Body(e.to_string()))?;
        Ok(Self(AnalysisRequest::from_json(&body)))
    }
}

/// POST /api/analyze — describe an image with the vision model.
pub async fn analyze_image(
    State(state): State<AppState>,
    AnalysisPayload(request): AnalysisPayload,
) -> Result<Json<AnalysisResponse>, AppError> {
    metrics::counter!("analysis_requests_total").increment(1);

    match state.vision.describe_image(request.image.as_ref()).await {
        Ok(text) => {
            tracing::info!(result_len = text.len(), "Image analysis completed");
            Ok(Json(AnalysisResponse::success(text)))
        }
        Err(err) => {
            metrics::counter!("analysis_requests_failed", "kind" => err.kind()).increment(1);
            match &err {
                RelayError::Upstream { status, body } => {
                    tracing::error!(%status, body = ?body, "DashScope API error");
                }
                RelayError::Transport(e) => {
                    tracing::error!(error = %e, "DashScope API unreachable");
                }
                // Logged alongside the generic 500
                RelayError::MalformedResponse(_) => {}
            }
            Err(err.into())
        }
    }
}
