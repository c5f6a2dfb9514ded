use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::services::assets::AssetError;
use crate::services::vision::RelayError;

/// Body of every response for a failure we did not anticipate.
pub const GENERIC_ERROR: &str = "Something went wrong!";

/// Body of a relay failure that produced no upstream response.
pub const TRANSPORT_ERROR: &str = "Internal Server Error";

/// Request-level failure, mapped to exactly one JSON error response.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("Request body rejected: {0}")]
    Body(String),

    #[error("Not found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Relay(RelayError::Upstream { status, body }) => {
                let body = body.unwrap_or_else(|| TRANSPORT_ERROR.into());
                (status, Json(json!({ "error": body }))).into_response()
            }
            AppError::Relay(RelayError::Transport(_)) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                TRANSPORT_ERROR,
            ),
            AppError::NotFound => error_response(StatusCode::NOT_FOUND, "Not Found"),
            err @ (AppError::Relay(RelayError::MalformedResponse(_))
            | AppError::Asset(_)
            | AppError::Body(_)) => {
                tracing::error!(error = %err, "Request failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR)
            }
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Last-resort handler for panics inside the request pipeline.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn parts(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn upstream_status_and_body_are_relayed() {
        let err = AppError::Relay(RelayError::Upstream {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: Some(json!({ "message": "rate limited" })),
        });
        let (status, body) = parts(err.into_response()).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, json!({ "error": { "message": "rate limited" } }));
    }

    #[tokio::test]
    async fn empty_upstream_body_uses_generic_message() {
        let err = AppError::Relay(RelayError::Upstream {
            status: StatusCode::BAD_GATEWAY,
            body: None,
        });
        let (status, body) = parts(err.into_response()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({ "error": "Internal Server Error" }));
    }

    #[tokio::test]
    async fn malformed_response_is_generic_500() {
        let err = AppError::Relay(RelayError::MalformedResponse("empty choices".into()));
        let (status, body) = parts(err.into_response()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Something went wrong!" }));
    }

    #[tokio::test]
    async fn panic_payloads_map_to_generic_500() {
        let (status, body) = parts(panic_response(Box::new("boom"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Something went wrong!" }));

        let (status, _) = parts(panic_response(Box::new(String::from("boom")))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
