use std::time::Instant;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::AppConfig;
use crate::models::dashscope::{GenerationRequest, GenerationResponse};

/// DashScope multimodal generation endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/aigc/multimodal-generation/generation";

pub const DEFAULT_MODEL: &str = "qwen-vl-plus";

/// Asks for a detailed, plain-language description of the picture.
pub const ANALYSIS_PROMPT: &str =
    "请详细分析这张图片的内容，告诉我你看到了什么？请用通俗易懂的语言描述。";

/// Client for the DashScope qwen-vl vision-language model.
pub struct DashScopeClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl DashScopeClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.dashscope_endpoint,
            &config.dashscope_model,
            &config.dashscope_api_key,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send an image to the model and return its description.
    ///
    /// Exactly one request is made per call. Nothing is retried or cached.
    pub async fn describe_image(&self, image: Option<&Value>) -> Result<String, RelayError> {
        let request = GenerationRequest::describe(&self.model, ANALYSIS_PROMPT, image);

        tracing::debug!(
            model = %self.model,
            image_len = image.and_then(serde_json::Value::as_str).map_or(0, str::len),
            "Sending image to DashScope"
        );

        let started = Instant::now();
        let sent = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await;
        metrics::histogram!("analysis_upstream_seconds").record(started.elapsed().as_secs_f64());

        let response = sent?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(RelayError::Upstream {
                status,
                body: upstream_body(&bytes),
            });
        }

        let parsed: GenerationResponse = serde_json::from_slice(&bytes)
            .map_err(|e| RelayError::MalformedResponse(e.to_string()))?;

        parsed.first_text().map(str::to_owned).ok_or_else(|| {
            RelayError::MalformedResponse("no output.choices[0].message.content[0].text".to_string())
        })
    }
}

/// Error bodies are kept verbatim: JSON when they parse, raw text otherwise.
/// Empty bodies and falsy JSON (`null`, `false`, `0`, `""`) carry nothing
/// worth relaying.
fn upstream_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    let body = serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()));
    (!is_falsy(&body)).then_some(body)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("DashScope returned {status}")]
    Upstream {
        status: StatusCode,
        body: Option<Value>,
    },

    #[error("DashScope request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed DashScope response: {0}")]
    MalformedResponse(String),
}

impl RelayError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Upstream { .. } => "upstream",
            RelayError::Transport(_) => "transport",
            RelayError::MalformedResponse(_) => "malformed",
        }
    }
}
