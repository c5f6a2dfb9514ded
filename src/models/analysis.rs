use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/analyze`.
///
/// The image is opaque: whatever JSON value the client put under `image` is
/// forwarded to the model untouched. A missing field stays missing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub image: Option<Value>,
}

impl AnalysisRequest {
    /// Take `image` from a decoded JSON body. Bodies that are not objects
    /// have no fields, so they carry no image.
    pub fn from_json(body: &Value) -> Self {
        Self {
            image: body.get("image").cloned(),
        }
    }

    /// Encode raw image bytes as a `data:` URI payload.
    pub fn from_image_bytes(bytes: &[u8], mime: &str) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            image: Some(Value::String(format!("data:{mime};base64,{encoded}"))),
        }
    }
}

/// URL-encoded form variant of the request body.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisForm {
    #[serde(default)]
    pub image: Option<String>,
}

impl From<AnalysisForm> for AnalysisRequest {
    fn from(form: AnalysisForm) -> Self {
        Self {
            image: form.image.map(Value::String),
        }
    }
}

/// Successful analysis returned to the browser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResponse {
    pub success: bool,
    pub result: String,
}

impl AnalysisResponse {
    pub fn success(result: String) -> Self {
        Self {
            success: true,
            result,
        }
    }
}
