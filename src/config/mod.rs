use serde::Deserialize;
use std::path::PathBuf;

use crate::services::vision::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Largest accepted request body (50 MB), shared by the JSON and form parsers.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

/// Process configuration, read once at startup and handed to the router.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// DashScope API key, sent as a bearer token on every analysis call
    pub dashscope_api_key: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Listen host
    #[serde(default = "default_host")]
    pub host: String,

    /// Directory holding the pre-built single-page application
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Multimodal generation endpoint
    #[serde(default = "default_endpoint")]
    pub dashscope_endpoint: String,

    /// Vision-language model identifier
    #[serde(default = "default_model")]
    pub dashscope_model: String,

    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT_BYTES
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first when present.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Load from explicit key/value pairs using the same variable names as the environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    /// Server bind address, e.g. "0.0.0.0:3000".
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
