//! Canned upstream payloads and SPA bundles for router tests

use serde_json::{json, Value};
use std::path::Path;

pub const ENTRY_HTML: &str = "<!doctype html><html><body><div id=\"app\"></div></body></html>";

/// Bytes that are not valid UTF-8, so any re-encoding would show.
pub const LOGO_BYTES: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x00, 0xff, 0xfe, 0x10];

pub const SAMPLE_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

/// A DashScope success body whose first text item is `text`.
pub fn generation_success(text: &str) -> Value {
    json!({
        "output": {
            "choices": [{
                "finish_reason": "stop",
                "message": {
                    "role": "assistant",
                    "content": [{ "text": text }]
                }
            }]
        },
        "usage": { "input_tokens": 1271, "output_tokens": 42 },
        "request_id": "7f3b9a52-0c1d-4b8e-9d6a-2f1e5c4b3a21"
    })
}

/// Lay out a minimal built bundle: entry document plus one hashed asset.
pub fn write_bundle(root: &Path) {
    std::fs::create_dir_all(root.join("assets")).unwrap();
    std::fs::write(root.join("index.html"), ENTRY_HTML).unwrap();
    std::fs::write(root.join("assets/logo-3f2a9c.png"), LOGO_BYTES).unwrap();
    std::fs::write(root.join("assets/index-8d1e.js"), "import{createApp}from\"vue\";").unwrap();
}
