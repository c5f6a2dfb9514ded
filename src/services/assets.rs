use std::convert::Infallible;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Response;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

/// Entry document of the single-page application.
pub const ENTRY_DOCUMENT: &str = "index.html";

/// Pre-built SPA bundle served from disk.
///
/// Lookup is two-staged: an existing file under the root is served as is,
/// anything else gets the entry document so the client router can take over.
/// Dot-prefixed segments (`/.env`, `/.git/config`) never match a file.
pub struct StaticAssets {
    root: PathBuf,
    entry: PathBuf,
    files: ServeDir,
}

impl StaticAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let entry = root.join(ENTRY_DOCUMENT);
        let files = ServeDir::new(&root);
        Self { root, entry, files }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry(&self) -> &Path {
        &self.entry
    }

    pub async fn entry_exists(&self) -> bool {
        tokio::fs::metadata(&self.entry)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    /// Serve `request` from the bundle, falling back to the entry document.
    pub async fn serve(&self, request: Request) -> Result<Response, AssetError> {
        let (parts, _) = request.into_parts();

        if !is_hidden(parts.uri.path()) {
            // Paths escaping the root or naming nothing come back as 404 here.
            let response = unwrap_infallible(self.files.clone().oneshot(bodyless(&parts)).await);
            if response.status() != StatusCode::NOT_FOUND {
                return Ok(response.map(Body::new));
            }
        }

        tracing::debug!(path = %parts.uri.path(), "No asset found, serving entry document");

        let response = unwrap_infallible(ServeFile::new(&self.entry).oneshot(bodyless(&parts)).await);
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AssetError::MissingEntry(self.entry.clone()));
        }
        Ok(response.map(Body::new))
    }
}

/// Whether any segment starts with a dot, written literally or percent-encoded.
fn is_hidden(path: &str) -> bool {
    path.split('/').any(|segment| {
        segment.starts_with('.')
            || segment
                .get(..3)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("%2e"))
    })
}

fn bodyless(parts: &Parts) -> Request {
    let mut request = Request::new(Body::empty());
    *request.method_mut() = parts.method.clone();
    *request.uri_mut() = parts.uri.clone();
    *request.version_mut() = parts.version;
    *request.headers_mut() = parts.headers.clone();
    request
}

fn unwrap_infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Entry document not found at {}", .0.display())]
    MissingEntry(PathBuf),
}
