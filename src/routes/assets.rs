use axum::extract::{Request, State};
use axum::http::Method;
use axum::response::Response;

use crate::app_state::AppState;
use crate::error::AppError;

/// GET /* — a file from the bundle if one matches, else the entry document.
pub async fn serve_asset(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, AppError> {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return Err(AppError::NotFound);
    }
    Ok(state.assets.serve(request).await?)
}
