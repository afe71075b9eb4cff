//! Shared-secret header check.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::AppState;
use crate::error::ApiError;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject the request unless `x-api-key` matches the configured key.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` on a missing or wrong key.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(expected) = state.api_key.as_deref() {
        let provided = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected) {
            tracing::warn!(path = %request.uri().path(), "rejected request with bad API key");
            return Err(ApiError::Unauthorized);
        }
    }
    Ok(next.run(request).await)
}
