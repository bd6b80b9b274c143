//! Caller authentication: a shared-secret header checked on every route.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::constants::API_KEY_HEADER;
use crate::error::ApiError;
use crate::state::AppState;

/// Require the key header on every request, `/health` included.
///
/// A process with no configured secret rejects everything with a 500 rather
/// than running open.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return ApiError::MissingServerKey.into_response();
    };
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if presented != Some(expected) {
        return ApiError::Unauthorized.into_response();
    }
    next.run(request).await
}
