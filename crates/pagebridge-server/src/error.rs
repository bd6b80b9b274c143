//! Handler-boundary error taxonomy and its JSON rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use pagebridge_notion::NotionError;

/// Everything a handler can fail with.
///
/// Ambiguous title resolution is *not* an error — it is an expected outcome
/// rendered as a 200 with candidates (see `models::AmbiguousResponse`).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or wrong-typed request field. The message names the fields.
    #[error("{0}")]
    BadRequest(String),
    /// Caller key missing or wrong.
    #[error("Unauthorized")]
    Unauthorized,
    /// The process has no API_KEY configured; nothing can be authorized.
    #[error("API_KEY not set")]
    MissingServerKey,
    /// Upstream Notion failure, surfaced with the underlying message.
    #[error(transparent)]
    Upstream(#[from] NotionError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MissingServerKey | ApiError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Upstream(err) = &self {
            warn!(error = %err, "upstream call failed");
        }
        let body = json!({ "ok": false, "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

// ============================================================================
// Tests
// ============================================================================
