//! Error taxonomy for upstream Notion calls.

use thiserror::Error;

/// Failure talking to Notion.
///
/// No retries happen at this layer — failures propagate immediately and the
/// caller decides how to surface them.
#[derive(Debug, Error)]
pub enum NotionError {
    /// Transport-level failure: connect, timeout, body read.
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    /// Notion answered with a non-success status. `message` carries the
    /// error object's message field verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// Client could not be constructed from the given settings.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl NotionError {
    /// An API-level error with the given status and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}
