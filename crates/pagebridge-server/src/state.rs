//! Shared per-process state handed to every handler.

use std::sync::Arc;

use pagebridge_notion::NotionApi;

/// Immutable state shared across requests: the configured Notion backend
/// and the caller-facing secret. Handlers hold nothing else in common — no
/// caches, no sessions.
pub struct AppState {
    pub notion: Arc<dyn NotionApi>,
    pub api_key: Option<String>,
}

impl AppState {
    pub fn new(notion: Arc<dyn NotionApi>, api_key: Option<String>) -> Arc<Self> {
        Arc::new(Self { notion, api_key })
    }
}
