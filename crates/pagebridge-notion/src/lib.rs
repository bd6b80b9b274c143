//! Notion REST client for pagebridge.
//!
//! The [`NotionApi`] trait is the seam between the HTTP service and the
//! external document store: server handlers depend on the trait, the
//! reqwest-backed [`NotionHttpClient`] implements it against the live API,
//! and tests swap in [`fake::FakeNotion`] (behind the `fake` feature).
//!
//! One trait method per REST call. Pagination walks, candidate selection,
//! and archive throttling all live in the callers — this crate only speaks
//! the wire protocol.

pub mod constants;
pub mod error;
pub mod http;

#[cfg(any(test, feature = "fake"))]
pub mod fake;

pub use error::NotionError;
pub use http::NotionHttpClient;

use async_trait::async_trait;
use serde_json::Value;

use pagebridge_types::{Block, CreatedPage, Page, Paginated};

/// The Notion operations the gateway performs.
///
/// Implementations must not retry: failures propagate immediately.
#[async_trait]
pub trait NotionApi: Send + Sync {
    /// One page of a block's children, in document order.
    async fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<Block>, NotionError>;

    /// First page of a full-text search scoped to page objects, capped at
    /// [`constants::SEARCH_PAGE_SIZE`] results.
    async fn search_pages(&self, query: &str) -> Result<Paginated<Page>, NotionError>;

    /// Append pre-built child blocks to a block (or page — pages are blocks
    /// on this endpoint) in a single request.
    async fn append_children(
        &self,
        block_id: &str,
        children: Vec<Value>,
    ) -> Result<(), NotionError>;

    /// Archive a block — Notion's soft delete. Children vanish with it.
    async fn archive_block(&self, block_id: &str) -> Result<(), NotionError>;

    /// Create a page under `parent_page_id` with the given title and initial
    /// child blocks.
    async fn create_page(
        &self,
        parent_page_id: &str,
        title: &str,
        children: Vec<Value>,
    ) -> Result<CreatedPage, NotionError>;
}

/// Collect **all** children of a block, walking the cursor sequentially.
///
/// Each fetch completes before the next starts, so the output order is
/// exactly the service's order. A page claiming `has_more` without a cursor
/// ends the walk instead of looping.
pub async fn list_all_children(
    api: &dyn NotionApi,
    block_id: &str,
) -> Result<Vec<Block>, NotionError> {
    let mut blocks = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = api.list_children(block_id, cursor.as_deref()).await?;
        blocks.extend(page.results);
        if !page.has_more {
            break;
        }
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    Ok(blocks)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeNotion, block};

    #[tokio::test]
    async fn test_list_all_children_single_page() {
        let api = FakeNotion::new().with_children(
            "page-1",
            vec![
                block("b1", "paragraph", "one", false),
                block("b2", "paragraph", "two", false),
            ],
        );
        let blocks = list_all_children(&api, "page-1").await.unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].id, "b1");
        assert_eq!(blocks[1].id, "b2");
    }

    #[tokio::test]
    async fn test_list_all_children_walks_every_cursor() {
        // 5 children served 2 at a time: three fetches, order preserved.
        let api = FakeNotion::new()
            .with_children(
                "page-1",
                (0..5)
                    .map(|i| block(&format!("b{i}"), "paragraph", &format!("line {i}"), false))
                    .collect(),
            )
            .with_chunk_size(2);
        let blocks = list_all_children(&api, "page-1").await.unwrap();
        assert_eq!(blocks.len(), 5);
        let ids: Vec<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b0", "b1", "b2", "b3", "b4"]);
    }

    #[tokio::test]
    async fn test_list_all_children_empty_parent() {
        let api = FakeNotion::new();
        let blocks = list_all_children(&api, "missing").await.unwrap();
        assert!(blocks.is_empty());
    }

    #[tokio::test]
    async fn test_list_all_children_propagates_errors() {
        let api = FakeNotion::new().with_failure(503, "service unavailable");
        let err = list_all_children(&api, "page-1").await.unwrap_err();
        assert_eq!(err.to_string(), "service unavailable");
    }
}
