//! In-memory [`NotionApi`] backend for tests.
//!
//! Serves canned pages and block trees, records every mutation, and can
//! paginate children in fixed-size chunks to exercise cursor walks. Used by
//! this crate's own tests and, via the `fake` feature, by the server's
//! integration suite.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use pagebridge_types::{Block, CreatedPage, Page, Paginated};

use crate::constants::SEARCH_PAGE_SIZE;
use crate::{NotionApi, NotionError};

/// Canned Notion backend.
///
/// Interior-mutable so tests can keep a handle across the `Arc<dyn
/// NotionApi>` seam and inspect recorded calls afterwards.
#[derive(Default)]
pub struct FakeNotion {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    /// Searchable pages, in seeding order.
    pages: Vec<Page>,
    /// Children by parent block or page id.
    children: HashMap<String, Vec<Block>>,
    /// Page size for children listings; `None` serves everything at once.
    chunk: Option<usize>,
    /// Archived block ids, in call order.
    archived: Vec<String>,
    /// Appended child payloads by target id, in call order.
    appended: HashMap<String, Vec<Value>>,
    /// Total number of `append_children` calls.
    append_calls: usize,
    /// `(parent_page_id, title, child_count)` per `create_page` call.
    created: Vec<(String, String, usize)>,
    /// When set, every call fails with this API error.
    fail: Option<(u16, String)>,
}

impl FakeNotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a searchable page. An empty `title` seeds an untitled page,
    /// standing in for results the real search matches on body content.
    pub fn with_page(self, id: &str, title: &str, url: &str) -> Self {
        {
            let mut state = self.state.lock().expect("fake state lock");
            state.pages.push(canned_page(id, title, url));
        }
        self
    }

    /// Set the children served for a block or page id.
    pub fn with_children(self, parent_id: &str, blocks: Vec<Block>) -> Self {
        {
            let mut state = self.state.lock().expect("fake state lock");
            state.children.insert(parent_id.to_string(), blocks);
        }
        self
    }

    /// Serve children listings `n` at a time to exercise pagination.
    pub fn with_chunk_size(self, n: usize) -> Self {
        {
            let mut state = self.state.lock().expect("fake state lock");
            state.chunk = Some(n);
        }
        self
    }

    /// Make every call fail with the given API error.
    pub fn with_failure(self, status: u16, message: &str) -> Self {
        {
            let mut state = self.state.lock().expect("fake state lock");
            state.fail = Some((status, message.to_string()));
        }
        self
    }

    // ── Recorded-call accessors ─────────────────────────────────────────

    /// Block ids archived so far, in call order.
    pub fn archived(&self) -> Vec<String> {
        self.state.lock().expect("fake state lock").archived.clone()
    }

    /// Child payloads appended to `id` so far, flattened across calls.
    pub fn appended_to(&self, id: &str) -> Vec<Value> {
        self.state
            .lock()
            .expect("fake state lock")
            .appended
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of `append_children` calls made, across all targets.
    pub fn append_calls(&self) -> usize {
        self.state.lock().expect("fake state lock").append_calls
    }

    /// `(parent_page_id, title, child_count)` per `create_page` call.
    pub fn created(&self) -> Vec<(String, String, usize)> {
        self.state.lock().expect("fake state lock").created.clone()
    }

    fn check_failure(&self) -> Result<(), NotionError> {
        let state = self.state.lock().expect("fake state lock");
        match &state.fail {
            Some((status, message)) => Err(NotionError::api(*status, message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NotionApi for FakeNotion {
    async fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<Block>, NotionError> {
        self.check_failure()?;
        let state = self.state.lock().expect("fake state lock");
        let all = state.children.get(block_id).cloned().unwrap_or_default();
        // Cursors are plain offsets into the child list.
        let start = cursor
            .map(|c| c.parse::<usize>().unwrap_or(0))
            .unwrap_or(0)
            .min(all.len());
        let end = match state.chunk {
            Some(chunk) => all.len().min(start + chunk),
            None => all.len(),
        };
        let has_more = end < all.len();
        Ok(Paginated {
            results: all[start..end].to_vec(),
            has_more,
            next_cursor: has_more.then(|| end.to_string()),
        })
    }

    async fn search_pages(&self, query: &str) -> Result<Paginated<Page>, NotionError> {
        self.check_failure()?;
        let state = self.state.lock().expect("fake state lock");
        // Substring match on the title, plus every untitled page — close
        // enough to the real service, which also matches body content.
        let results = state
            .pages
            .iter()
            .filter(|page| {
                let title = page.title();
                title.contains(query) || title.is_empty()
            })
            .take(SEARCH_PAGE_SIZE as usize)
            .cloned()
            .collect();
        Ok(Paginated::complete(results))
    }

    async fn append_children(
        &self,
        block_id: &str,
        children: Vec<Value>,
    ) -> Result<(), NotionError> {
        self.check_failure()?;
        let mut state = self.state.lock().expect("fake state lock");
        state.append_calls += 1;
        state
            .appended
            .entry(block_id.to_string())
            .or_default()
            .extend(children);
        Ok(())
    }

    async fn archive_block(&self, block_id: &str) -> Result<(), NotionError> {
        self.check_failure()?;
        let mut state = self.state.lock().expect("fake state lock");
        state.archived.push(block_id.to_string());
        // Archived blocks disappear from children listings.
        for children in state.children.values_mut() {
            children.retain(|b| b.id != block_id);
        }
        Ok(())
    }

    async fn create_page(
        &self,
        parent_page_id: &str,
        title: &str,
        children: Vec<Value>,
    ) -> Result<CreatedPage, NotionError> {
        self.check_failure()?;
        let mut state = self.state.lock().expect("fake state lock");
        let n = state.created.len() + 1;
        state
            .created
            .push((parent_page_id.to_string(), title.to_string(), children.len()));
        Ok(CreatedPage {
            id: format!("created-{n}"),
            url: format!("https://notion.test/created-{n}"),
        })
    }
}

// ── Test fixtures ───────────────────────────────────────────────────────

/// Build a read-side block of the given kind with one rich-text run.
pub fn block(id: &str, kind: &str, text: &str, has_children: bool) -> Block {
    let mut payload = serde_json::Map::new();
    payload.insert(
        kind.to_string(),
        json!({ "rich_text": [{ "plain_text": text }] }),
    );
    Block {
        id: id.to_string(),
        kind: kind.to_string(),
        has_children,
        payload,
    }
}

/// Build a to-do block with its checked flag.
pub fn todo_block(id: &str, text: &str, checked: bool) -> Block {
    let mut todo = block(id, "to_do", text, false);
    if let Some(data) = todo.payload.get_mut("to_do") {
        data["checked"] = json!(checked);
    }
    todo
}

fn canned_page(id: &str, title: &str, url: &str) -> Page {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "title".to_string(),
        json!({ "type": "title", "title": [{ "plain_text": title }] }),
    );
    Page {
        id: id.to_string(),
        url: url.to_string(),
        properties,
    }
}

// ============================================================================
// Tests
// ============================================================================
