//! Converts freeform text into paragraph blocks and writes them to pages.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use pagebridge_notion::{NotionApi, NotionError, list_all_children};
use pagebridge_types::{CreatedPage, paragraph_block};

/// Archive this many blocks between throttle pauses.
const ARCHIVE_THROTTLE_EVERY: usize = 25;

/// Pause length between archive batches. A fixed courtesy window for the
/// service rate limit, not adaptive backoff.
const ARCHIVE_THROTTLE_PAUSE: Duration = Duration::from_millis(150);

/// Split freeform text into trimmed, non-empty lines. `\n` and `\r\n` both
/// terminate lines.
pub fn content_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// One paragraph block per surviving line, in input order.
pub fn paragraph_blocks(content: &str) -> Vec<Value> {
    content_lines(content).into_iter().map(paragraph_block).collect()
}

/// Append `content` to a page, one paragraph block per non-blank line, in a
/// single upstream call. Returns the number of blocks appended.
///
/// Content with no surviving lines appends nothing and skips the upstream
/// call entirely.
pub async fn append_text(
    api: &dyn NotionApi,
    page_id: &str,
    content: &str,
) -> Result<usize, NotionError> {
    let children = paragraph_blocks(content);
    let appended = children.len();
    if appended == 0 {
        return Ok(0);
    }
    api.append_children(page_id, children).await?;
    Ok(appended)
}

/// Archive every top-level block of a page, in order, pausing after each
/// throttle window. Children vanish with their parents. Returns the number
/// of top-level blocks archived.
pub async fn clear_top_level(api: &dyn NotionApi, page_id: &str) -> Result<usize, NotionError> {
    let top = list_all_children(api, page_id).await?;
    debug!(page_id, count = top.len(), "archiving top-level blocks");
    for (done, block) in top.iter().enumerate() {
        api.archive_block(&block.id).await?;
        if (done + 1) % ARCHIVE_THROTTLE_EVERY == 0 {
            tokio::time::sleep(ARCHIVE_THROTTLE_PAUSE).await;
        }
    }
    Ok(top.len())
}

/// Create a page under `parent_page_id` with `title`, seeding it with the
/// same paragraph conversion applied to `content`.
pub async fn create_page_with_text(
    api: &dyn NotionApi,
    parent_page_id: &str,
    title: &str,
    content: &str,
) -> Result<CreatedPage, NotionError> {
    api.create_page(parent_page_id, title, paragraph_blocks(content))
        .await
}

// ============================================================================
// Tests
// ============================================================================
