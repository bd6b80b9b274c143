//! Flattens a page's block tree into indented plain-text lines.

use tracing::warn;

use pagebridge_notion::{NotionApi, NotionError, list_all_children};
use pagebridge_types::{Block, BlockKind, MAX_TREE_DEPTH};

/// Render a page's visible text: depth-first, pre-order, two spaces of
/// indent per nesting level, one marker per line.
///
/// Unknown block kinds render nothing but are still descended — content
/// nested under unsupported wrappers (toggles, columns) must not be lost.
/// Descent stops at [`MAX_TREE_DEPTH`]; deeper subtrees are skipped with a
/// warning rather than fetched.
pub async fn flatten_page(api: &dyn NotionApi, page_id: &str) -> Result<String, NotionError> {
    let top = list_all_children(api, page_id).await?;
    let mut lines = Vec::new();

    // Explicit stack, pushed in reverse so pops come out in document order.
    let mut stack: Vec<(Block, usize)> = top.into_iter().rev().map(|block| (block, 0)).collect();

    while let Some((block, depth)) = stack.pop() {
        if let Some(line) = render_line(&block, depth) {
            lines.push(line);
        }

        if block.has_children {
            if depth + 1 >= MAX_TREE_DEPTH {
                warn!(block_id = %block.id, depth, "depth ceiling reached, skipping subtree");
                continue;
            }
            let children = list_all_children(api, &block.id).await?;
            for child in children.into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }

    Ok(lines.join("\n"))
}

/// One output line for one block, or `None` when the block contributes no
/// text. Marker and text are combined first and trimmed as a whole; the
/// depth indent prefixes the trimmed result.
fn render_line(block: &Block, depth: usize) -> Option<String> {
    let kind = BlockKind::parse(&block.kind);
    if !kind.is_rendered() {
        return None;
    }
    let body = format!("{}{}", kind.marker(block.is_checked()), block.plain_text());
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("{}{}", "  ".repeat(depth), trimmed))
}

// ============================================================================
// Tests
// ============================================================================
