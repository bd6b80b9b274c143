//! Notion block wire model and line markers.
//!
//! Read-side blocks arrive as JSON with a `type` discriminant and a payload
//! object keyed by that same type name:
//!
//! ```json
//! { "id": "...", "type": "paragraph", "has_children": false,
//!   "paragraph": { "rich_text": [ { "plain_text": "hello" } ] } }
//! ```
//!
//! The payload stays raw JSON — Notion has dozens of block types and the
//! gateway only reads rich text and the to-do checked flag out of them.
//! Write-side blocks are built as plain JSON values ([`paragraph_block`]);
//! the gateway never round-trips a read block back into a write call.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::EnumString;

/// Maximum nesting depth the flattener will descend. Traversal code should
/// use this as a circuit breaker.
///
/// Real pages rarely exceed depth 10 (toggles inside columns inside toggles).
/// Depth 64 is generous; exceeding it likely indicates a malformed response.
pub const MAX_TREE_DEPTH: usize = 64;

/// What a block *is*, derived from Notion's `type` discriminant.
///
/// Only the kinds the flattener renders get their own variant. Everything
/// else maps to [`BlockKind::Other`], which renders no text but is still
/// traversed for children — content nested under toggles, columns, or
/// synced blocks must not disappear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BlockKind {
    /// Plain text, no marker.
    Paragraph,
    /// Top-level heading, rendered as `# `.
    #[serde(rename = "heading_1")]
    #[strum(serialize = "heading_1")]
    Heading1,
    /// Second-level heading, rendered as `## `.
    #[serde(rename = "heading_2")]
    #[strum(serialize = "heading_2")]
    Heading2,
    /// Third-level heading, rendered as `### `.
    #[serde(rename = "heading_3")]
    #[strum(serialize = "heading_3")]
    Heading3,
    /// Bullet list item, rendered as `- `.
    BulletedListItem,
    /// Numbered list item, rendered as a literal `1. ` — no renumbering.
    NumberedListItem,
    /// Checkbox item, rendered as `[x] ` or `[ ] ` per its checked flag.
    ToDo,
    /// Block quote, rendered as `> `.
    Quote,
    /// Callout box, rendered as `💬 `.
    Callout,
    /// Any kind the gateway does not render (toggle, table, embed, ...).
    #[default]
    Other,
}

impl BlockKind {
    /// Parse a Notion `type` string. Unknown kinds map to [`BlockKind::Other`]
    /// rather than failing — the service adds block types over time.
    pub fn parse(s: &str) -> Self {
        <Self as FromStr>::from_str(s).unwrap_or(Self::Other)
    }

    /// Parse from string (case-insensitive), rejecting unknown kinds.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to the Notion `type` string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading1 => "heading_1",
            BlockKind::Heading2 => "heading_2",
            BlockKind::Heading3 => "heading_3",
            BlockKind::BulletedListItem => "bulleted_list_item",
            BlockKind::NumberedListItem => "numbered_list_item",
            BlockKind::ToDo => "to_do",
            BlockKind::Quote => "quote",
            BlockKind::Callout => "callout",
            BlockKind::Other => "other",
        }
    }

    /// The marker the flattener prefixes to this kind's text.
    ///
    /// `checked` only matters for [`BlockKind::ToDo`]. [`BlockKind::Other`]
    /// renders no line at all, so its marker is never emitted.
    pub fn marker(&self, checked: bool) -> &'static str {
        match self {
            BlockKind::Paragraph | BlockKind::Other => "",
            BlockKind::Heading1 => "# ",
            BlockKind::Heading2 => "## ",
            BlockKind::Heading3 => "### ",
            BlockKind::BulletedListItem => "- ",
            BlockKind::NumberedListItem => "1. ",
            BlockKind::ToDo => {
                if checked {
                    "[x] "
                } else {
                    "[ ] "
                }
            }
            BlockKind::Quote => "> ",
            BlockKind::Callout => "💬 ",
        }
    }

    /// Check if this kind contributes a line to flattened output.
    pub fn is_rendered(&self) -> bool {
        !matches!(self, BlockKind::Other)
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One inline fragment of a block's rich text.
///
/// Read-side runs carry `plain_text` with all styling already resolved;
/// annotations, links, and mention payloads are ignored. Concatenating a
/// block's runs in order yields its visible text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextRun {
    #[serde(default)]
    pub plain_text: String,
}

/// Concatenate rich-text runs into the block's plain text.
pub fn flatten_runs(runs: &[RichTextRun]) -> String {
    runs.iter().map(|r| r.plain_text.as_str()).collect()
}

/// A node in a page's content tree, as returned by the blocks API.
///
/// `kind` keeps the raw `type` string (unknown kinds must survive), and the
/// type-keyed payload object lands in `payload` via `#[serde(flatten)]`.
/// [`Block::rich_text`] and [`Block::is_checked`] pull out the two pieces
/// the flattener reads.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

impl Block {
    /// The rich-text runs under this block's type-keyed payload, or empty
    /// when the payload carries none (dividers, tables, unknown kinds).
    pub fn rich_text(&self) -> Vec<RichTextRun> {
        self.payload
            .get(self.kind.as_str())
            .and_then(|data| data.get("rich_text"))
            .and_then(|runs| serde_json::from_value(runs.clone()).ok())
            .unwrap_or_default()
    }

    /// Visible text of this block: its runs concatenated in order.
    pub fn plain_text(&self) -> String {
        flatten_runs(&self.rich_text())
    }

    /// The to-do checked flag. `false` for anything that is not a to-do.
    pub fn is_checked(&self) -> bool {
        self.payload
            .get("to_do")
            .and_then(|data| data.get("checked"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Build a write-side text run: `{"type": "text", "text": {"content": ...}}`.
///
/// Write runs use the request shape (`text.content`), not the `plain_text`
/// field the read side returns.
pub fn text_run(content: &str) -> Value {
    json!({ "type": "text", "text": { "content": content } })
}

/// Build one paragraph block holding a single line of plain text.
///
/// Every appended line becomes a paragraph verbatim — markers like `# ` are
/// not reinterpreted on the way in.
pub fn paragraph_block(line: &str) -> Value {
    json!({
        "object": "block",
        "type": "paragraph",
        "paragraph": { "rich_text": [text_run(line)] },
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn block_json(kind: &str, runs: &[&str]) -> Value {
        let runs: Vec<Value> = runs.iter().map(|t| json!({ "plain_text": t })).collect();
        json!({
            "id": "blk-1",
            "type": kind,
            "has_children": false,
            kind: { "rich_text": runs },
        })
    }

    // ── BlockKind ───────────────────────────────────────────────────────

    #[test]
    fn test_block_kind_parsing() {
        assert_eq!(BlockKind::from_str("paragraph"), Some(BlockKind::Paragraph));
        assert_eq!(BlockKind::from_str("heading_1"), Some(BlockKind::Heading1));
        assert_eq!(BlockKind::from_str("heading_2"), Some(BlockKind::Heading2));
        assert_eq!(BlockKind::from_str("heading_3"), Some(BlockKind::Heading3));
        assert_eq!(
            BlockKind::from_str("bulleted_list_item"),
            Some(BlockKind::BulletedListItem)
        );
        assert_eq!(
            BlockKind::from_str("numbered_list_item"),
            Some(BlockKind::NumberedListItem)
        );
        assert_eq!(BlockKind::from_str("to_do"), Some(BlockKind::ToDo));
        assert_eq!(BlockKind::from_str("quote"), Some(BlockKind::Quote));
        assert_eq!(BlockKind::from_str("callout"), Some(BlockKind::Callout));
        assert_eq!(BlockKind::from_str("toggle"), None);
    }

    #[test]
    fn test_block_kind_parse_maps_unknown_to_other() {
        assert_eq!(BlockKind::parse("paragraph"), BlockKind::Paragraph);
        assert_eq!(BlockKind::parse("toggle"), BlockKind::Other);
        assert_eq!(BlockKind::parse("column_list"), BlockKind::Other);
        assert_eq!(BlockKind::parse(""), BlockKind::Other);
    }

    #[test]
    fn test_block_kind_as_str_roundtrip() {
        for kind in [
            BlockKind::Paragraph,
            BlockKind::Heading1,
            BlockKind::Heading2,
            BlockKind::Heading3,
            BlockKind::BulletedListItem,
            BlockKind::NumberedListItem,
            BlockKind::ToDo,
            BlockKind::Quote,
            BlockKind::Callout,
        ] {
            assert_eq!(BlockKind::parse(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_block_kind_serde_uses_notion_names() {
        let json = serde_json::to_string(&BlockKind::Heading1).unwrap();
        assert_eq!(json, "\"heading_1\"");
        let parsed: BlockKind = serde_json::from_str("\"bulleted_list_item\"").unwrap();
        assert_eq!(parsed, BlockKind::BulletedListItem);
    }

    // ── Markers ─────────────────────────────────────────────────────────

    #[test]
    fn test_markers() {
        assert_eq!(BlockKind::Paragraph.marker(false), "");
        assert_eq!(BlockKind::Heading1.marker(false), "# ");
        assert_eq!(BlockKind::Heading2.marker(false), "## ");
        assert_eq!(BlockKind::Heading3.marker(false), "### ");
        assert_eq!(BlockKind::BulletedListItem.marker(false), "- ");
        assert_eq!(BlockKind::NumberedListItem.marker(false), "1. ");
        assert_eq!(BlockKind::Quote.marker(false), "> ");
        assert_eq!(BlockKind::Callout.marker(false), "💬 ");
    }

    #[test]
    fn test_to_do_marker_tracks_checked_flag() {
        assert_eq!(BlockKind::ToDo.marker(true), "[x] ");
        assert_eq!(BlockKind::ToDo.marker(false), "[ ] ");
    }

    #[test]
    fn test_checked_flag_only_affects_to_do() {
        assert_eq!(BlockKind::Heading1.marker(true), "# ");
        assert_eq!(BlockKind::Paragraph.marker(true), "");
    }

    #[test]
    fn test_only_other_is_unrendered() {
        assert!(!BlockKind::Other.is_rendered());
        assert!(BlockKind::Paragraph.is_rendered());
        assert!(BlockKind::Callout.is_rendered());
    }

    // ── RichTextRun ─────────────────────────────────────────────────────

    #[test]
    fn test_flatten_runs_concatenates_in_order() {
        let runs = vec![
            RichTextRun {
                plain_text: "Hello ".into(),
            },
            RichTextRun {
                plain_text: "world".into(),
            },
        ];
        assert_eq!(flatten_runs(&runs), "Hello world");
    }

    #[test]
    fn test_flatten_runs_empty() {
        assert_eq!(flatten_runs(&[]), "");
    }

    // ── Block ───────────────────────────────────────────────────────────

    #[test]
    fn test_block_deserialize_and_plain_text() {
        let block: Block = serde_json::from_value(block_json("paragraph", &["a", "b"])).unwrap();
        assert_eq!(block.id, "blk-1");
        assert_eq!(block.kind, "paragraph");
        assert!(!block.has_children);
        assert_eq!(block.plain_text(), "ab");
    }

    #[test]
    fn test_block_has_children_defaults_false() {
        let block: Block = serde_json::from_value(json!({
            "id": "blk-2",
            "type": "divider",
            "divider": {},
        }))
        .unwrap();
        assert!(!block.has_children);
        assert_eq!(block.plain_text(), "");
    }

    #[test]
    fn test_block_unknown_kind_keeps_payload() {
        let block: Block = serde_json::from_value(block_json("toggle", &["hidden"])).unwrap();
        assert_eq!(BlockKind::parse(&block.kind), BlockKind::Other);
        // The raw payload survives even though the kind is unrendered.
        assert!(block.payload.contains_key("toggle"));
        assert_eq!(block.plain_text(), "hidden");
    }

    #[test]
    fn test_block_is_checked() {
        let mut value = block_json("to_do", &["buy milk"]);
        value["to_do"]["checked"] = json!(true);
        let block: Block = serde_json::from_value(value).unwrap();
        assert!(block.is_checked());

        let unchecked: Block = serde_json::from_value(block_json("to_do", &["later"])).unwrap();
        assert!(!unchecked.is_checked());
    }

    #[test]
    fn test_is_checked_false_for_non_todo() {
        let block: Block = serde_json::from_value(block_json("paragraph", &["text"])).unwrap();
        assert!(!block.is_checked());
    }

    // ── Write-side builders ─────────────────────────────────────────────

    #[test]
    fn test_text_run_shape() {
        let run = text_run("hello");
        assert_eq!(run["type"], "text");
        assert_eq!(run["text"]["content"], "hello");
    }

    #[test]
    fn test_paragraph_block_shape() {
        let block = paragraph_block("one line");
        assert_eq!(block["object"], "block");
        assert_eq!(block["type"], "paragraph");
        assert_eq!(block["paragraph"]["rich_text"][0]["text"]["content"], "one line");
    }

    // ── MAX_TREE_DEPTH ──────────────────────────────────────────────────

    #[test]
    fn test_max_tree_depth_is_64() {
        assert_eq!(MAX_TREE_DEPTH, 64);
    }
}
