//! Shared Notion wire model for pagebridge.
//!
//! This crate is the vocabulary both sides of the gateway speak: blocks and
//! their line markers, pages and title derivation, and the pagination
//! envelope. It has **no internal pagebridge dependencies** — a pure leaf
//! crate that the client and server build on.
//!
//! # Key Types
//!
//! |-------------------|----------------------------------------------|
//! | Type              | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | [`Block`]         | One node of a page's content tree            |
//! | [`BlockKind`]     | Typed `type` discriminant + line marker      |
//! | [`RichTextRun`]   | Inline text fragment (`plain_text`)          |
//! | [`Page`]          | Search/creation result with raw properties   |
//! | [`PageCandidate`] | `{id, url, title}` triple for callers        |
//! | [`CreatedPage`]   | Identity of a freshly created page           |
//! | [`Paginated`]     | `results / has_more / next_cursor` envelope  |
//! |-------------------|----------------------------------------------|

pub mod block;
pub mod page;
pub mod pagination;

// Re-export primary types at crate root for convenience.
pub use block::{
    Block, BlockKind, MAX_TREE_DEPTH, RichTextRun, flatten_runs, paragraph_block, text_run,
};
pub use page::{CreatedPage, Page, PageCandidate};
pub use pagination::Paginated;
