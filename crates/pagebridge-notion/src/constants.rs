//! Notion client constants.
//!
//! Centralizes hardcoded values for easier configuration and documentation.

use std::time::Duration;

/// Default Notion REST API base URL. Overridable per client for tests and
/// staging via [`crate::NotionHttpClient::with_base_url`].
pub const NOTION_BASE_URL: &str = "https://api.notion.com/v1";

/// API version pin sent with every request as the `Notion-Version` header.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Page size requested for block-children listings (the service maximum).
pub const BLOCK_PAGE_SIZE: u32 = 100;

/// Result cap for title searches. Only the first page is fetched — a query
/// matching more than this many pages is too ambiguous to act on anyway.
pub const SEARCH_PAGE_SIZE: u32 = 10;

/// Per-request timeout for upstream calls. Notion can be slow on large
/// pages; 30 seconds is generous without letting requests hang forever.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
