//! The list envelope Notion wraps paginated results in.

use serde::{Deserialize, Serialize};

/// One page of a paginated list response.
///
/// `has_more` drives cursor walks; a response claiming more results but
/// carrying no cursor ends the walk rather than looping forever.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> Paginated<T> {
    /// A single, complete page — nothing left to fetch.
    pub fn complete(results: Vec<T>) -> Self {
        Self {
            results,
            has_more: false,
            next_cursor: None,
        }
    }
}
