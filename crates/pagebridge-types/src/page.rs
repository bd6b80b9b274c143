//! Pages, title derivation, and search candidates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::{RichTextRun, flatten_runs};

/// A Notion page object, as returned by search and page creation.
///
/// `properties` stays raw JSON because property keys are user-defined — the
/// title lives under whichever property object carries `"type": "title"`,
/// not under a fixed key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
}

impl Page {
    /// Derive the page title: find the title-type property and flatten its
    /// rich-text runs. Empty when the page has no title property or the
    /// integration cannot see it.
    pub fn title(&self) -> String {
        self.properties
            .values()
            .find(|prop| prop.get("type").and_then(Value::as_str) == Some("title"))
            .and_then(|prop| prop.get("title"))
            .and_then(|runs| serde_json::from_value::<Vec<RichTextRun>>(runs.clone()).ok())
            .map(|runs| flatten_runs(&runs))
            .unwrap_or_default()
    }

    /// Reduce to the candidate triple handed back to callers.
    pub fn candidate(&self) -> PageCandidate {
        PageCandidate {
            id: self.id.clone(),
            url: self.url.clone(),
            title: self.title(),
        }
    }
}

/// One search result considered as a possible match for a title query.
///
/// Derived fresh from a search response on every request — candidates are
/// never cached across requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCandidate {
    pub id: String,
    pub url: String,
    pub title: String,
}

/// Identity of a newly created page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPage {
    pub id: String,
    pub url: String,
}

// ============================================================================
// Tests
// ============================================================================
