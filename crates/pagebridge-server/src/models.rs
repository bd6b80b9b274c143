//! Request and response bodies for the HTTP surface.
//!
//! POST bodies are parsed from a raw JSON value rather than through an
//! extractor, so missing and wrong-typed fields produce this gateway's own
//! field-naming messages instead of framework rejections. The rules mirror
//! what callers already rely on: a required id or title must be a non-empty
//! string, while `content` may be any string, including empty.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use pagebridge_types::PageCandidate;

use crate::error::ApiError;

// ── Query parameters ────────────────────────────────────────────────────

/// `GET /find_page?title=...`
#[derive(Debug, Default, Deserialize)]
pub struct FindPageQuery {
    #[serde(default)]
    pub title: Option<String>,
}

/// `GET /read_page?page_id=...`
#[derive(Debug, Default, Deserialize)]
pub struct ReadPageQuery {
    #[serde(default)]
    pub page_id: Option<String>,
}

// ── Request bodies ──────────────────────────────────────────────────────

/// `POST /update_page`
#[derive(Debug)]
pub struct UpdatePageRequest {
    pub page_id: String,
    pub content: String,
}

impl UpdatePageRequest {
    pub fn parse(body: &Value) -> Result<Self, ApiError> {
        match (non_empty_str(body, "page_id"), string_field(body, "content")) {
            (Some(page_id), Some(content)) => Ok(Self { page_id, content }),
            _ => Err(ApiError::bad_request("page_id and content required")),
        }
    }
}

/// `POST /create_page`
#[derive(Debug)]
pub struct CreatePageRequest {
    pub parent_page_id: String,
    pub title: String,
    pub content: String,
}

impl CreatePageRequest {
    pub fn parse(body: &Value) -> Result<Self, ApiError> {
        match (
            non_empty_str(body, "parent_page_id"),
            non_empty_str(body, "title"),
            string_field(body, "content"),
        ) {
            (Some(parent_page_id), Some(title), Some(content)) => Ok(Self {
                parent_page_id,
                title,
                content,
            }),
            _ => Err(ApiError::bad_request("parent_page_id, title, content required")),
        }
    }
}

/// `POST /append_by_title`
#[derive(Debug)]
pub struct AppendByTitleRequest {
    pub title: String,
    pub content: String,
}

impl AppendByTitleRequest {
    pub fn parse(body: &Value) -> Result<Self, ApiError> {
        match (non_empty_str(body, "title"), string_field(body, "content")) {
            (Some(title), Some(content)) => Ok(Self { title, content }),
            _ => Err(ApiError::bad_request("title and content required")),
        }
    }
}

/// `POST /replace_by_title`
///
/// `confirm` must be the JSON literal `true` — the string `"true"`, `1`, or
/// anything else truthy does not count. Field validation happens before the
/// confirm check, so a request missing `title` reports the missing field.
#[derive(Debug)]
pub struct ReplaceByTitleRequest {
    pub title: String,
    pub content: String,
    pub confirm: bool,
}

impl ReplaceByTitleRequest {
    pub fn parse(body: &Value) -> Result<Self, ApiError> {
        match (non_empty_str(body, "title"), string_field(body, "content")) {
            (Some(title), Some(content)) => Ok(Self {
                title,
                content,
                confirm: body.get("confirm").and_then(Value::as_bool).unwrap_or(false),
            }),
            _ => Err(ApiError::bad_request("title and content required")),
        }
    }
}

/// A field that must be a non-empty string. Missing, wrong-typed, and empty
/// all fail the same way.
fn non_empty_str(body: &Value, key: &str) -> Option<String> {
    body.get(key)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A field that must be a string of any length.
fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)?.as_str().map(str::to_string)
}

// ── Response bodies ─────────────────────────────────────────────────────

/// `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// `GET /find_page`
#[derive(Debug, Serialize)]
pub struct FindPageResponse {
    pub ok: bool,
    pub query: String,
    pub results: Vec<PageCandidate>,
}

/// `GET /read_page`
#[derive(Debug, Serialize)]
pub struct ReadPageResponse {
    pub ok: bool,
    pub text: String,
}

/// `POST /update_page`
#[derive(Debug, Serialize)]
pub struct UpdatePageResponse {
    pub ok: bool,
    pub appended: usize,
}

/// `POST /create_page`
#[derive(Debug, Serialize)]
pub struct CreatePageResponse {
    pub ok: bool,
    pub page_id: String,
    pub url: String,
}

/// `POST /append_by_title` success.
///
/// `warning` is always present: `null` normally, a notice when the page was
/// selected as the sole non-exact candidate.
#[derive(Debug, Serialize)]
pub struct AppendByTitleResponse {
    pub ok: bool,
    pub appended: usize,
    pub page_id: String,
    pub page_title: String,
    pub page_url: String,
    pub warning: Option<String>,
}

/// `POST /replace_by_title` success.
#[derive(Debug, Serialize)]
pub struct ReplaceByTitleResponse {
    pub ok: bool,
    pub cleared_blocks: usize,
    pub appended: usize,
    pub page_id: String,
    pub page_title: String,
    pub page_url: String,
}

/// Ambiguous title resolution: an expected outcome, not an HTTP error.
/// Rendered as a 200 carrying the full candidate list for the caller to
/// disambiguate.
#[derive(Debug, Serialize)]
pub struct AmbiguousResponse {
    pub ok: bool,
    pub error: String,
    pub candidates: Vec<PageCandidate>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bad_request_message(err: ApiError) -> String {
        match err {
            ApiError::BadRequest(message) => message,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    // ── update_page ─────────────────────────────────────────────────────

    #[test]
    fn test_update_page_parses() {
        let req =
            UpdatePageRequest::parse(&json!({ "page_id": "abc", "content": "a\nb" })).unwrap();
        assert_eq!(req.page_id, "abc");
        assert_eq!(req.content, "a\nb");
    }

    #[test]
    fn test_update_page_rejects_missing_or_empty_page_id() {
        for body in [
            json!({ "content": "x" }),
            json!({ "page_id": "", "content": "x" }),
            json!({ "page_id": 42, "content": "x" }),
        ] {
            let err = UpdatePageRequest::parse(&body).unwrap_err();
            assert_eq!(bad_request_message(err), "page_id and content required");
        }
    }

    #[test]
    fn test_update_page_content_must_be_string_but_may_be_empty() {
        assert!(UpdatePageRequest::parse(&json!({ "page_id": "a", "content": 5 })).is_err());
        assert!(UpdatePageRequest::parse(&json!({ "page_id": "a" })).is_err());
        let req = UpdatePageRequest::parse(&json!({ "page_id": "a", "content": "" })).unwrap();
        assert_eq!(req.content, "");
    }

    // ── create_page ─────────────────────────────────────────────────────

    #[test]
    fn test_create_page_requires_all_three_fields() {
        let err = CreatePageRequest::parse(&json!({ "title": "T", "content": "c" })).unwrap_err();
        assert_eq!(
            bad_request_message(err),
            "parent_page_id, title, content required"
        );
        let req = CreatePageRequest::parse(&json!({
            "parent_page_id": "p",
            "title": "T",
            "content": "c",
        }))
        .unwrap();
        assert_eq!(req.parent_page_id, "p");
    }

    // ── append_by_title ─────────────────────────────────────────────────

    #[test]
    fn test_append_by_title_requires_title_and_content() {
        let err = AppendByTitleRequest::parse(&json!({ "title": "Notes" })).unwrap_err();
        assert_eq!(bad_request_message(err), "title and content required");
        let err = AppendByTitleRequest::parse(&json!({ "content": "x" })).unwrap_err();
        assert_eq!(bad_request_message(err), "title and content required");
    }

    // ── replace_by_title ────────────────────────────────────────────────

    #[test]
    fn test_replace_confirm_accepts_only_json_true() {
        let base = |confirm: Value| {
            let mut body = json!({ "title": "Notes", "content": "x" });
            body["confirm"] = confirm;
            ReplaceByTitleRequest::parse(&body).unwrap()
        };
        assert!(base(json!(true)).confirm);
        assert!(!base(json!(false)).confirm);
        assert!(!base(json!("true")).confirm);
        assert!(!base(json!(1)).confirm);
        let absent = ReplaceByTitleRequest::parse(&json!({ "title": "N", "content": "" })).unwrap();
        assert!(!absent.confirm);
    }

    #[test]
    fn test_replace_field_validation_precedes_confirm() {
        // A request missing title reports the missing field, not the
        // confirmation notice.
        let err =
            ReplaceByTitleRequest::parse(&json!({ "content": "x", "confirm": false })).unwrap_err();
        assert_eq!(bad_request_message(err), "title and content required");
    }

    // ── Response serialization ──────────────────────────────────────────

    #[test]
    fn test_append_response_keeps_null_warning() {
        let response = AppendByTitleResponse {
            ok: true,
            appended: 2,
            page_id: "p".into(),
            page_title: "T".into(),
            page_url: "u".into(),
            warning: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        // The key must be present and explicitly null.
        assert!(json.as_object().unwrap().contains_key("warning"));
        assert!(json["warning"].is_null());
    }
}
