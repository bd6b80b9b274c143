//! reqwest-backed implementation of [`NotionApi`].

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use pagebridge_types::{Block, CreatedPage, Page, Paginated, text_run};

use crate::constants::{
    BLOCK_PAGE_SIZE, NOTION_BASE_URL, NOTION_VERSION, REQUEST_TIMEOUT, SEARCH_PAGE_SIZE,
};
use crate::{NotionApi, NotionError};

/// Bearer-token HTTP client for the Notion REST API.
///
/// Configured once at startup and shared across requests; holds no mutable
/// state. Authorization and the API version pin ride as default headers on
/// every call.
pub struct NotionHttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Build a client against the production base URL.
    pub fn new(token: &str) -> Result<Self, NotionError> {
        Self::with_base_url(token, NOTION_BASE_URL)
    }

    /// Build a client against a custom base URL (no trailing slash).
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self, NotionError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| NotionError::Config(format!("bearer token: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert("notion-version", HeaderValue::from_static(NOTION_VERSION));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl NotionApi for NotionHttpClient {
    async fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<Block>, NotionError> {
        let mut request = self
            .http
            .get(format!("{}/blocks/{block_id}/children", self.base_url))
            .query(&[("page_size", BLOCK_PAGE_SIZE)]);
        if let Some(cursor) = cursor {
            request = request.query(&[("start_cursor", cursor)]);
        }
        debug!(block_id, cursor, "listing block children");
        read_json(request.send().await?).await
    }

    async fn search_pages(&self, query: &str) -> Result<Paginated<Page>, NotionError> {
        let body = json!({
            "query": query,
            "page_size": SEARCH_PAGE_SIZE,
            "filter": { "property": "object", "value": "page" },
        });
        debug!(query, "searching pages");
        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .json(&body)
            .send()
            .await?;
        read_json(response).await
    }

    async fn append_children(
        &self,
        block_id: &str,
        children: Vec<Value>,
    ) -> Result<(), NotionError> {
        let count = children.len();
        let body = json!({ "children": children });
        debug!(block_id, count, "appending children");
        let response = self
            .http
            .patch(format!("{}/blocks/{block_id}/children", self.base_url))
            .json(&body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn archive_block(&self, block_id: &str) -> Result<(), NotionError> {
        let response = self
            .http
            .patch(format!("{}/blocks/{block_id}", self.base_url))
            .json(&json!({ "archived": true }))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn create_page(
        &self,
        parent_page_id: &str,
        title: &str,
        children: Vec<Value>,
    ) -> Result<CreatedPage, NotionError> {
        let body = json!({
            "parent": { "type": "page_id", "page_id": parent_page_id },
            "properties": { "title": { "title": [text_run(title)] } },
            "children": children,
        });
        debug!(parent_page_id, title, "creating page");
        let response = self
            .http
            .post(format!("{}/pages", self.base_url))
            .json(&body)
            .send()
            .await?;
        let page: Page = read_json(response).await?;
        Ok(CreatedPage {
            id: page.id,
            url: page.url,
        })
    }
}

/// Shape of Notion's error body. Only the message is surfaced.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Reject non-success responses, turning them into [`NotionError::Api`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, NotionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(NotionError::api(
        status.as_u16(),
        error_message(status.as_u16(), &body),
    ))
}

/// Extract the `message` field from an error body, falling back to the raw
/// text, then to the bare status when the body is empty.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.message.is_empty() {
            return parsed.message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("Notion returned status {status}")
    } else {
        trimmed.to_string()
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, NotionError> {
    let response = check_status(response).await?;
    Ok(response.json::<T>().await?)
}

// ============================================================================
// Tests
// ============================================================================
