//! HTTP surface: route table and the seven handlers.
//!
//! Handlers validate, delegate to `ops`, and shape responses. Success and
//! failure bodies both carry `ok`, so callers can branch without inspecting
//! status codes; ambiguous title resolution in particular is a 200 with
//! `ok: false` and candidates, not an HTTP error.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use pagebridge_types::PageCandidate;

use crate::auth;
use crate::constants::MAX_BODY_BYTES;
use crate::error::ApiError;
use crate::models::{
    AmbiguousResponse, AppendByTitleRequest, AppendByTitleResponse, CreatePageRequest,
    CreatePageResponse, FindPageQuery, FindPageResponse, HealthResponse, ReadPageQuery,
    ReadPageResponse, ReplaceByTitleRequest, ReplaceByTitleResponse, UpdatePageRequest,
    UpdatePageResponse,
};
use crate::ops::resolver::{self, Selection};
use crate::ops::{reader, writer};
use crate::state::AppState;

/// Notice attached to append responses when the page was selected as the
/// sole non-exact candidate.
const FALLBACK_WARNING: &str = "Not exact match, first candidate selected.";

/// Build the application router with auth, body-limit, CORS, and trace
/// layers applied. CORS sits outside auth so preflight requests succeed
/// without a key.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/find_page", get(find_page))
        .route("/read_page", get(read_page))
        .route("/update_page", post(update_page))
        .route("/create_page", post(create_page))
        .route("/append_by_title", post(append_by_title))
        .route("/replace_by_title", post(replace_by_title))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

async fn find_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FindPageQuery>,
) -> Result<Json<FindPageResponse>, ApiError> {
    let title = require_param(query.title, "title required")?;
    let results = resolver::find_pages_by_title(state.notion.as_ref(), &title).await?;
    Ok(Json(FindPageResponse {
        ok: true,
        query: title,
        results,
    }))
}

async fn read_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReadPageQuery>,
) -> Result<Json<ReadPageResponse>, ApiError> {
    let page_id = require_param(query.page_id, "page_id required")?;
    let text = reader::flatten_page(state.notion.as_ref(), &page_id).await?;
    Ok(Json(ReadPageResponse { ok: true, text }))
}

async fn update_page(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<UpdatePageResponse>, ApiError> {
    let request = UpdatePageRequest::parse(&parse_json(&body)?)?;
    let appended =
        writer::append_text(state.notion.as_ref(), &request.page_id, &request.content).await?;
    Ok(Json(UpdatePageResponse { ok: true, appended }))
}

async fn create_page(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CreatePageResponse>, ApiError> {
    let request = CreatePageRequest::parse(&parse_json(&body)?)?;
    let created = writer::create_page_with_text(
        state.notion.as_ref(),
        &request.parent_page_id,
        &request.title,
        &request.content,
    )
    .await?;
    info!(page_id = %created.id, title = %request.title, "created page");
    Ok(Json(CreatePageResponse {
        ok: true,
        page_id: created.id,
        url: created.url,
    }))
}

async fn append_by_title(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request = AppendByTitleRequest::parse(&parse_json(&body)?)?;
    let candidates = resolver::find_pages_by_title(state.notion.as_ref(), &request.title).await?;
    let (picked, warning) = match resolver::pick_candidate(&request.title, &candidates) {
        Selection::Exact(picked) => (picked, None),
        Selection::Fallback(picked) => (picked, Some(FALLBACK_WARNING.to_string())),
        Selection::NoMatch => {
            return Ok(ambiguous(
                "Multiple matches. Please specify the exact page title.",
                candidates,
            ));
        }
    };
    let appended = writer::append_text(state.notion.as_ref(), &picked.id, &request.content).await?;
    info!(page_id = %picked.id, appended, "appended by title");
    Ok(Json(AppendByTitleResponse {
        ok: true,
        appended,
        page_id: picked.id,
        page_title: picked.title,
        page_url: picked.url,
        warning,
    })
    .into_response())
}

async fn replace_by_title(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request = ReplaceByTitleRequest::parse(&parse_json(&body)?)?;
    if !request.confirm {
        return Err(ApiError::bad_request(
            "This will clear existing content. Set confirm=true to proceed.",
        ));
    }
    let candidates = resolver::find_pages_by_title(state.notion.as_ref(), &request.title).await?;
    let picked = match resolver::pick_candidate(&request.title, &candidates) {
        Selection::Exact(picked) | Selection::Fallback(picked) => picked,
        Selection::NoMatch => {
            return Ok(ambiguous(
                "Multiple matches. Please specify the exact page title before replacing.",
                candidates,
            ));
        }
    };
    let cleared_blocks = writer::clear_top_level(state.notion.as_ref(), &picked.id).await?;
    let appended = writer::append_text(state.notion.as_ref(), &picked.id, &request.content).await?;
    info!(page_id = %picked.id, cleared_blocks, appended, "replaced by title");
    Ok(Json(ReplaceByTitleResponse {
        ok: true,
        cleared_blocks,
        appended,
        page_id: picked.id,
        page_title: picked.title,
        page_url: picked.url,
    })
    .into_response())
}

/// Parse a raw JSON body, rejecting malformed input with the gateway's own
/// message rather than a framework rejection.
fn parse_json(body: &Bytes) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::bad_request("Invalid JSON body"))
}

/// A required query parameter: present and non-empty.
fn require_param(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}

/// 200 with `ok: false` and the candidate list.
fn ambiguous(error: &str, candidates: Vec<PageCandidate>) -> Response {
    Json(AmbiguousResponse {
        ok: false,
        error: error.to_string(),
        candidates,
    })
    .into_response()
}
