//! HTTP handlers for the digest API
//!
//! - GET /api/v1/chats: chats with their activity for a day
//! - GET /api/v1/chats/:id/summary: summary of one chat
//! - GET /api/v1/chats/:id/messages: one chat's messages, optionally capped by `limit`
//! - GET /api/v1/digest: narrative, summaries and highlights
//! - GET /api/v1/highlights: categorized highlights
//!
//! Every endpoint takes an optional `date` (`YYYY-MM-DD`); without one the
//! local "today" is used.

use crate::api::ApiError;
use crate::corpus::ChatFilter;
use crate::digest::types::HighlightType;
use crate::engine::DigestEngine;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Shared state for digest handlers
#[derive(Clone)]
pub struct DigestState {
    pub engine: Arc<DigestEngine>,
}

/// Create the digest router
pub fn digest_router(state: DigestState) -> Router {
    Router::new()
        .route("/api/v1/chats", get(list_chats))
        .route("/api/v1/chats/:id/summary", get(get_summary))
        .route("/api/v1/chats/:id/messages", get(list_messages))
        .route("/api/v1/digest", get(get_digest))
        .route("/api/v1/highlights", get(list_highlights))
        .with_state(state)
}

// =============================================================================
// Query parameter types
// =============================================================================

#[derive(Debug, Deserialize)]
struct DateQuery {
    date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct ChatsQuery {
    date: Option<NaiveDate>,
    filter: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagesQuery {
    date: Option<NaiveDate>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct HighlightsQuery {
    date: Option<NaiveDate>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/chats
async fn list_chats(
    State(state): State<DigestState>,
    Query(params): Query<ChatsQuery>,
) -> Response {
    let filter = match params.filter.as_deref().map(str::parse::<ChatFilter>) {
        None => ChatFilter::All,
        Some(Ok(filter)) => filter,
        Some(Err(e)) => return bad_request(e),
    };

    Json(state.engine.chat_activity(params.date, filter)).into_response()
}

/// GET /api/v1/chats/:id/summary
async fn get_summary(
    State(state): State<DigestState>,
    Path(id): Path<String>,
    Query(params): Query<DateQuery>,
) -> Response {
    if state.engine.store().chat_by_id(&id).is_none() {
        return chat_not_found(&id);
    }

    Json(state.engine.summarize_chat(&id, params.date)).into_response()
}

/// GET /api/v1/chats/:id/messages
async fn list_messages(
    State(state): State<DigestState>,
    Path(id): Path<String>,
    Query(params): Query<MessagesQuery>,
) -> Response {
    if state.engine.store().chat_by_id(&id).is_none() {
        return chat_not_found(&id);
    }

    Json(state.engine.chat_messages(&id, params.date, params.limit)).into_response()
}

/// GET /api/v1/digest
async fn get_digest(
    State(state): State<DigestState>,
    Query(params): Query<DateQuery>,
) -> impl IntoResponse {
    Json(state.engine.daily_digest_report(params.date))
}

/// GET /api/v1/highlights
async fn list_highlights(
    State(state): State<DigestState>,
    Query(params): Query<HighlightsQuery>,
) -> Response {
    let kind = match params.kind.as_deref().map(str::parse::<HighlightType>) {
        None => None,
        Some(Ok(kind)) => Some(kind),
        Some(Err(e)) => return bad_request(e),
    };

    let mut highlights = state.engine.extract_highlights(params.date);
    if let Some(kind) = kind {
        highlights.retain(|h| h.kind == kind);
    }
    Json(highlights).into_response()
}

fn chat_not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::not_found(format!("Chat {} not found", id))),
    )
        .into_response()
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ApiError::bad_request(message))).into_response()
}
