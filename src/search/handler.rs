//! HTTP handler for the query engine
//!
//! - POST /api/v1/search: `{ "query", "date"?, "chatIds"? }`

use crate::engine::DigestEngine;
use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Shared state for search handlers
#[derive(Clone)]
pub struct SearchState {
    pub engine: Arc<DigestEngine>,
}

/// Create the search router
pub fn search_router(state: SearchState) -> Router {
    Router::new()
        .route("/api/v1/search", post(search))
        .with_state(state)
}

/// Search request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Restrict the search to these chats
    #[serde(default)]
    pub chat_ids: Option<Vec<String>>,
}

/// POST /api/v1/search
async fn search(
    State(state): State<SearchState>,
    Json(request): Json<SearchRequest>,
) -> impl IntoResponse {
    let result = state.engine.search_in_chats(
        &request.query,
        request.date,
        request.chat_ids.as_deref(),
    );
    Json(result)
}
