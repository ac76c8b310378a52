//! Unified API router for chatdigest
//!
//! Merges the module routers into a single axum `Router` with CORS and
//! request tracing.
//!
//! ## Endpoint Map
//!
//! | Route                          | Module | Description                     |
//! |--------------------------------|--------|---------------------------------|
//! | `GET /health`                  | api    | Health probe                    |
//! | `GET /api/v1/chats`            | digest | Chats with activity for a day   |
//! | `GET /api/v1/chats/:id/summary`| digest | Per-chat summary                |
//! | `GET /api/v1/chats/:id/messages`| digest | One chat's messages for a day  |
//! | `GET /api/v1/digest`           | digest | Daily digest report             |
//! | `GET /api/v1/highlights`       | digest | Categorized highlights          |
//! | `POST /api/v1/search`          | search | Free-text query                 |

use crate::digest::{digest_router, DigestState};
use crate::engine::DigestEngine;
use crate::search::{search_router, SearchState};
use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete HTTP application around a shared engine
pub fn build_app(engine: Arc<DigestEngine>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(digest_router(DigestState {
            engine: engine.clone(),
        }))
        .merge(search_router(SearchState { engine }))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(cors_origins))
}

// =============================================================================
// Error body
// =============================================================================

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

/// API error detail
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code("NOT_FOUND", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code("BAD_REQUEST", message)
    }

    fn with_code(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}

// =============================================================================
// Root handlers
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// CORS
// =============================================================================

/// An empty list or a `*` entry allows any origin
fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DigestConfig;
    use crate::corpus::fixture;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use tower::ServiceExt;

    fn make_app() -> Router {
        let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let engine = DigestEngine::new(
            Arc::new(fixture::sample_store(day)),
            fixture::sample_catalog(),
            &DigestConfig::default(),
        )
        .unwrap();
        build_app(Arc::new(engine), &["http://localhost:5173".to_string()])
    }

    #[tokio::test]
    async fn test_health_check() {
        let resp = health_check().await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_app_serves_all_modules() {
        let app = make_app();
        for uri in [
            "/health",
            "/api/v1/chats?date=2026-10-18",
            "/api/v1/chats/2/summary?date=2026-10-18",
            "/api/v1/chats/2/messages?date=2026-10-18&limit=5",
            "/api/v1/digest?date=2026-10-18",
            "/api/v1/highlights?date=2026-10-18",
        ] {
            let resp = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
        }

        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/search")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":"coffee","date":"2026-10-18"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let resp = make_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/nothing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_build_cors_variants() {
        let _any = build_cors(&[]);
        let _star = build_cors(&["*".to_string()]);
        let _listed = build_cors(&[
            "http://localhost:5173".to_string(),
            "http://localhost:3000".to_string(),
        ]);
    }

    #[test]
    fn test_api_error_shape() {
        let json = serde_json::to_value(ApiError::not_found("Chat 9 not found")).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Chat 9 not found");
    }
}
