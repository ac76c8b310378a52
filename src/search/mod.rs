//! Query engine for free-text questions over one day of messages
//!
//! Returns a best-effort answer plus the matching messages grouped by chat.

pub mod engine;
pub mod handler;
pub mod types;

pub use engine::{QueryEngine, FALLBACK_ANSWER, MAX_SOURCE_MESSAGES};
pub use handler::{search_router, SearchState};
pub use types::{AnswerRule, SearchResult, Source};
