//! Digest subsystem
//!
//! Per-chat summaries, the cross-chat daily narrative and categorized
//! highlights, all derived on request from the message store.

pub mod generator;
pub mod handler;
pub mod highlights;
pub mod summarizer;
pub mod types;

pub use generator::{DigestGenerator, PARAGRAPH_BREAK};
pub use handler::{digest_router, DigestState};
pub use highlights::HighlightExtractor;
pub use summarizer::Summarizer;
pub use types::{
    ChatSummary, CuratedSummary, DailyDigest, Highlight, HighlightType, SummaryCatalog,
};
