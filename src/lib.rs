//! chatdigest - Daily digests for a multi-chat messaging client
//!
//! Turns one day of messages across many chats into something readable at
//! a glance: a summary per chat, a narrative digest of the whole day,
//! categorized highlights, and keyword search with attributed sources.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  HTTP API (axum) / CLI                       │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────▼───────────────────────────────┐
//! │                        DigestEngine                          │
//! │  ┌────────────┐ ┌─────────────────┐ ┌───────────┐ ┌────────┐ │
//! │  │ Summarizer │ │ DigestGenerator │ │ Highlights│ │ Query  │ │
//! │  └─────┬──────┘ └────────┬────────┘ └─────┬─────┘ └───┬────┘ │
//! └────────┼─────────────────┼────────────────┼───────────┼──────┘
//!          └─────────────────┴───────┬────────┴───────────┘
//!                            ┌───────▼───────┐
//!                            │ MessageStore  │
//!                            └───────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`corpus`]: Chats, messages and the read-only store
//! - [`digest`]: Summaries, daily digest and highlights
//! - [`search`]: Keyword query engine
//! - [`engine`]: Facade shared by the API and the CLI
//! - [`api`]: HTTP router
//! - [`config`]: Configuration management

pub mod api;
pub mod config;
pub mod corpus;
pub mod digest;
pub mod engine;
pub mod error;
pub mod search;

pub use config::DigestConfig;
pub use engine::DigestEngine;
pub use error::{Error, Result};
