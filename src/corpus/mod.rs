//! Message store: the read-only corpus every digest operation works over
//!
//! Chats and messages come from a provider (a JSON fixture or the built-in
//! sample) and are queried by calendar day.

pub mod fixture;
pub mod store;
pub mod types;

pub use store::{CorpusFile, MessageStore};
pub use types::{Chat, ChatActivity, ChatFilter, Message};
