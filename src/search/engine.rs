//! Keyword query engine
//!
//! Matching is plain case-insensitive substring search: a message matches
//! when its text contains the whole query or any whitespace-separated token
//! of it. Matches are grouped per chat in first-seen order and the answer
//! text comes from the first answer rule whose trigger occurs in the query.

use super::types::{AnswerRule, SearchResult, Source};
use crate::corpus::{Message, MessageStore};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Maximum messages attached to a single source
pub const MAX_SOURCE_MESSAGES: usize = 3;

/// Answer used when no rule matches
pub const FALLBACK_ANSWER: &str = "I found some relevant messages across your chats.";

/// Chat name used for sources whose chat is not in the store
const UNKNOWN_CHAT: &str = "Unknown";

/// Rule-chain query engine
pub struct QueryEngine {
    rules: Vec<AnswerRule>,
    fallback: String,
}

impl QueryEngine {
    /// Create an engine with answer rules in priority order
    pub fn new(rules: Vec<AnswerRule>, fallback: impl Into<String>) -> Result<Self> {
        let fallback = fallback.into();
        if fallback.trim().is_empty() {
            return Err(Error::Search("fallback answer must not be empty".to_string()));
        }
        if let Some(i) = rules.iter().position(|r| r.answer.trim().is_empty()) {
            return Err(Error::Search(format!("answer rule {} has no answer", i)));
        }
        Ok(Self { rules, fallback })
    }

    /// Search every chat on `date`
    pub fn search(&self, store: &MessageStore, query: &str, date: NaiveDate) -> SearchResult {
        self.search_in_chats(store, query, date, None)
    }

    /// Search on `date`, optionally restricted to the given chats
    pub fn search_in_chats(
        &self,
        store: &MessageStore,
        query: &str,
        date: NaiveDate,
        chat_ids: Option<&[String]>,
    ) -> SearchResult {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return SearchResult {
                answer: self.fallback.clone(),
                sources: Vec::new(),
            };
        }

        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        let matched = store.messages_on_date(date).into_iter().filter(|m| {
            chat_ids.map_or(true, |ids| ids.iter().any(|id| *id == m.chat_id))
                && matches_query(&m.text, &normalized, &tokens)
        });

        let sources = group_by_chat(store, matched);
        let answer = self.answer_for(&normalized);

        tracing::debug!(
            query = %normalized,
            %date,
            sources = sources.len(),
            "Search complete"
        );

        SearchResult { answer, sources }
    }

    fn answer_for(&self, normalized_query: &str) -> String {
        self.rules
            .iter()
            .find(|rule| rule.matches(normalized_query))
            .map(|rule| rule.answer.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Whether `text` contains the whole query or any of its tokens
pub fn matches_query(text: &str, normalized_query: &str, tokens: &[&str]) -> bool {
    let text = text.to_lowercase();
    text.contains(normalized_query) || tokens.iter().any(|t| text.contains(t))
}

fn group_by_chat<'a>(
    store: &MessageStore,
    messages: impl Iterator<Item = &'a Message>,
) -> Vec<Source> {
    let mut sources: Vec<Source> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for message in messages {
        let slot = *index.entry(message.chat_id.as_str()).or_insert_with(|| {
            sources.push(Source {
                chat_name: store
                    .chat_by_id(&message.chat_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| UNKNOWN_CHAT.to_string()),
                chat_id: message.chat_id.clone(),
                messages: Vec::new(),
            });
            sources.len() - 1
        });

        let source = &mut sources[slot];
        if source.messages.len() < MAX_SOURCE_MESSAGES {
            source.messages.push(message.clone());
        }
    }

    sources
}
