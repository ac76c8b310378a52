//! Query engine types

use crate::corpus::Message;
use serde::{Deserialize, Serialize};

/// A canned answer selected when any trigger occurs in the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRule {
    /// Lowercase trigger substrings
    pub triggers: Vec<String>,
    /// Answer text returned when the rule fires
    pub answer: String,
}

impl AnswerRule {
    /// Whether any trigger is a substring of the normalized query
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.triggers
            .iter()
            .any(|t| !t.is_empty() && normalized_query.contains(t.to_lowercase().as_str()))
    }
}

/// Matching messages from one chat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub chat_name: String,
    pub chat_id: String,
    /// At most three messages, in corpus order
    pub messages: Vec<Message>,
}

/// Answer and attributed sources for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub answer: String,
    pub sources: Vec<Source>,
}
