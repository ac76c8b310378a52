//! Digest result types
//!
//! Everything here is derived from the corpus on request and never stored.
//! Wire names are camelCase to match the HTTP API.

use crate::corpus::Message;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summary of one chat for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub chat_id: String,
    pub summary: String,
    pub key_points: Vec<String>,
    /// Subsequence of the day's messages, in corpus order
    pub notable_messages: Vec<Message>,
    pub message_count: usize,
}

impl ChatSummary {
    /// Placeholder text for a chat with no messages on the requested day
    pub const EMPTY_SUMMARY: &'static str = "No messages today.";

    /// Summary for a chat with no messages on the requested day
    pub fn empty(chat_id: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            summary: Self::EMPTY_SUMMARY.to_string(),
            key_points: Vec::new(),
            notable_messages: Vec::new(),
            message_count: 0,
        }
    }
}

/// Highlight category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightType {
    Event,
    Decision,
    Action,
    Link,
    Deadline,
}

impl HighlightType {
    /// All categories, in display order
    pub const ALL: [HighlightType; 5] = [
        Self::Event,
        Self::Deadline,
        Self::Decision,
        Self::Action,
        Self::Link,
    ];

    /// Human-readable group label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Event => "Events",
            Self::Decision => "Decisions",
            Self::Action => "Action Items",
            Self::Link => "Links Shared",
            Self::Deadline => "Deadlines",
        }
    }
}

impl std::fmt::Display for HighlightType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Event => write!(f, "event"),
            Self::Decision => write!(f, "decision"),
            Self::Action => write!(f, "action"),
            Self::Link => write!(f, "link"),
            Self::Deadline => write!(f, "deadline"),
        }
    }
}

impl std::str::FromStr for HighlightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event" => Ok(Self::Event),
            "decision" => Ok(Self::Decision),
            "action" => Ok(Self::Action),
            "link" => Ok(Self::Link),
            "deadline" => Ok(Self::Deadline),
            other => Err(format!("unknown highlight type: {}", other)),
        }
    }
}

/// A categorized fact attributed to its source chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    #[serde(rename = "type")]
    pub kind: HighlightType,
    pub text: String,
    pub chat_id: String,
    pub chat_name: String,
    pub timestamp: NaiveDateTime,
}

/// A precomputed narrative for one chat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuratedSummary {
    pub summary: String,
    pub key_points: Vec<String>,
    /// Start of the notable-message slice (inclusive)
    #[serde(default)]
    pub notable_start: usize,
    /// End of the notable-message slice (exclusive)
    #[serde(default)]
    pub notable_end: usize,
}

impl CuratedSummary {
    /// The notable slice of `messages`, clamped to its bounds
    pub fn notable<'a>(&self, messages: &[&'a Message]) -> Vec<&'a Message> {
        let end = self.notable_end.min(messages.len());
        let start = self.notable_start.min(end);
        messages[start..end].to_vec()
    }
}

/// Lookup table of curated narratives keyed by chat ID
#[derive(Debug, Clone, Default)]
pub struct SummaryCatalog {
    entries: HashMap<String, CuratedSummary>,
}

impl SummaryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the narrative for a chat
    pub fn insert(&mut self, chat_id: impl Into<String>, summary: CuratedSummary) {
        self.entries.insert(chat_id.into(), summary);
    }

    /// Narrative for a chat, if one was curated
    pub fn get(&self, chat_id: &str) -> Option<&CuratedSummary> {
        self.entries.get(chat_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> HashMap<String, CuratedSummary> {
        self.entries
    }
}

impl From<HashMap<String, CuratedSummary>> for SummaryCatalog {
    fn from(entries: HashMap<String, CuratedSummary>) -> Self {
        Self { entries }
    }
}

/// Everything known about one day, bundled for the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDigest {
    pub date: NaiveDate,
    pub overall_summary: String,
    pub chat_summaries: Vec<ChatSummary>,
    pub highlights: Vec<Highlight>,
    pub total_messages: usize,
    pub total_chats: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(n: usize) -> Vec<Message> {
        let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        (0..n)
            .map(|i| Message {
                id: format!("m{}", i),
                chat_id: "1".to_string(),
                sender: "A".to_string(),
                timestamp: day.and_hms_opt(9, i as u32, 0).unwrap(),
                text: format!("text {}", i),
            })
            .collect()
    }

    fn curated(start: usize, end: usize) -> CuratedSummary {
        CuratedSummary {
            summary: "s".to_string(),
            key_points: vec![],
            notable_start: start,
            notable_end: end,
        }
    }

    #[test]
    fn test_highlight_type_parse() {
        for kind in HighlightType::ALL {
            assert_eq!(kind.to_string().parse::<HighlightType>().unwrap(), kind);
        }
        assert!("reminder".parse::<HighlightType>().is_err());
    }

    #[test]
    fn test_highlight_serializes_type_field() {
        let highlight = Highlight {
            kind: HighlightType::Deadline,
            text: "RSVP".to_string(),
            chat_id: "1".to_string(),
            chat_name: "Event Planning".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2026, 10, 18)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
        };
        let json = serde_json::to_value(&highlight).unwrap();
        assert_eq!(json["type"], "deadline");
        assert_eq!(json["chatName"], "Event Planning");
    }

    #[test]
    fn test_notable_slice_clamped() {
        let owned = messages(3);
        let refs: Vec<&Message> = owned.iter().collect();

        assert_eq!(curated(0, 2).notable(&refs).len(), 2);
        assert_eq!(curated(2, 5).notable(&refs).len(), 1);
        assert_eq!(curated(4, 6).notable(&refs).len(), 0);
        assert_eq!(curated(2, 1).notable(&refs).len(), 0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ChatSummary::empty("7");
        assert_eq!(summary.summary, "No messages today.");
        assert_eq!(summary.message_count, 0);
        assert!(summary.key_points.is_empty());
        assert!(summary.notable_messages.is_empty());
    }
}
