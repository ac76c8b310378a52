//! Per-chat summaries
//!
//! A chat with no messages on the requested day always gets the placeholder
//! summary. Otherwise a curated narrative from the catalog is used verbatim
//! when one exists, and a summary is generated from the messages when not.

use super::highlights::HighlightExtractor;
use super::types::{ChatSummary, SummaryCatalog};
use crate::config::SummarizerConfig;
use crate::corpus::{Message, MessageStore};
use chrono::NaiveDate;
use std::sync::Arc;

/// Builds [`ChatSummary`] values for one chat and day
pub struct Summarizer {
    catalog: SummaryCatalog,
    extractor: Arc<HighlightExtractor>,
    config: SummarizerConfig,
}

impl Summarizer {
    pub fn new(
        catalog: SummaryCatalog,
        extractor: Arc<HighlightExtractor>,
        config: SummarizerConfig,
    ) -> Self {
        Self {
            catalog,
            extractor,
            config,
        }
    }

    /// Summarize one chat on `date`
    pub fn summarize(&self, store: &MessageStore, chat_id: &str, date: NaiveDate) -> ChatSummary {
        let messages = store.messages_for_chat_on_date(chat_id, date);
        if messages.is_empty() {
            return ChatSummary::empty(chat_id);
        }

        if let Some(curated) = self.catalog.get(chat_id) {
            return ChatSummary {
                chat_id: chat_id.to_string(),
                summary: curated.summary.clone(),
                key_points: curated.key_points.clone(),
                notable_messages: curated.notable(&messages).into_iter().cloned().collect(),
                message_count: messages.len(),
            };
        }

        self.generate(store, chat_id, date, &messages)
    }

    fn generate(
        &self,
        store: &MessageStore,
        chat_id: &str,
        date: NaiveDate,
        messages: &[&Message],
    ) -> ChatSummary {
        let chat_name = store
            .chat_by_id(chat_id)
            .map(|c| c.name.as_str())
            .unwrap_or(chat_id);

        let summary = format!(
            "{} {} in {} from {}.",
            messages.len(),
            plural(messages.len(), "message", "messages"),
            chat_name,
            join_names(&senders(messages)),
        );

        let mut key_points: Vec<String> = Vec::new();
        for highlight in self.extractor.extract_for_chat(store, chat_id, date) {
            if key_points.len() >= self.config.max_key_points {
                break;
            }
            if !key_points.contains(&highlight.text) {
                key_points.push(highlight.text);
            }
        }
        if key_points.is_empty() {
            key_points.push(format!("Total messages: {}", messages.len()));
        }

        ChatSummary {
            chat_id: chat_id.to_string(),
            summary,
            key_points,
            notable_messages: self.notable(messages),
            message_count: messages.len(),
        }
    }

    /// First few substantive messages; the first message if none qualify
    fn notable(&self, messages: &[&Message]) -> Vec<Message> {
        let picked: Vec<Message> = messages
            .iter()
            .filter(|m| m.text.split_whitespace().count() >= self.config.min_notable_words)
            .take(self.config.notable_limit)
            .map(|m| (*m).clone())
            .collect();

        if picked.is_empty() && self.config.notable_limit > 0 {
            return messages.iter().take(1).map(|m| (*m).clone()).collect();
        }
        picked
    }
}

/// Distinct senders in first-seen order
fn senders<'a>(messages: &[&'a Message]) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    for &m in messages {
        if !names.contains(&m.sender.as_str()) {
            names.push(m.sender.as_str());
        }
    }
    names
}

/// "A", "A and B", "A, B and C"
pub(crate) fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

pub(crate) fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_highlight_rules;
    use crate::corpus::{fixture, Chat};
    use crate::digest::types::CuratedSummary;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn summarizer(catalog: SummaryCatalog) -> Summarizer {
        let extractor = Arc::new(HighlightExtractor::new(default_highlight_rules()).unwrap());
        Summarizer::new(catalog, extractor, SummarizerConfig::default())
    }

    fn small_store(texts: &[(&str, &str)]) -> MessageStore {
        let chat = Chat {
            id: "9".to_string(),
            name: "Book Club".to_string(),
            is_group: true,
            participants: None,
        };
        let messages = texts
            .iter()
            .enumerate()
            .map(|(i, (sender, text))| Message {
                id: format!("b{}", i),
                chat_id: "9".to_string(),
                sender: sender.to_string(),
                timestamp: day().and_hms_opt(18, i as u32, 0).unwrap(),
                text: text.to_string(),
            })
            .collect();
        MessageStore::new(vec![chat], messages).unwrap()
    }

    #[test]
    fn test_curated_event_planning() {
        let store = fixture::sample_store(day());
        let summary = summarizer(fixture::sample_catalog()).summarize(&store, "1", day());

        assert_eq!(summary.message_count, 10);
        assert!(!summary.key_points.is_empty());
        assert!(summary.summary.contains("Sky Lounge"));
        let ids: Vec<_> = summary
            .notable_messages
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["m3", "m4", "m5"]);
    }

    #[test]
    fn test_message_count_matches_store() {
        let store = fixture::sample_store(day());
        let s = summarizer(fixture::sample_catalog());
        for chat in store.chats() {
            let summary = s.summarize(&store, &chat.id, day());
            assert_eq!(
                summary.message_count,
                store.chat_message_count(&chat.id, day())
            );
        }
    }

    #[test]
    fn test_empty_day_placeholder() {
        let store = fixture::sample_store(day());
        let far = NaiveDate::from_ymd_opt(1999, 1, 1).unwrap();
        let summary = summarizer(fixture::sample_catalog()).summarize(&store, "1", far);

        assert_eq!(summary, ChatSummary::empty("1"));
    }

    #[test]
    fn test_unknown_chat_placeholder() {
        let store = fixture::sample_store(day());
        let summary = summarizer(fixture::sample_catalog()).summarize(&store, "nope", day());
        assert_eq!(summary.summary, ChatSummary::EMPTY_SUMMARY);
        assert_eq!(summary.message_count, 0);
    }

    #[test]
    fn test_generated_summary() {
        let store = small_store(&[
            ("Ann", "Hi"),
            ("Ben", "We agreed on Dune for next month's book"),
            ("Ann", "I'll send the reading schedule tonight"),
            ("Cal", "ok"),
        ]);
        let summary = summarizer(SummaryCatalog::new()).summarize(&store, "9", day());

        assert_eq!(summary.message_count, 4);
        assert_eq!(summary.summary, "4 messages in Book Club from Ann, Ben and Cal.");
        assert!(summary
            .key_points
            .contains(&"We agreed on Dune for next month's book".to_string()));
        assert!(summary
            .key_points
            .contains(&"Ann: I'll send the reading schedule tonight".to_string()));
        let ids: Vec<_> = summary
            .notable_messages
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b1", "b2"]);
    }

    #[test]
    fn test_generated_summary_without_highlights() {
        let store = small_store(&[("Ann", "hi"), ("Ann", "yo")]);
        let summary = summarizer(SummaryCatalog::new()).summarize(&store, "9", day());

        assert_eq!(summary.summary, "2 messages in Book Club from Ann.");
        assert_eq!(summary.key_points, vec!["Total messages: 2"]);
        assert_eq!(summary.notable_messages.len(), 1);
        assert_eq!(summary.notable_messages[0].id, "b0");
    }

    #[test]
    fn test_curated_notable_clamped_to_messages() {
        let store = small_store(&[("Ann", "one"), ("Ben", "two")]);
        let mut catalog = SummaryCatalog::new();
        catalog.insert(
            "9",
            CuratedSummary {
                summary: "Short chat.".to_string(),
                key_points: vec!["k".to_string()],
                notable_start: 1,
                notable_end: 5,
            },
        );
        let summary = summarizer(catalog).summarize(&store, "9", day());
        assert_eq!(summary.summary, "Short chat.");
        assert_eq!(summary.notable_messages.len(), 1);
        assert_eq!(summary.notable_messages[0].id, "b1");
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(&[]), "");
        assert_eq!(join_names(&["A"]), "A");
        assert_eq!(join_names(&["A", "B"]), "A and B");
        assert_eq!(join_names(&["A", "B", "C"]), "A, B and C");
    }
}
