//! In-memory message store
//!
//! The store is built once from a provider's output and never mutated.
//! All reads filter by calendar-day equality and preserve corpus order.

use super::types::{Chat, ChatActivity, ChatFilter, Message};
use crate::digest::types::CuratedSummary;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Read-only corpus of chats and messages
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    chats: Vec<Chat>,
    messages: Vec<Message>,
    chat_index: HashMap<String, usize>,
}

/// On-disk corpus fixture
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusFile {
    pub chats: Vec<Chat>,
    pub messages: Vec<Message>,
    /// Curated per-chat narratives, keyed by chat ID
    #[serde(default)]
    pub summaries: HashMap<String, CuratedSummary>,
}

impl CorpusFile {
    /// Load a corpus fixture from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: CorpusFile = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            chats = file.chats.len(),
            messages = file.messages.len(),
            "Loaded corpus fixture"
        );
        Ok(file)
    }
}

impl MessageStore {
    /// Create a store, rejecting duplicate chat or message IDs
    pub fn new(chats: Vec<Chat>, messages: Vec<Message>) -> Result<Self> {
        let mut chat_index = HashMap::with_capacity(chats.len());
        for (i, chat) in chats.iter().enumerate() {
            if chat_index.insert(chat.id.clone(), i).is_some() {
                return Err(Error::Corpus(format!("duplicate chat id '{}'", chat.id)));
            }
        }

        let mut seen = HashSet::with_capacity(messages.len());
        for message in &messages {
            if !seen.insert(message.id.as_str()) {
                return Err(Error::Corpus(format!(
                    "duplicate message id '{}'",
                    message.id
                )));
            }
            if !chat_index.contains_key(&message.chat_id) {
                tracing::warn!(
                    message_id = %message.id,
                    chat_id = %message.chat_id,
                    "Message references unknown chat"
                );
            }
        }

        Ok(Self {
            chats,
            messages,
            chat_index,
        })
    }

    /// Build a store from a JSON fixture file (curated summaries are ignored)
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = CorpusFile::load(path)?;
        Self::new(file.chats, file.messages)
    }

    /// All chats in store order
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    /// Look up a chat by ID
    pub fn chat_by_id(&self, chat_id: &str) -> Option<&Chat> {
        self.chat_index.get(chat_id).map(|&i| &self.chats[i])
    }

    /// Messages sent on `date`, across all chats
    pub fn messages_on_date(&self, date: NaiveDate) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.date() == date).collect()
    }

    /// Messages sent in one chat on `date`
    pub fn messages_for_chat_on_date(&self, chat_id: &str, date: NaiveDate) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| m.chat_id == chat_id && m.date() == date)
            .collect()
    }

    /// Number of messages sent in one chat on `date`
    pub fn chat_message_count(&self, chat_id: &str, date: NaiveDate) -> usize {
        self.messages
            .iter()
            .filter(|m| m.chat_id == chat_id && m.date() == date)
            .count()
    }

    /// Chats with their message counts for `date`, busiest first
    pub fn chat_activity(&self, date: NaiveDate, filter: ChatFilter) -> Vec<ChatActivity> {
        let mut activity: Vec<ChatActivity> = self
            .chats
            .iter()
            .map(|chat| ChatActivity {
                chat: chat.clone(),
                message_count: self.chat_message_count(&chat.id, date),
            })
            .collect();

        // Stable sort keeps store order for ties
        activity.sort_by(|a, b| b.message_count.cmp(&a.message_count));

        match filter {
            ChatFilter::All => activity,
            ChatFilter::Groups => activity.into_iter().filter(|a| a.chat.is_group).collect(),
            ChatFilter::Top(n) => {
                activity.truncate(n);
                activity
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::fixture;
    use chrono::NaiveDateTime;
    use std::io::Write;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_hms_opt(h, m, 0).unwrap()
    }

    fn message(id: &str, chat_id: &str, timestamp: NaiveDateTime) -> Message {
        Message {
            id: id.to_string(),
            chat_id: chat_id.to_string(),
            sender: "Tester".to_string(),
            timestamp,
            text: format!("message {}", id),
        }
    }

    fn chat(id: &str, is_group: bool) -> Chat {
        Chat {
            id: id.to_string(),
            name: format!("Chat {}", id),
            is_group,
            participants: None,
        }
    }

    #[test]
    fn test_messages_on_date_exact_day() {
        let yesterday = day().pred_opt().unwrap();
        let store = MessageStore::new(
            vec![chat("1", true)],
            vec![
                message("a", "1", at(yesterday, 23, 59)),
                message("b", "1", at(day(), 0, 0)),
                message("c", "1", at(day(), 23, 59)),
            ],
        )
        .unwrap();

        let ids: Vec<_> = store
            .messages_on_date(day())
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(store.messages_on_date(yesterday).len(), 1);
    }

    #[test]
    fn test_messages_for_chat_preserves_order() {
        let store = MessageStore::new(
            vec![chat("1", true), chat("2", false)],
            vec![
                message("a", "1", at(day(), 9, 0)),
                message("b", "2", at(day(), 9, 1)),
                message("c", "1", at(day(), 8, 0)),
            ],
        )
        .unwrap();

        let ids: Vec<_> = store
            .messages_for_chat_on_date("1", day())
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_date_is_not_an_error() {
        let store = fixture::sample_store(day());
        let far = NaiveDate::from_ymd_opt(1999, 1, 1).unwrap();
        assert!(store.messages_on_date(far).is_empty());
        assert!(store.messages_for_chat_on_date("1", far).is_empty());
        assert_eq!(store.chat_message_count("1", far), 0);
    }

    #[test]
    fn test_chat_by_id() {
        let store = fixture::sample_store(day());
        assert_eq!(store.chat_by_id("3").unwrap().name, "Work Team");
        assert!(store.chat_by_id("99").is_none());
    }

    #[test]
    fn test_duplicate_chat_id_rejected() {
        let result = MessageStore::new(vec![chat("1", true), chat("1", false)], vec![]);
        assert!(matches!(result, Err(Error::Corpus(_))));
    }

    #[test]
    fn test_duplicate_message_id_rejected() {
        let result = MessageStore::new(
            vec![chat("1", true)],
            vec![
                message("a", "1", at(day(), 9, 0)),
                message("a", "1", at(day(), 9, 5)),
            ],
        );
        assert!(matches!(result, Err(Error::Corpus(_))));
    }

    #[test]
    fn test_chat_activity_sorted_and_filtered() {
        let store = fixture::sample_store(day());

        let all = store.chat_activity(day(), ChatFilter::All);
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].chat.id, "1");
        assert_eq!(all[0].message_count, 10);
        assert!(all.windows(2).all(|w| w[0].message_count >= w[1].message_count));

        let groups = store.chat_activity(day(), ChatFilter::Groups);
        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(|a| a.chat.is_group));

        let top = store.chat_activity(day(), ChatFilter::Top(5));
        assert_eq!(top.len(), 5);
    }

    #[test]
    fn test_chat_activity_ties_keep_store_order() {
        let store = fixture::sample_store(day());
        let far = NaiveDate::from_ymd_opt(1999, 1, 1).unwrap();
        let ids: Vec<_> = store
            .chat_activity(far, ChatFilter::All)
            .into_iter()
            .map(|a| a.chat.id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_from_json_file() {
        let corpus = CorpusFile {
            chats: vec![chat("1", true)],
            messages: vec![message("a", "1", at(day(), 10, 30))],
            summaries: HashMap::new(),
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&corpus).unwrap().as_bytes())
            .unwrap();

        let store = MessageStore::from_json_file(file.path()).unwrap();
        assert_eq!(store.chats().len(), 1);
        assert_eq!(store.messages_on_date(day()).len(), 1);
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let result = MessageStore::from_json_file(file.path());
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
