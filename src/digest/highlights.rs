//! Rule-based highlight extraction
//!
//! Every message of the day is tested against an ordered list of regex
//! rules. Each rule names the highlight category it produces. Extraction is
//! deterministic (no LLM):
//!
//! 1. Link rules emit one highlight per matched URL, with the URL as text.
//! 2. Action highlights are attributed to the sender (`"Bob: ..."`).
//! 3. Other categories carry the trimmed message text.
//! 4. A message that states a deadline is not also reported as an event.
//!
//! Output is grouped by category in [`HighlightType::ALL`] order and keeps
//! corpus order within each group. Identical facts from the same chat are
//! emitted once.

use super::types::{Highlight, HighlightType};
use crate::config::HighlightRule;
use crate::corpus::{Message, MessageStore};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;

/// Highlight extractor with pre-compiled rules
pub struct HighlightExtractor {
    rules: Vec<CompiledRule>,
}

struct CompiledRule {
    name: String,
    kind: HighlightType,
    pattern: Regex,
}

impl HighlightExtractor {
    /// Compile the given rules
    pub fn new(rules: Vec<HighlightRule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let pattern = Regex::new(&rule.pattern).map_err(|e| {
                    Error::Highlight(format!(
                        "Invalid regex pattern for rule '{}': {}",
                        rule.name, e
                    ))
                })?;

                Ok(CompiledRule {
                    name: rule.name,
                    kind: rule.kind,
                    pattern,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Extract highlights from every chat on `date`
    pub fn extract(&self, store: &MessageStore, date: NaiveDate) -> Vec<Highlight> {
        let highlights = self.extract_from(store, &store.messages_on_date(date));
        tracing::debug!(%date, count = highlights.len(), "Extracted highlights");
        highlights
    }

    /// Extract highlights from a single chat on `date`
    pub fn extract_for_chat(
        &self,
        store: &MessageStore,
        chat_id: &str,
        date: NaiveDate,
    ) -> Vec<Highlight> {
        self.extract_from(store, &store.messages_for_chat_on_date(chat_id, date))
    }

    fn extract_from(&self, store: &MessageStore, messages: &[&Message]) -> Vec<Highlight> {
        let mut buckets: [Vec<Highlight>; 5] = Default::default();
        let mut seen: HashSet<(HighlightType, String, String)> = HashSet::new();

        for message in messages {
            let Some(chat) = store.chat_by_id(&message.chat_id) else {
                tracing::warn!(
                    message_id = %message.id,
                    chat_id = %message.chat_id,
                    "Skipping message from unknown chat"
                );
                continue;
            };

            for (kind, text) in self.classify(message) {
                if !seen.insert((kind, message.chat_id.clone(), text.clone())) {
                    continue;
                }
                buckets[bucket_index(kind)].push(Highlight {
                    kind,
                    text,
                    chat_id: chat.id.clone(),
                    chat_name: chat.name.clone(),
                    timestamp: message.timestamp,
                });
            }
        }

        buckets.into_iter().flatten().collect()
    }

    /// Categories and highlight texts found in a single message
    fn classify(&self, message: &Message) -> Vec<(HighlightType, String)> {
        let mut found = Vec::new();

        for rule in &self.rules {
            let before = found.len();
            if rule.kind == HighlightType::Link {
                for mat in rule.pattern.find_iter(&message.text) {
                    let url = mat.as_str().trim_end_matches(&['.', ',', '!', '?', ';', ':'][..]);
                    found.push((HighlightType::Link, url.to_string()));
                }
            } else if rule.pattern.is_match(&message.text) {
                found.push((rule.kind, render_text(rule.kind, message)));
            }
            if found.len() > before {
                tracing::trace!(rule = %rule.name, message_id = %message.id, "Highlight rule matched");
            }
        }

        if found.iter().any(|(kind, _)| *kind == HighlightType::Deadline) {
            found.retain(|(kind, _)| *kind != HighlightType::Event);
        }

        found
    }
}

fn render_text(kind: HighlightType, message: &Message) -> String {
    let text = message.text.trim();
    match kind {
        HighlightType::Action => format!("{}: {}", message.sender, text),
        _ => text.to_string(),
    }
}

fn bucket_index(kind: HighlightType) -> usize {
    HighlightType::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or_default()
}
