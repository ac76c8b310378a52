//! Daily digest narrative
//!
//! Produces plain text: paragraphs separated by a blank line, emphasized
//! spans wrapped in the configured delimiter. Renderers split on `"\n\n"`
//! and on the delimiter themselves.

use super::highlights::HighlightExtractor;
use super::summarizer::{plural, Summarizer};
use super::types::HighlightType;
use crate::config::DigestTextConfig;
use crate::corpus::{ChatFilter, MessageStore};
use chrono::NaiveDate;
use std::sync::Arc;

/// Paragraph separator in generated digests
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// Builds the cross-chat narrative for one day
pub struct DigestGenerator {
    summarizer: Arc<Summarizer>,
    extractor: Arc<HighlightExtractor>,
    config: DigestTextConfig,
}

impl DigestGenerator {
    pub fn new(
        summarizer: Arc<Summarizer>,
        extractor: Arc<HighlightExtractor>,
        config: DigestTextConfig,
    ) -> Self {
        Self {
            summarizer,
            extractor,
            config,
        }
    }

    /// Generate the digest for `date`. Never empty, always multi-paragraph.
    pub fn generate(&self, store: &MessageStore, date: NaiveDate) -> String {
        let day = date.format("%A, %B %-d").to_string();
        let active: Vec<_> = store
            .chat_activity(date, ChatFilter::All)
            .into_iter()
            .filter(|a| a.message_count > 0)
            .collect();

        if active.is_empty() {
            tracing::debug!(%date, "No messages, emitting quiet-day digest");
            return [
                self.emphasize(&format!("📭 No messages on {}.", day)),
                "Your chats were quiet. Nothing needs your attention.".to_string(),
            ]
            .join(PARAGRAPH_BREAK);
        }

        let total: usize = active.iter().map(|a| a.message_count).sum();
        let mut paragraphs = vec![self.emphasize(&format!(
            "📱 {} was a busy day across {} {} with {} {}.",
            day,
            active.len(),
            plural(active.len(), "chat", "chats"),
            total,
            plural(total, "message", "messages"),
        ))];

        let leaders: Vec<String> = active
            .iter()
            .take(2)
            .map(|a| self.emphasize(&a.chat.name))
            .collect();
        paragraphs.push(match leaders.as_slice() {
            [first, second, ..] => format!(
                "{} and {} were the most active, taking the lead.",
                first, second
            ),
            _ => format!("All of the conversation happened in {}.", leaders.concat()),
        });

        for activity in &active {
            let summary = self.summarizer.summarize(store, &activity.chat.id, date);
            paragraphs.push(format!(
                "{} {}",
                self.emphasize(&activity.chat.name),
                first_sentence(&summary.summary)
            ));
        }

        let highlights = self.extractor.extract(store, date);
        let count = |kind: HighlightType| highlights.iter().filter(|h| h.kind == kind).count();
        let deadlines = count(HighlightType::Deadline);
        let actions = count(HighlightType::Action);
        if deadlines + actions > 0 {
            paragraphs.push(format!(
                "Keep an eye on {} and {}.",
                self.emphasize(&format!(
                    "{} {}",
                    deadlines,
                    plural(deadlines, "deadline", "deadlines")
                )),
                self.emphasize(&format!(
                    "{} action {}",
                    actions,
                    plural(actions, "item", "items")
                )),
            ));
        }

        tracing::debug!(%date, paragraphs = paragraphs.len(), "Generated digest");
        paragraphs.join(PARAGRAPH_BREAK)
    }

    fn emphasize(&self, text: &str) -> String {
        format!("{0}{1}{0}", self.config.emphasis, text)
    }
}

/// Text up to and including the first sentence terminator followed by
/// whitespace (or the whole text)
fn first_sentence(text: &str) -> &str {
    let text = text.trim();
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            match chars.peek() {
                Some((_, next)) if next.is_whitespace() => return &text[..i + c.len_utf8()],
                None => return text,
                _ => {}
            }
        }
    }
    text
}
