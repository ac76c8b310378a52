//! Digest engine, the four query operations over a shared store
//!
//! One engine is built at startup from [`DigestConfig`] and passed by
//! reference (usually `Arc<DigestEngine>`) to whatever needs it. Every
//! operation is a pure read; a missing date means the local "today".

use crate::config::DigestConfig;
use crate::corpus::{fixture, ChatActivity, ChatFilter, CorpusFile, Message, MessageStore};
use crate::digest::{
    ChatSummary, DailyDigest, DigestGenerator, Highlight, HighlightExtractor, Summarizer,
    SummaryCatalog,
};
use crate::error::Result;
use crate::search::{QueryEngine, SearchResult};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

/// The local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Facade over the store and the digest components
pub struct DigestEngine {
    store: Arc<MessageStore>,
    summarizer: Arc<Summarizer>,
    generator: DigestGenerator,
    extractor: Arc<HighlightExtractor>,
    query: QueryEngine,
}

impl DigestEngine {
    /// Assemble an engine around an existing store and catalog
    pub fn new(
        store: Arc<MessageStore>,
        catalog: SummaryCatalog,
        config: &DigestConfig,
    ) -> Result<Self> {
        let extractor = Arc::new(HighlightExtractor::new(config.highlights.rules.clone())?);
        let summarizer = Arc::new(Summarizer::new(
            catalog,
            extractor.clone(),
            config.summarizer.clone(),
        ));
        let generator =
            DigestGenerator::new(summarizer.clone(), extractor.clone(), config.digest.clone());
        let query = QueryEngine::new(
            config.search.answers.clone(),
            config.search.fallback_answer.clone(),
        )?;

        Ok(Self {
            store,
            summarizer,
            generator,
            extractor,
            query,
        })
    }

    /// Build an engine from configuration, loading the configured corpus
    /// fixture or falling back to the sample corpus anchored on today
    pub fn from_config(config: &DigestConfig) -> Result<Self> {
        let corpus = match &config.corpus.fixture {
            Some(path) => CorpusFile::load(path)?,
            None => {
                // The sample stays on this day for the life of the engine
                let day = today();
                tracing::info!(%day, "No corpus fixture configured, using the sample corpus");
                fixture::sample_corpus_file(day)
            }
        };

        let store = MessageStore::new(corpus.chats, corpus.messages)?;
        Self::new(Arc::new(store), corpus.summaries.into(), config)
    }

    /// The underlying store
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Summary for one chat (placeholder when it has no messages)
    pub fn summarize_chat(&self, chat_id: &str, date: Option<NaiveDate>) -> ChatSummary {
        let date = date.unwrap_or_else(today);
        tracing::debug!(chat_id, %date, "Summarizing chat");
        self.summarizer.summarize(&self.store, chat_id, date)
    }

    /// Cross-chat narrative for one day
    pub fn daily_digest(&self, date: Option<NaiveDate>) -> String {
        self.generator
            .generate(&self.store, date.unwrap_or_else(today))
    }

    /// Categorized highlights for one day
    pub fn extract_highlights(&self, date: Option<NaiveDate>) -> Vec<Highlight> {
        self.extractor
            .extract(&self.store, date.unwrap_or_else(today))
    }

    /// Answer a free-text query against one day of messages
    pub fn search(&self, query: &str, date: Option<NaiveDate>) -> SearchResult {
        self.search_in_chats(query, date, None)
    }

    /// Answer a query, optionally restricted to some chats
    pub fn search_in_chats(
        &self,
        query: &str,
        date: Option<NaiveDate>,
        chat_ids: Option<&[String]>,
    ) -> SearchResult {
        self.query
            .search_in_chats(&self.store, query, date.unwrap_or_else(today), chat_ids)
    }

    /// One chat's messages for a day in corpus order, optionally capped at `limit`
    pub fn chat_messages(
        &self,
        chat_id: &str,
        date: Option<NaiveDate>,
        limit: Option<usize>,
    ) -> Vec<Message> {
        self.store
            .messages_for_chat_on_date(chat_id, date.unwrap_or_else(today))
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Chats with their activity for one day
    pub fn chat_activity(&self, date: Option<NaiveDate>, filter: ChatFilter) -> Vec<ChatActivity> {
        self.store
            .chat_activity(date.unwrap_or_else(today), filter)
    }

    /// Digest, per-chat summaries and highlights for one day
    pub fn daily_digest_report(&self, date: Option<NaiveDate>) -> DailyDigest {
        let date = date.unwrap_or_else(today);
        let chat_summaries: Vec<ChatSummary> = self
            .store
            .chat_activity(date, ChatFilter::All)
            .into_iter()
            .filter(|a| a.message_count > 0)
            .map(|a| self.summarizer.summarize(&self.store, &a.chat.id, date))
            .collect();

        DailyDigest {
            date,
            overall_summary: self.generator.generate(&self.store, date),
            total_messages: chat_summaries.iter().map(|s| s.message_count).sum(),
            total_chats: chat_summaries.len(),
            chat_summaries,
            highlights: self.extractor.extract(&self.store, date),
        }
    }
}
