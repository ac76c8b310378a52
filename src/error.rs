//! ChatDigest error types

use thiserror::Error;

/// ChatDigest error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus loading or validation error
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Highlight rule error
    #[error("Highlight error: {0}")]
    Highlight(String),

    /// Search rule error
    #[error("Search error: {0}")]
    Search(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for ChatDigest operations
pub type Result<T> = std::result::Result<T, Error>;
