//! ChatDigest configuration management

use crate::corpus::fixture;
use crate::digest::types::HighlightType;
use crate::error::{Error, Result};
use crate::search::types::AnswerRule;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "CHATDIGEST_CONFIG";

/// Main ChatDigest configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigestConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Corpus source configuration
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Per-chat summarizer configuration
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// Daily digest configuration
    #[serde(default)]
    pub digest: DigestTextConfig,

    /// Highlight extraction configuration
    #[serde(default)]
    pub highlights: HighlightsConfig,

    /// Query engine configuration
    #[serde(default)]
    pub search: SearchConfig,
}

impl DigestConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Resolve and load configuration.
    ///
    /// Lookup order: explicit path, `$CHATDIGEST_CONFIG`, the per-user config
    /// file, then built-in defaults. An explicit path that does not exist is
    /// an error; a missing per-user file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Per-user config file (`<config_dir>/chatdigest/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|p| p.join("chatdigest").join("config.toml"))
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed origins for CORS (`*` allows any)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

/// Corpus source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// JSON fixture file; the built-in sample (anchored on today) when unset
    #[serde(default)]
    pub fixture: Option<PathBuf>,
}

/// Per-chat summarizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Maximum notable messages in a generated summary
    pub notable_limit: usize,

    /// Minimum word count for a message to be considered notable
    pub min_notable_words: usize,

    /// Maximum key points in a generated summary
    pub max_key_points: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            notable_limit: 3,
            min_notable_words: 4,
            max_key_points: 5,
        }
    }
}

/// Daily digest text configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestTextConfig {
    /// Delimiter wrapped around emphasized spans
    pub emphasis: String,
}

impl Default for DigestTextConfig {
    fn default() -> Self {
        Self {
            emphasis: "**".to_string(),
        }
    }
}

/// Highlight extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightsConfig {
    /// Extraction rules, evaluated in order
    pub rules: Vec<HighlightRule>,
}

impl Default for HighlightsConfig {
    fn default() -> Self {
        Self {
            rules: default_highlight_rules(),
        }
    }
}

/// A regex rule producing one highlight category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightRule {
    /// Rule name (for diagnostics)
    pub name: String,

    /// Category produced when the rule matches
    pub kind: HighlightType,

    /// Regex pattern
    pub pattern: String,
}

/// Default extraction rules
pub fn default_highlight_rules() -> Vec<HighlightRule> {
    const WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";
    const CLOCK: &str = r"\d{1,2}(?::\d{2})?\s?(?:am|pm)";

    vec![
        HighlightRule {
            name: "event".to_string(),
            kind: HighlightType::Event,
            pattern: format!(
                r"(?i)\b(?:{WEEKDAYS}|tomorrow|tonight|today)\b|\b{CLOCK}\b"
            ),
        },
        HighlightRule {
            name: "deadline".to_string(),
            kind: HighlightType::Deadline,
            pattern: format!(
                r"(?i)\b(?:deadline|due|eod|end of day|asap)\b|\bby\s+(?:tomorrow|tonight|today|noon|{WEEKDAYS}|{CLOCK})\b"
            ),
        },
        HighlightRule {
            name: "decision".to_string(),
            kind: HighlightType::Decision,
            pattern: r"(?i)\b(?:agreed|decided|confirmed|settled on|approved|let's go with|we'll go with)\b"
                .to_string(),
        },
        HighlightRule {
            name: "action".to_string(),
            kind: HighlightType::Action,
            pattern: r"(?i)\b(?:i['’]ll|i will|i can|can you|could you|please|need you to|make sure|remember to)\b"
                .to_string(),
        },
        HighlightRule {
            name: "link".to_string(),
            kind: HighlightType::Link,
            pattern: r#"https?://[^\s<>"')\]]+"#.to_string(),
        },
    ]
}

/// Query engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Answer used when no rule matches the query
    pub fallback_answer: String,

    /// Answer rules, evaluated in priority order
    pub answers: Vec<AnswerRule>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fallback_answer: crate::search::FALLBACK_ANSWER.to_string(),
            answers: fixture::sample_answer_rules(),
        }
    }
}
