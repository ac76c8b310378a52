//! Corpus data types
//!
//! Messages and chats are immutable reference data supplied by whatever
//! provider feeds the store. Timestamps are chat-local wall-clock times;
//! no time zone is carried.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier
    pub id: String,
    /// Chat this message belongs to
    pub chat_id: String,
    /// Display name of the sender
    pub sender: String,
    /// Chat-local send time
    pub timestamp: NaiveDateTime,
    /// Message body
    pub text: String,
}

impl Message {
    /// Calendar day the message was sent on
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// A conversation (group or direct)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    /// Unique chat identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether this is a group conversation
    pub is_group: bool,
    /// Participant names, in display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,
}

/// A chat paired with its activity for one day
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatActivity {
    #[serde(flatten)]
    pub chat: Chat,
    pub message_count: usize,
}

/// Chat list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatFilter {
    /// Every chat
    #[default]
    All,
    /// Group chats only
    Groups,
    /// The N busiest chats
    Top(usize),
}

impl std::fmt::Display for ChatFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Groups => write!(f, "groups"),
            Self::Top(n) => write!(f, "top{}", n),
        }
    }
}

impl std::str::FromStr for ChatFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "groups" => Ok(Self::Groups),
            other => other
                .strip_prefix("top")
                .and_then(|n| n.parse().ok())
                .map(Self::Top)
                .ok_or_else(|| format!("unknown chat filter: {}", other)),
        }
    }
}
