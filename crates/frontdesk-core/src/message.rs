//! Message vocabulary: roles, sentiment, and the logged message record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Who authored a logged message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The contact on the other end of the conversation.
    User,
    /// The automated engine.
    Bot,
    /// A human agent replying through the hand-off channel.
    Agent,
}

impl MessageRole {
    /// Stable string form used in storage and prompt rendering.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
            Self::Agent => "agent",
        }
    }

    /// Parse the stable string form. Unknown values are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "bot" => Some(Self::Bot),
            "agent" => Some(Self::Agent),
            _ => None,
        }
    }
}

/// Lightweight per-message sentiment classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Positive lexicon hit (wins when both lexicons match).
    Positive,
    /// No lexicon hit.
    #[default]
    Neutral,
    /// Negative lexicon hit.
    Negative,
}

impl Sentiment {
    /// Stable string form used in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Parse the stable string form, defaulting to neutral.
    pub fn parse(s: &str) -> Self {
        match s {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }
}

/// One append-only message log record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    /// Conversation participant this record belongs to.
    pub address: Address,
    /// Author of the content.
    pub role: MessageRole,
    /// Message text.
    pub content: String,
    /// Sentiment computed at save time.
    pub sentiment: Sentiment,
    /// Wall-clock time the record was appended.
    pub timestamp: DateTime<Utc>,
}
