//! Raw row types returned by the repositories.
//!
//! Timestamps stay RFC 3339 strings at this layer; the high-level store
//! converts to `chrono` types where the engine needs them.

use serde::{Deserialize, Serialize};

/// One `contacts` row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRow {
    /// Unique participant address.
    pub address: String,
    /// Optional display name (set by the transport adapter, not the core).
    pub name: Option<String>,
    /// Whether the transport flagged the contact as a business account.
    pub is_business: bool,
    /// Free-form tags (JSON array in storage; opaque to the core).
    pub tags: Vec<String>,
    /// First time this address was seen.
    pub first_seen: String,
    /// Last inbound interaction.
    pub last_interaction: String,
    /// Inbound message counter.
    pub total_messages: i64,
}

/// One `sessions` row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRow {
    /// Unique participant address.
    pub address: String,
    /// Nullable opaque continuation tag.
    pub state: Option<String>,
    /// Last state write.
    pub updated_at: String,
}

/// One `messages` row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRow {
    /// Row id (`msg_` + UUIDv7, so id order follows insert order).
    pub id: String,
    /// Participant address.
    pub address: String,
    /// `user`, `bot`, or `agent`.
    pub role: String,
    /// Message text.
    pub content: String,
    /// `positive`, `neutral`, or `negative`.
    pub sentiment: String,
    /// Append time, RFC 3339.
    pub timestamp: String,
}
