//! Transport-boundary event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// One inbound event delivered by the transport adapter.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessage {
    /// Sender address.
    pub address: Address,
    /// Raw message text.
    pub text: String,
    /// Delivery time reported by the transport.
    pub timestamp: DateTime<Utc>,
    /// Group-addressed traffic is ignored unconditionally.
    #[serde(default)]
    pub is_group: bool,
    /// Status/broadcast traffic is ignored unconditionally.
    #[serde(default)]
    pub is_status: bool,
}

impl InboundMessage {
    /// A direct message with the current time, for tests and tools.
    pub fn direct(address: impl Into<Address>, text: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            text: text.into(),
            timestamp: Utc::now(),
            is_group: false,
            is_status: false,
        }
    }
}

/// One outbound reply handed to the transport adapter.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    /// Recipient address.
    pub address: Address,
    /// Reply text.
    pub text: String,
}
