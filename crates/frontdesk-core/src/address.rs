//! Branded address type for conversation participants.
//!
//! An [`Address`] is the unique key for contacts, sessions, and message
//! history. The transport adapter hands us raw strings; wrapping them in a
//! newtype keeps the rest of the engine from mixing addresses with other
//! string-shaped data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a conversation participant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wrap a raw transport address.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for Address {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
