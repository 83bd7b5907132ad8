//! Session continuation state.
//!
//! A session stores at most one nullable string tag per address. The tag
//! vocabulary is open-ended: besides the reserved markers and the configured
//! menu keywords, any other non-null tag is an opaque continuation marker
//! that must round-trip verbatim through the engine.

use serde::{Deserialize, Serialize};

use crate::config::BusinessConfig;

/// Reserved tag for the free-form AI conversation state.
pub const FREE_CHAT_TAG: &str = "free_chat";

/// Reserved tag for the human hand-off state (terminal for the bot).
pub const AWAITING_AGENT_TAG: &str = "awaiting_agent";

/// Decoded dialogue state for one address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "tag")]
pub enum SessionState {
    /// No continuation — the contact is at the top-level menu.
    Top,
    /// Inside the configured menu option with this keyword.
    Menu(String),
    /// Free-form conversation delegated to the AI.
    FreeChat,
    /// Waiting for a human agent; the bot only acknowledges.
    AwaitingAgent,
    /// Unrecognized tag, restored verbatim on the next write.
    Continuation(String),
}

impl SessionState {
    /// Decode a stored tag against the active business configuration.
    ///
    /// `None` is the top level. A non-null tag that is neither a reserved
    /// marker nor a configured menu keyword decodes to
    /// [`SessionState::Continuation`] so it survives untouched.
    pub fn decode(tag: Option<&str>, config: &BusinessConfig) -> Self {
        match tag {
            None => Self::Top,
            Some(FREE_CHAT_TAG) => Self::FreeChat,
            Some(AWAITING_AGENT_TAG) => Self::AwaitingAgent,
            Some(t) => {
                if config.option_by_keyword(t).is_some() {
                    Self::Menu(t.to_owned())
                } else {
                    Self::Continuation(t.to_owned())
                }
            }
        }
    }

    /// Encode back to the stored nullable tag.
    pub fn encode(&self) -> Option<&str> {
        match self {
            Self::Top => None,
            Self::FreeChat => Some(FREE_CHAT_TAG),
            Self::AwaitingAgent => Some(AWAITING_AGENT_TAG),
            Self::Menu(tag) | Self::Continuation(tag) => Some(tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_fixtures::demo_config;

    #[test]
    fn null_tag_is_top() {
        let config = demo_config();
        assert_eq!(SessionState::decode(None, &config), SessionState::Top);
        assert_eq!(SessionState::Top.encode(), None);
    }

    #[test]
    fn reserved_markers_decode() {
        let config = demo_config();
        assert_eq!(
            SessionState::decode(Some(FREE_CHAT_TAG), &config),
            SessionState::FreeChat
        );
        assert_eq!(
            SessionState::decode(Some(AWAITING_AGENT_TAG), &config),
            SessionState::AwaitingAgent
        );
    }

    #[test]
    fn configured_keyword_decodes_to_menu() {
        let config = demo_config();
        assert_eq!(
            SessionState::decode(Some("hours"), &config),
            SessionState::Menu("hours".into())
        );
    }

    #[test]
    fn unknown_tag_round_trips_verbatim() {
        let config = demo_config();
        let state = SessionState::decode(Some("legacy-flow:42"), &config);
        assert_eq!(state, SessionState::Continuation("legacy-flow:42".into()));
        assert_eq!(state.encode(), Some("legacy-flow:42"));
    }
}
