//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so partial
//! JSON documents load with production defaults for the missing fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root settings type for the Frontdesk engine.
///
/// # JSON Format
///
/// All field names are camelCase. Example:
///
/// ```json
/// {
///   "version": "0.1.0",
///   "delegate": { "baseUrl": "https://api.deepseek.com", "model": "deepseek-chat" },
///   "conversation": { "historyLimit": 5 }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrontdeskSettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// Generative-text delegate endpoint settings.
    pub delegate: DelegateSettings,
    /// Conversation/history limits and command prefix.
    pub conversation: ConversationSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
    /// Extra command table entries: token (without prefix) → fixed reply.
    pub commands: BTreeMap<String, String>,
}

impl Default for FrontdeskSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_owned(),
            name: "frontdesk".to_owned(),
            delegate: DelegateSettings::default(),
            conversation: ConversationSettings::default(),
            logging: LoggingSettings::default(),
            commands: BTreeMap::new(),
        }
    }
}

/// AI delegate endpoint configuration (OpenAI-compatible chat completions).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DelegateSettings {
    /// Base URL of the chat-completions API.
    pub base_url: String,
    /// Bearer token. `None` disables the delegate entirely.
    pub api_key: Option<String>,
    /// Model identifier sent in the request body.
    pub model: String,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Sampling temperature (lowered for negative-sentiment turns).
    pub temperature: f32,
    /// End-to-end request timeout in seconds. Timeout is treated the same
    /// as any other delegate failure.
    pub timeout_secs: u64,
}

impl Default for DelegateSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".to_owned(),
            api_key: None,
            model: "deepseek-chat".to_owned(),
            max_tokens: 300,
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

/// Conversation limits and the command prefix.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationSettings {
    /// Messages of history assembled into the AI context.
    pub history_limit: usize,
    /// Messages scanned for topic extraction.
    pub topic_scan_limit: usize,
    /// Topics reported by the extractor.
    pub topic_count: usize,
    /// Prefix marking a command message.
    pub command_prefix: String,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            history_limit: 5,
            topic_scan_limit: 50,
            topic_count: 3,
            command_prefix: "/".to_owned(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let s = FrontdeskSettings::default();
        assert_eq!(s.conversation.history_limit, 5);
        assert_eq!(s.conversation.topic_scan_limit, 50);
        assert_eq!(s.conversation.command_prefix, "/");
        assert_eq!(s.delegate.timeout_secs, 30);
        assert!(s.delegate.api_key.is_none());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: FrontdeskSettings =
            serde_json::from_str(r#"{"delegate":{"model":"gpt-4o-mini"}}"#).unwrap();
        assert_eq!(s.delegate.model, "gpt-4o-mini");
        assert_eq!(s.delegate.max_tokens, 300);
        assert_eq!(s.conversation.history_limit, 5);
    }
}
