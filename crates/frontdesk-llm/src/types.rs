//! Chat-completions wire types (OpenAI-compatible subset).

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat/completions`.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation; the assembled context goes in as one user message.
    pub messages: Vec<ChatMessage>,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// One request/response message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `user`, `assistant`, or `system`.
    pub role: String,
    /// Message content.
    pub content: String,
}

/// Response body. Only the fields the engine reads.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatResponse {
    /// Completion choices; the engine uses the first.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One completion choice.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_the_standard_shape() {
        let body = r#"{
            "id": "cmpl-1",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "hi"}}],
            "usage": {"total_tokens": 7}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hi");
    }

    #[test]
    fn missing_choices_defaults_empty() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"id": "cmpl-1"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
