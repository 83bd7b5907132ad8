//! OpenAI-compatible chat-completions delegate.
//!
//! One bounded, non-streaming request per fallback turn. Anything that is
//! not a 2xx response carrying the expected schema is a [`DelegateError`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use frontdesk_core::Sentiment;
use frontdesk_settings::DelegateSettings;
use metrics::{counter, histogram};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, instrument, warn};

use crate::delegate::{AiDelegate, GenerateOptions};
use crate::errors::{DelegateError, DelegateResult};
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Temperature used for negative-sentiment turns.
const CAREFUL_TEMPERATURE: f32 = 0.3;

/// Delegate endpoint configuration.
#[derive(Clone, Debug)]
pub struct ChatCompletionConfig {
    /// Base URL, e.g. `https://api.deepseek.com`.
    pub base_url: String,
    /// Bearer token. `None` disables the delegate.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Default sampling temperature.
    pub temperature: f32,
    /// End-to-end request timeout.
    pub timeout: Duration,
}

impl From<&DelegateSettings> for ChatCompletionConfig {
    fn from(settings: &DelegateSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

/// Chat-completions HTTP delegate.
pub struct ChatCompletionDelegate {
    config: ChatCompletionConfig,
    client: reqwest::Client,
}

impl ChatCompletionDelegate {
    /// Create a delegate from the operator settings' delegate section.
    pub fn from_settings(settings: &DelegateSettings) -> Self {
        Self::new(ChatCompletionConfig::from(settings))
    }

    /// Create a delegate with its own HTTP client.
    pub fn new(config: ChatCompletionConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Create a delegate sharing an existing HTTP client.
    ///
    /// The shared client's own timeout (if any) still applies; the
    /// configured timeout is enforced per-request either way.
    pub fn with_client(config: ChatCompletionConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn build_headers(&self) -> DelegateResult<HeaderMap> {
        let api_key = self.config.api_key.as_deref().ok_or(DelegateError::Disabled)?;
        let mut headers = HeaderMap::new();
        let _ = headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth = format!("Bearer {api_key}");
        let _ = headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|e| DelegateError::InvalidResponse(format!("invalid API key: {e}")))?,
        );
        Ok(headers)
    }

    fn temperature_for(&self, sentiment: Sentiment) -> f32 {
        match sentiment {
            Sentiment::Negative => CAREFUL_TEMPERATURE,
            Sentiment::Positive | Sentiment::Neutral => self.config.temperature,
        }
    }
}

#[async_trait]
impl AiDelegate for ChatCompletionDelegate {
    #[instrument(skip(self, context), fields(model = %self.config.model))]
    async fn generate(&self, context: &str, opts: GenerateOptions) -> DelegateResult<String> {
        let headers = self.build_headers()?;
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_owned(),
                content: context.to_owned(),
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.temperature_for(opts.sentiment),
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        counter!("frontdesk_delegate_requests_total").increment(1);
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await?;

        histogram!("frontdesk_delegate_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "delegate returned error status");
            return Err(DelegateError::Status {
                status: status.as_u16(),
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| DelegateError::InvalidResponse(e.to_string()))?;

        let content = body
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| DelegateError::InvalidResponse("empty choices".to_owned()))?;

        debug!(chars = content.len(), "delegate reply received");
        Ok(content.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn delegate_for(server: &MockServer, timeout: Duration) -> ChatCompletionDelegate {
        ChatCompletionDelegate::new(ChatCompletionConfig {
            base_url: server.uri(),
            api_key: Some("test-key".to_owned()),
            model: "deepseek-chat".to_owned(),
            max_tokens: 300,
            temperature: 0.7,
            timeout,
        })
    }

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        })
    }

    #[tokio::test]
    async fn successful_generation_returns_trimmed_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  hi there  ")))
            .expect(1)
            .mount(&server)
            .await;

        let delegate = delegate_for(&server, Duration::from_secs(5));
        let reply = delegate.generate("ctx", GenerateOptions::default()).await.unwrap();
        assert_eq!(reply, "hi there");
    }

    #[tokio::test]
    async fn negative_sentiment_lowers_temperature() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"temperature": 0.3})))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let delegate = delegate_for(&server, Duration::from_secs(5));
        let opts = GenerateOptions {
            sentiment: Sentiment::Negative,
        };
        let _ = delegate.generate("ctx", opts).await.unwrap();
    }

    #[tokio::test]
    async fn non_2xx_is_a_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let delegate = delegate_for(&server, Duration::from_secs(5));
        let err = delegate.generate("ctx", GenerateOptions::default()).await.unwrap_err();
        assert_matches!(err, DelegateError::Status { status: 500 });
    }

    #[tokio::test]
    async fn schema_invalid_body_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let delegate = delegate_for(&server, Duration::from_secs(5));
        let err = delegate.generate("ctx", GenerateOptions::default()).await.unwrap_err();
        assert_matches!(err, DelegateError::InvalidResponse(_));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("late"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let delegate = delegate_for(&server, Duration::from_millis(100));
        let err = delegate.generate("ctx", GenerateOptions::default()).await.unwrap_err();
        assert_matches!(err, DelegateError::Timeout);
    }

    #[test]
    fn config_maps_from_delegate_settings() {
        let settings = DelegateSettings {
            api_key: Some("live-key".to_owned()),
            timeout_secs: 12,
            ..DelegateSettings::default()
        };
        let config = ChatCompletionConfig::from(&settings);
        assert_eq!(config.base_url, settings.base_url);
        assert_eq!(config.api_key.as_deref(), Some("live-key"));
        assert_eq!(config.model, settings.model);
        assert_eq!(config.max_tokens, settings.max_tokens);
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[tokio::test]
    async fn default_settings_leave_the_delegate_disabled() {
        let delegate = ChatCompletionDelegate::from_settings(&DelegateSettings::default());
        let err = delegate.generate("ctx", GenerateOptions::default()).await.unwrap_err();
        assert_matches!(err, DelegateError::Disabled);
    }

    #[tokio::test]
    async fn missing_api_key_is_disabled() {
        let delegate = ChatCompletionDelegate::new(ChatCompletionConfig {
            base_url: "http://localhost:1".to_owned(),
            api_key: None,
            model: "deepseek-chat".to_owned(),
            max_tokens: 300,
            temperature: 0.7,
            timeout: Duration::from_secs(1),
        });
        let err = delegate.generate("ctx", GenerateOptions::default()).await.unwrap_err();
        assert_matches!(err, DelegateError::Disabled);
    }
}
