use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> ChatMessage {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion backend used to summarize search results.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Return the text of the first completion choice, untrimmed.
    async fn complete(&self, model: &str, messages: &[ChatMessage])
    -> Result<String, ProviderError>;

    fn name(&self) -> &'static str;
}

/// Client for Groq's OpenAI-compatible chat completions endpoint.
pub struct GroqChat {
    api_key: String,
    base_url: String,
    timeout: Duration,
    client: Client,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqChat {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<GroqChat, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Http {
                provider: "groq",
                message: format!("failed to build http client: {e}"),
            })?;
        Ok(GroqChat {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }
}

#[async_trait]
impl LlmProvider for GroqChat {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(model, messages = messages.len(), "sending chat completion");

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest { model, messages })
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(self.name(), self.timeout, e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: self.name(),
                status: status.as_u16(),
                body,
            });
        }

        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::from_reqwest(self.name(), self.timeout, e))?;
        let parsed: CompletionResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed {
                provider: self.name(),
                message: e.to_string(),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Malformed {
                provider: self.name(),
                message: "completion has no message content".to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "groq"
    }
}

#[test]
fn test_completion_request_shape() {
    let messages = vec![ChatMessage::user("hello")];
    let body = serde_json::to_value(CompletionRequest {
        model: "llama-3.1-8b-instant",
        messages: &messages,
    })
    .unwrap();

    assert_eq!(
        body,
        serde_json::json!({
            "model": "llama-3.1-8b-instant",
            "messages": [{"role": "user", "content": "hello"}]
        })
    );
}
