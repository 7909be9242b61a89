//! OpenAI-compatible chat-completions client
//!
//! Works against api.openai.com or any server speaking the same protocol
//! (vLLM and friends). Performs exactly one request per call; retries are
//! the engine's job.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{ChatClient, LlmError, Message};
use crate::config::ModelConfig;

/// OpenAI-compatible API client
pub struct OpenAiClient {
    model: String,
    api_key: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
    http: Client,
}

impl OpenAiClient {
    /// Create a client from a model configuration
    ///
    /// Reads the API key from the environment variable named in the config
    /// and builds a reqwest client with the configured per-request timeout.
    pub fn from_config(config: &ModelConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, base_url = %config.base_url, "from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            http,
        })
    }

    /// Build the request body for the chat-completions endpoint
    fn build_request_body(&self, conversation: &[Message]) -> serde_json::Value {
        debug!(%self.model, message_count = conversation.len(), "build_request_body: called");
        serde_json::json!({
            "model": self.model,
            "messages": conversation,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        })
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, conversation: &[Message]) -> Result<String, LlmError> {
        debug!(%self.model, message_count = conversation.len(), "complete: called");
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_request_body(conversation);

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "complete: API error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: ChatCompletionResponse = response.json().await?;
        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("response contained no choices".to_string()))?;

        choice
            .message
            .content
            .ok_or_else(|| LlmError::InvalidResponse("response choice had no content".to_string()))
    }
}

// Chat-completions API response types

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OpenAiClient {
        OpenAiClient {
            model: "gpt-4".to_string(),
            api_key: "test-key".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.0,
            max_tokens: 256,
            http: Client::new(),
        }
    }

    #[test]
    fn test_build_request_body() {
        let client = test_client();
        let conversation = vec![Message::user("Hello!"), Message::assistant("Hi.")];

        let body = client.build_request_body(&conversation);

        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Hello!");
        assert_eq!(body["messages"][1]["role"], "assistant");
    }

    #[test]
    fn test_parse_response_shape() {
        let json = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "Major errors: none" } }
            ]
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Major errors: none")
        );
    }
}
