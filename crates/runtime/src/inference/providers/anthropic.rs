//! Anthropic Messages API adapter

use async_trait::async_trait;
use serde::Deserialize;

use super::Endpoint;
use crate::inference::{http, CompletionProvider, InferenceError};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

pub struct AnthropicProvider {
    endpoint: Endpoint,
    max_tokens: u32,
}

impl AnthropicProvider {
    pub fn new(endpoint: Endpoint, max_tokens: u32) -> Self {
        Self {
            endpoint,
            max_tokens,
        }
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let body = serde_json::json!({
            "model": self.endpoint.model,
            "max_tokens": self.max_tokens,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        let request = self
            .endpoint
            .client
            .post(self.endpoint.url("messages"))
            .header("x-api-key", &self.endpoint.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let response: MessagesResponse =
            http::send_json(self.provider_name(), request, self.endpoint.timeout).await?;

        // Content is a list of blocks; only text blocks carry the answer
        response
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or(InferenceError::EmptyCompletion)
    }

    fn provider_name(&self) -> &str {
        "Anthropic"
    }

    fn model(&self) -> &str {
        self.endpoint.model()
    }
}
