//! OpenAI-compatible chat completions adapter (OpenAI, OpenRouter)

use async_trait::async_trait;
use serde::Deserialize;

use super::Endpoint;
use crate::config::ProviderKind;
use crate::inference::{http, CompletionProvider, InferenceError};

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

/// Chat completions adapter for OpenAI and OpenRouter
pub struct OpenAiProvider {
    endpoint: Endpoint,
    kind: ProviderKind,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(endpoint: Endpoint, kind: ProviderKind, max_tokens: u32) -> Self {
        Self {
            endpoint,
            kind,
            max_tokens,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let body = serde_json::json!({
            "model": self.endpoint.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "max_tokens": self.max_tokens,
            "temperature": 0.0
        });

        let request = self
            .endpoint
            .client
            .post(self.endpoint.url("chat/completions"))
            .bearer_auth(&self.endpoint.api_key)
            .json(&body);

        let response: ChatResponse =
            http::send_json(self.provider_name(), request, self.endpoint.timeout).await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                "LLM usage: provider={} model={} prompt_tokens={} completion_tokens={}",
                self.kind,
                self.endpoint.model,
                usage.prompt_tokens,
                usage.completion_tokens,
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(InferenceError::EmptyCompletion)
    }

    fn provider_name(&self) -> &str {
        self.kind.name()
    }

    fn model(&self) -> &str {
        self.endpoint.model()
    }
}
