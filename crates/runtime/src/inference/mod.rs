//! Completion provider abstraction
//!
//! Defines the `CompletionProvider` trait ("submit a prompt, get free text
//! back or an error") and one adapter per remote wire shape. The classifier
//! only ever talks to the trait.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{ProviderConfig, ProviderKind};

mod http;
pub mod providers;

pub use providers::{AnthropicProvider, Endpoint, GeminiProvider, OpenAiProvider};

/// Errors that can occur during a completion call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InferenceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response parse error: {0}")]
    ParseError(String),

    #[error("Response contained no completion")]
    EmptyCompletion,

    #[error("Provider setup failed: {0}")]
    Setup(String),
}

/// A remote model that turns a prompt into free text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submit `prompt` and return the model's raw text reply.
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError>;

    /// Provider name for logging and health output.
    fn provider_name(&self) -> &str;

    /// Model that serves requests.
    fn model(&self) -> &str;
}

/// Build the adapter for a configured provider.
///
/// Returns `Ok(None)` when no API key is configured; that is the normal
/// heuristic-only mode, not an error.
pub fn provider_from_config(
    config: &ProviderConfig,
) -> Result<Option<Arc<dyn CompletionProvider>>, InferenceError> {
    let api_key = match config.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => {
            tracing::info!("No AI provider key configured, using keyword heuristic only");
            return Ok(None);
        }
    };

    let endpoint = Endpoint::new(
        api_key,
        config.base_url(),
        config.model(),
        config.timeout(),
    )?;

    tracing::info!(
        "AI provider initialized: provider={} model={} timeout={:?}",
        config.kind,
        endpoint.model(),
        endpoint.timeout()
    );

    let provider: Arc<dyn CompletionProvider> = match config.kind {
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(endpoint)),
        ProviderKind::OpenAi | ProviderKind::OpenRouter => Arc::new(OpenAiProvider::new(
            endpoint,
            config.kind,
            config.max_tokens,
        )),
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(endpoint, config.max_tokens)),
    };

    Ok(Some(provider))
}
