//! Sentiment classification runtime
//!
//! Classifies text as positive, negative or neutral. A remote language model
//! is consulted when a credential is configured; a keyword heuristic answers
//! otherwise and whenever the remote path fails.

pub mod config;
pub mod inference;
pub mod sentiment;
pub mod types;

#[cfg(feature = "http-api")]
pub mod api;

pub use config::{Config, ConfigError};
pub use sentiment::SentimentClassifier;
pub use types::*;

/// Build a classifier from configuration, creating the remote provider when
/// a credential is present.
pub fn classifier_from_config(config: &Config) -> Result<SentimentClassifier, RuntimeError> {
    let provider = inference::provider_from_config(&config.provider)
        .map_err(|e| RuntimeError::Internal(format!("Failed to initialize AI provider: {}", e)))?;
    Ok(SentimentClassifier::new(&config.classifier, provider))
}
