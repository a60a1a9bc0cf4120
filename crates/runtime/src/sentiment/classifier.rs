//! Delegating sentiment classifier
//!
//! Tries the configured remote model once per text and falls back to the
//! keyword heuristic whenever the remote path is missing, fails, or answers
//! with anything other than a single label word. `classify` never returns an
//! error; only batch shape violations are reported to callers.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use super::heuristic::{ConfidenceMode, HeuristicScorer};
use super::lexicon::KeywordLexicon;
use crate::config::{ClassifierConfig, HeuristicConfidence};
use crate::inference::{CompletionProvider, InferenceError};
use crate::types::{BatchError, BatchOutcome, ClassificationResult, SentimentLabel};

/// Confidence reported when no provider is configured
pub const NO_CREDENTIAL_CONFIDENCE: f64 = 0.8;
/// Confidence reported when the remote path failed for this call
pub const FALLBACK_CONFIDENCE: f64 = 0.5;
/// Confidence reported for an accepted remote label
pub const ACCEPTED_CONFIDENCE: f64 = 0.95;

/// Why a remote attempt was abandoned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    Transport,
    Timeout,
    Status(u16),
    MalformedResponse,
    EmptyCompletion,
    UnexpectedReply(String),
}

impl From<&InferenceError> for FallbackReason {
    fn from(err: &InferenceError) -> Self {
        match err {
            InferenceError::Transport(_) | InferenceError::Setup(_) => FallbackReason::Transport,
            InferenceError::Timeout(_) => FallbackReason::Timeout,
            InferenceError::Status { status, .. } => FallbackReason::Status(*status),
            InferenceError::ParseError(_) => FallbackReason::MalformedResponse,
            InferenceError::EmptyCompletion => FallbackReason::EmptyCompletion,
        }
    }
}

/// Terminal state reached by one `classify` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No provider configured, heuristic only
    NoCredential,
    /// Remote label accepted as-is
    Accepted,
    /// Remote path failed; heuristic label with the fallback confidence
    Fallback(FallbackReason),
}

/// A classification together with the path that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub label: SentimentLabel,
    pub confidence: f64,
    pub resolution: Resolution,
}

/// Prompt asking the remote model for exactly one label word
pub fn build_prompt(text: &str) -> String {
    format!(
        "Analyze the sentiment of this text and respond with ONLY one word: \
         \"positive\", \"negative\", or \"neutral\"\n\nText: \"{}\"\n\nResponse:",
        text
    )
}

/// Sentiment classifier shared across requests.
///
/// Cloning is cheap; the lexicon and provider are behind `Arc`s and never
/// mutated after construction.
#[derive(Clone)]
pub struct SentimentClassifier {
    scorer: HeuristicScorer,
    provider: Option<Arc<dyn CompletionProvider>>,
    no_credential_mode: ConfidenceMode,
    max_batch_size: usize,
    batch_concurrency: usize,
}

impl std::fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field(
                "provider",
                &self.provider.as_ref().map(|p| p.provider_name().to_string()),
            )
            .field("no_credential_mode", &self.no_credential_mode)
            .field("max_batch_size", &self.max_batch_size)
            .field("batch_concurrency", &self.batch_concurrency)
            .finish()
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default(), None)
    }
}

impl SentimentClassifier {
    pub fn new(config: &ClassifierConfig, provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        let lexicon = config.lexicon.clone().unwrap_or_default();
        let no_credential_mode = match config.heuristic_confidence {
            HeuristicConfidence::Fixed => ConfidenceMode::Fixed(NO_CREDENTIAL_CONFIDENCE),
            HeuristicConfidence::Ratio => ConfidenceMode::Ratio,
        };

        Self {
            scorer: HeuristicScorer::new(Arc::new(lexicon)),
            provider,
            no_credential_mode,
            max_batch_size: config.max_batch_size,
            batch_concurrency: config.batch_concurrency.max(1),
        }
    }

    /// Replace the lexicon used by the heuristic
    pub fn with_lexicon(mut self, lexicon: KeywordLexicon) -> Self {
        self.scorer = HeuristicScorer::new(Arc::new(lexicon));
        self
    }

    pub fn scorer(&self) -> &HeuristicScorer {
        &self.scorer
    }

    pub fn provider(&self) -> Option<&dyn CompletionProvider> {
        self.provider.as_deref()
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// Classify one text. Never fails.
    pub async fn classify(&self, text: &str) -> ClassificationResult {
        let verdict = self.evaluate(text).await;
        ClassificationResult {
            text: text.to_string(),
            label: verdict.label,
            confidence: verdict.confidence,
        }
    }

    /// Run the delegation state machine for one text
    pub async fn evaluate(&self, text: &str) -> Verdict {
        let Some(provider) = self.provider.as_deref() else {
            let (label, confidence) = self.scorer.classify(text, self.no_credential_mode);
            tracing::debug!("No AI provider, heuristic label={}", label);
            return Verdict {
                label,
                confidence,
                resolution: Resolution::NoCredential,
            };
        };

        tracing::debug!(
            "Requesting {} classification for text: {:.50}",
            provider.provider_name(),
            text
        );

        let reason = match provider.complete(&build_prompt(text)).await {
            Ok(reply) => match SentimentLabel::from_reply(&reply) {
                Some(label) => {
                    tracing::debug!(
                        "Using {} result: {} with score {}",
                        provider.provider_name(),
                        label,
                        ACCEPTED_CONFIDENCE
                    );
                    return Verdict {
                        label,
                        confidence: ACCEPTED_CONFIDENCE,
                        resolution: Resolution::Accepted,
                    };
                }
                None => {
                    tracing::warn!(
                        "Unexpected {} reply format: {:?}",
                        provider.provider_name(),
                        reply.trim()
                    );
                    FallbackReason::UnexpectedReply(reply.trim().to_string())
                }
            },
            Err(e) => {
                tracing::warn!(
                    "{} classification failed, using fallback: {}",
                    provider.provider_name(),
                    e
                );
                FallbackReason::from(&e)
            }
        };

        let (label, confidence) = self
            .scorer
            .classify(text, ConfidenceMode::Fixed(FALLBACK_CONFIDENCE));
        Verdict {
            label,
            confidence,
            resolution: Resolution::Fallback(reason),
        }
    }

    /// Check the shape of a batch without classifying anything
    pub fn check_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<(), BatchError> {
        if texts.is_empty() {
            return Err(BatchError::Empty);
        }
        if texts.len() > self.max_batch_size {
            return Err(BatchError::TooLarge {
                len: texts.len(),
                max: self.max_batch_size,
            });
        }
        Ok(())
    }

    /// Classify every text independently, preserving input order.
    ///
    /// Up to `batch_concurrency` items are in flight at once. Dropping the
    /// returned future stops new remote calls from being issued.
    pub async fn classify_batch<S: AsRef<str> + Sync>(
        &self,
        texts: &[S],
    ) -> Result<BatchOutcome, BatchError> {
        self.check_batch(texts)?;

        let results: Vec<ClassificationResult> = stream::iter(texts)
            .map(|text| self.classify(text.as_ref()))
            .buffered(self.batch_concurrency)
            .boxed()
            .collect()
            .await;

        let outcome = BatchOutcome::new(results);
        tracing::info!(
            "Batch classified: total={} positive={} negative={} neutral={}",
            outcome.summary.total,
            outcome.summary.positive,
            outcome.summary.negative,
            outcome.summary.neutral
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text_verbatim() {
        let prompt = build_prompt("It's \"fine\", I guess");
        assert!(prompt.contains("Text: \"It's \"fine\", I guess\""));
        assert!(prompt.contains("\"positive\", \"negative\", or \"neutral\""));
    }

    #[tokio::test]
    async fn test_no_credential_uses_fixed_confidence() {
        let classifier = SentimentClassifier::default();
        let verdict = classifier.evaluate("I love this, it is great").await;
        assert_eq!(verdict.label, SentimentLabel::Positive);
        assert_eq!(verdict.confidence, NO_CREDENTIAL_CONFIDENCE);
        assert_eq!(verdict.resolution, Resolution::NoCredential);
    }

    #[tokio::test]
    async fn test_no_credential_ratio_mode() {
        let config = ClassifierConfig {
            heuristic_confidence: HeuristicConfidence::Ratio,
            ..ClassifierConfig::default()
        };
        let classifier = SentimentClassifier::new(&config, None);

        let result = classifier.classify("great and good but sad").await;
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-9);

        let result = classifier.classify("").await;
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_check_batch_bounds() {
        let classifier = SentimentClassifier::default();
        let empty: Vec<String> = vec![];
        assert_eq!(classifier.check_batch(&empty), Err(BatchError::Empty));
        assert!(classifier.check_batch(&vec!["x"; 50]).is_ok());
        assert_eq!(
            classifier.check_batch(&vec!["x"; 51]),
            Err(BatchError::TooLarge { len: 51, max: 50 })
        );
    }

    #[test]
    fn test_fallback_reason_mapping() {
        assert_eq!(
            FallbackReason::from(&InferenceError::Status {
                status: 503,
                body: String::new()
            }),
            FallbackReason::Status(503)
        );
        assert_eq!(
            FallbackReason::from(&InferenceError::Timeout(std::time::Duration::from_secs(1))),
            FallbackReason::Timeout
        );
        assert_eq!(
            FallbackReason::from(&InferenceError::ParseError("eof".into())),
            FallbackReason::MalformedResponse
        );
    }
}
