//! Core types and data structures for sentiment classification

use serde::{Deserialize, Serialize};

pub mod error;

pub use error::*;

/// Sentiment label assigned to a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    /// The lowercase word used on the wire and in prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Parse a model reply. The reply must be exactly one label word once
    /// surrounding whitespace is trimmed and case is folded.
    pub fn from_reply(reply: &str) -> Option<Self> {
        let normalized = reply.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == normalized)
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reply(s).ok_or_else(|| format!("unknown sentiment label: {}", s))
    }
}

/// Outcome of classifying one text item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The submitted text, unchanged
    pub text: String,
    #[serde(rename = "sentiment")]
    pub label: SentimentLabel,
    /// Confidence in `[0, 1]`
    #[serde(rename = "score")]
    pub confidence: f64,
}

/// Per-label tally over a batch of results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl BatchSummary {
    /// Tally results by label. `total` is the number of results seen.
    pub fn tally<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassificationResult>,
    {
        results
            .into_iter()
            .fold(Self::default(), |mut summary, result| {
                summary.record(result.label);
                summary
            })
    }

    fn record(&mut self, label: SentimentLabel) {
        self.total += 1;
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }
}

/// Ordered results of a batch plus their summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<ClassificationResult>,
    pub summary: BatchSummary,
}

impl BatchOutcome {
    pub fn new(results: Vec<ClassificationResult>) -> Self {
        let summary = BatchSummary::tally(&results);
        Self { results, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_reply_trims_and_folds_case() {
        assert_eq!(
            SentimentLabel::from_reply("  Positive\n"),
            Some(SentimentLabel::Positive)
        );
        assert_eq!(
            SentimentLabel::from_reply("NEUTRAL"),
            Some(SentimentLabel::Neutral)
        );
        assert_eq!(SentimentLabel::from_reply("positive."), None);
        assert_eq!(SentimentLabel::from_reply("mostly negative"), None);
        assert_eq!(SentimentLabel::from_reply(""), None);
    }

    #[test]
    fn test_result_wire_field_names() {
        let result = ClassificationResult {
            text: "hi".to_string(),
            label: SentimentLabel::Negative,
            confidence: 0.5,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sentiment"], "negative");
        assert_eq!(json["score"], 0.5);
        assert_eq!(json["text"], "hi");
    }

    #[test]
    fn test_summary_counts_sum_to_total() {
        let make = |label| ClassificationResult {
            text: String::new(),
            label,
            confidence: 0.8,
        };
        let results = vec![
            make(SentimentLabel::Positive),
            make(SentimentLabel::Positive),
            make(SentimentLabel::Neutral),
            make(SentimentLabel::Negative),
        ];

        let outcome = BatchOutcome::new(results);
        assert_eq!(
            outcome.summary,
            BatchSummary {
                total: 4,
                positive: 2,
                negative: 1,
                neutral: 1,
            }
        );
    }
}
