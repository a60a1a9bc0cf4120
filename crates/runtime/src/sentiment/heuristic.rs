//! Keyword-counting sentiment heuristic
//!
//! Counts how many positive and negative cues occur in the lowercased text
//! and picks the side with more hits. Each cue counts once no matter how
//! often it repeats.

use std::sync::Arc;

use super::lexicon::KeywordLexicon;
use crate::types::SentimentLabel;

/// How the heuristic turns a cue tally into a confidence value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidenceMode {
    /// Report the given sentinel regardless of the tally
    Fixed(f64),
    /// `max(pos, neg) / (pos + neg)`, or 0.5 when tied
    Ratio,
}

/// Number of distinct positive and negative cues found in a text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CueTally {
    pub positive: usize,
    pub negative: usize,
}

impl CueTally {
    pub fn label(&self) -> SentimentLabel {
        use std::cmp::Ordering;

        match self.positive.cmp(&self.negative) {
            Ordering::Greater => SentimentLabel::Positive,
            Ordering::Less => SentimentLabel::Negative,
            Ordering::Equal => SentimentLabel::Neutral,
        }
    }

    /// Share of the winning side. Ties, including 0/0, report 0.5.
    pub fn ratio_confidence(&self) -> f64 {
        let total = self.positive + self.negative;
        if total == 0 || self.positive == self.negative {
            return 0.5;
        }
        self.positive.max(self.negative) as f64 / total as f64
    }

    pub fn confidence(&self, mode: ConfidenceMode) -> f64 {
        match mode {
            ConfidenceMode::Fixed(value) => value.clamp(0.0, 1.0),
            ConfidenceMode::Ratio => self.ratio_confidence(),
        }
    }
}

/// Deterministic scorer over a shared, immutable lexicon
#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    lexicon: Arc<KeywordLexicon>,
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new(Arc::new(KeywordLexicon::default()))
    }
}

impl HeuristicScorer {
    pub fn new(lexicon: Arc<KeywordLexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &KeywordLexicon {
        &self.lexicon
    }

    pub fn tally(&self, text: &str) -> CueTally {
        let normalized = text.to_lowercase();
        CueTally {
            positive: count_hits(&normalized, self.lexicon.positive()),
            negative: count_hits(&normalized, self.lexicon.negative()),
        }
    }

    /// Classify `text`, reporting confidence according to `mode`
    pub fn classify(&self, text: &str, mode: ConfidenceMode) -> (SentimentLabel, f64) {
        let tally = self.tally(text);
        (tally.label(), tally.confidence(mode))
    }
}

fn count_hits<'a>(text: &str, cues: impl Iterator<Item = &'a str>) -> usize {
    cues.filter(|cue| text.contains(cue)).count()
}

/// Classify with the built-in lexicon in ratio mode
pub fn classify_heuristic(text: &str) -> (SentimentLabel, f64) {
    HeuristicScorer::default().classify(text, ConfidenceMode::Ratio)
}
