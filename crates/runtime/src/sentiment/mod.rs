//! Sentiment classification policy
//!
//! The keyword heuristic, the delegating classifier built on top of it, and
//! batch aggregation.

pub mod classifier;
pub mod heuristic;
pub mod lexicon;

pub use classifier::{
    build_prompt, FallbackReason, Resolution, SentimentClassifier, Verdict,
    ACCEPTED_CONFIDENCE, FALLBACK_CONFIDENCE, NO_CREDENTIAL_CONFIDENCE,
};
pub use heuristic::{classify_heuristic, ConfidenceMode, CueTally, HeuristicScorer};
pub use lexicon::{KeywordLexicon, LexiconError};
