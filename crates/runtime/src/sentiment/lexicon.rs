//! Keyword lexicon for the heuristic scorer

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_POSITIVE: [&str; 9] = [
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "love",
    "happy",
    "awesome",
    "fantastic",
];

const DEFAULT_NEGATIVE: [&str; 9] = [
    "bad",
    "terrible",
    "awful",
    "hate",
    "horrible",
    "sad",
    "angry",
    "worst",
    "disappointed",
];

/// Errors raised while building a lexicon
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexiconError {
    #[error("cue list contains an empty entry")]
    EmptyCue,

    #[error("cue '{0}' appears in both the positive and negative lists")]
    Overlap(String),
}

/// Two disjoint sets of lowercase cues.
///
/// Cues are matched as plain substrings of the lowercased input, so a cue
/// like `sad` also fires inside `saddle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CueLists", into = "CueLists")]
pub struct KeywordLexicon {
    positive: BTreeSet<String>,
    negative: BTreeSet<String>,
}

impl KeywordLexicon {
    pub fn new<P, N, S>(positive: P, negative: N) -> Result<Self, LexiconError>
    where
        P: IntoIterator<Item = S>,
        N: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let positive = normalize_cues(positive)?;
        let negative = normalize_cues(negative)?;

        if let Some(shared) = positive.intersection(&negative).next() {
            return Err(LexiconError::Overlap(shared.clone()));
        }

        Ok(Self { positive, negative })
    }

    pub fn positive(&self) -> impl Iterator<Item = &str> {
        self.positive.iter().map(String::as_str)
    }

    pub fn negative(&self) -> impl Iterator<Item = &str> {
        self.negative.iter().map(String::as_str)
    }
}

impl Default for KeywordLexicon {
    fn default() -> Self {
        Self {
            positive: DEFAULT_POSITIVE.iter().map(|s| s.to_string()).collect(),
            negative: DEFAULT_NEGATIVE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn normalize_cues<I, S>(cues: I) -> Result<BTreeSet<String>, LexiconError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cues.into_iter()
        .map(|cue| {
            let cue = cue.as_ref().trim().to_lowercase();
            if cue.is_empty() {
                Err(LexiconError::EmptyCue)
            } else {
                Ok(cue)
            }
        })
        .collect()
}

/// Serialized form used in configuration files
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CueLists {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl TryFrom<CueLists> for KeywordLexicon {
    type Error = LexiconError;

    fn try_from(lists: CueLists) -> Result<Self, Self::Error> {
        KeywordLexicon::new(lists.positive, lists.negative)
    }
}

impl From<KeywordLexicon> for CueLists {
    fn from(lexicon: KeywordLexicon) -> Self {
        Self {
            positive: lexicon.positive.into_iter().collect(),
            negative: lexicon.negative.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon_is_disjoint() {
        let lexicon = KeywordLexicon::default();
        assert_eq!(lexicon.positive().count(), 9);
        assert_eq!(lexicon.negative().count(), 9);
        for cue in lexicon.positive() {
            assert!(lexicon.negative().all(|n| n != cue));
        }
    }

    #[test]
    fn test_cues_are_lowercased_and_deduplicated() {
        let lexicon = KeywordLexicon::new(["Brilliant", "brilliant "], ["Dull"]).unwrap();
        assert_eq!(lexicon.positive().collect::<Vec<_>>(), vec!["brilliant"]);
        assert_eq!(lexicon.negative().collect::<Vec<_>>(), vec!["dull"]);
    }

    #[test]
    fn test_overlapping_cues_rejected() {
        let err = KeywordLexicon::new(["fine", "ok"], ["OK"]).unwrap_err();
        assert_eq!(err, LexiconError::Overlap("ok".to_string()));
    }

    #[test]
    fn test_empty_cue_rejected() {
        let err = KeywordLexicon::new(["good", "  "], ["bad"]).unwrap_err();
        assert_eq!(err, LexiconError::EmptyCue);
    }

    #[test]
    fn test_deserialize_validates() {
        let parsed: Result<KeywordLexicon, _> =
            toml::from_str("positive = [\"up\"]\nnegative = [\"up\"]\n");
        assert!(parsed.is_err());

        let parsed: KeywordLexicon =
            toml::from_str("positive = [\"up\"]\nnegative = [\"down\"]\n").unwrap();
        assert_eq!(parsed.positive().collect::<Vec<_>>(), vec!["up"]);
    }
}
