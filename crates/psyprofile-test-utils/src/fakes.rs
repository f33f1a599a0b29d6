//! Fake analysis backends.
//!
//! Each one implements a core backend trait with deterministic behavior so
//! tests can exercise the extractor's fallbacks.

use psyprofile_core::features::{Lemmatizer, PosTag, PosTagger, SentimentAnalyzer, SentimentScores};
use psyprofile_core::BackendError;

/// Returns the same scores for every sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSentiment(pub SentimentScores);

impl SentimentAnalyzer for FixedSentiment {
    fn name(&self) -> &str {
        "fixed-sentiment"
    }

    fn polarity_scores(&self, _sentence: &str) -> Result<SentimentScores, BackendError> {
        Ok(self.0)
    }
}

/// Fails on every sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSentiment;

impl SentimentAnalyzer for FailingSentiment {
    fn name(&self) -> &str {
        "failing-sentiment"
    }

    fn polarity_scores(&self, _sentence: &str) -> Result<SentimentScores, BackendError> {
        Err(BackendError::new("sentiment", "lexicon unavailable"))
    }
}

/// Fails on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingTagger;

impl PosTagger for FailingTagger {
    fn name(&self) -> &str {
        "failing-tagger"
    }

    fn tag(&self, _tokens: &[String]) -> Result<Vec<PosTag>, BackendError> {
        Err(BackendError::new("pos-tagger", "model unavailable"))
    }
}

/// Panics when it sees the trigger word.
#[derive(Debug, Clone)]
pub struct PanickingTagger {
    pub trigger: String,
}

impl PanickingTagger {
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
        }
    }
}

impl PosTagger for PanickingTagger {
    fn name(&self) -> &str {
        "panicking-tagger"
    }

    fn tag(&self, tokens: &[String]) -> Result<Vec<PosTag>, BackendError> {
        if tokens.iter().any(|t| *t == self.trigger) {
            panic!("tagger crashed on '{}'", self.trigger);
        }
        Ok(vec![PosTag::Noun; tokens.len()])
    }
}

/// Fails on every word.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingLemmatizer;

impl Lemmatizer for FailingLemmatizer {
    fn name(&self) -> &str {
        "failing-lemmatizer"
    }

    fn lemmatize(&self, _word: &str, _tag: PosTag) -> Result<String, BackendError> {
        Err(BackendError::new("lemmatizer", "dictionary unavailable"))
    }
}
