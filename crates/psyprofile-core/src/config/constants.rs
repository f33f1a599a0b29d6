//! Centralized default constants.
//!
//! Every threshold used by scoring, extraction and clustering lives here so
//! that configuration defaults, documentation and tests agree on one value.
//! All of them can be overridden through [`crate::config::Config`].

/// Archetype membership thresholds.
///
/// A character-archetype pair is a full member when `score >= MEMBERSHIP`,
/// a partial match when `PARTIAL <= score < MEMBERSHIP`, and unassigned
/// otherwise.
pub mod membership {
    /// Minimum score for full membership.
    pub const MEMBERSHIP: f64 = 0.45;

    /// Minimum score for a partial match.
    pub const PARTIAL: f64 = 0.30;
}

/// Feature extraction defaults.
pub mod features {
    /// Word count below which a vector carries a small-sample warning.
    pub const MIN_WORDS_FOR_RELIABLE: usize = 30;

    /// Number of ranked keywords kept per character.
    pub const TOP_KEYWORDS: usize = 15;

    /// Minimum token length for word-level statistics.
    pub const MIN_TOKEN_LEN: usize = 2;

    /// Minimum token length for keyword candidates.
    pub const MIN_KEYWORD_LEN: usize = 3;

    /// Sentences with fewer alphabetic words than this count as fragments.
    pub const FRAGMENT_WORDS: usize = 4;

    /// Divisor projecting average word length onto [0, 1].
    pub const WORD_LENGTH_SCALE: f64 = 10.0;

    /// Divisor projecting average sentence length onto [0, 1].
    pub const SENTENCE_LENGTH_SCALE: f64 = 30.0;

    /// Warning attached to vectors built from an empty corpus.
    pub const NO_DIALOGUE_WARNING: &str = "No dialogue found";

    /// Warning attached when extraction of one character panicked.
    pub const EXTRACTION_FAILED_WARNING: &str = "Feature extraction failed";
}

/// Clustering defaults.
pub mod clustering {
    /// Average-linkage cosine distance at or above which clusters stay apart.
    pub const DISTANCE_THRESHOLD: f64 = 0.5;
}

/// Narrative interpretation defaults.
pub mod interpretation {
    /// Environment variable holding the interpretation service API key.
    pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

    /// Default generative model.
    pub const MODEL: &str = "gemini-2.5-flash";

    /// Default service endpoint.
    pub const BASE_URL: &str = "https://generativelanguage.googleapis.com";

    /// Request timeout in seconds.
    pub const TIMEOUT_SECS: u64 = 120;

    /// Sampling temperature.
    pub const TEMPERATURE: f64 = 0.8;

    /// Reasoning token budget.
    pub const THINKING_BUDGET: u32 = 2048;

    /// Maximum characters of raw dialogue sent per character.
    pub const MAX_EXCERPT_CHARS: usize = 2000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_below_membership() {
        assert!(membership::PARTIAL < membership::MEMBERSHIP);
        assert!((membership::MEMBERSHIP - 0.45).abs() < f64::EPSILON);
        assert!((membership::PARTIAL - 0.30).abs() < f64::EPSILON);
        println!(
            "[PASS] test_partial_below_membership - partial={}, full={}",
            membership::PARTIAL,
            membership::MEMBERSHIP
        );
    }

    #[test]
    fn test_feature_defaults() {
        assert_eq!(features::MIN_WORDS_FOR_RELIABLE, 30);
        assert_eq!(features::TOP_KEYWORDS, 15);
        assert!((clustering::DISTANCE_THRESHOLD - 0.5).abs() < f64::EPSILON);
    }
}
