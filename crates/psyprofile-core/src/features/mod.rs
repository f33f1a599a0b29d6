//! Psycholinguistic feature extraction.
//!
//! Turns a character's dialogue lines into a [`MetricVector`]: named
//! lexical, syntactic, sentiment, part-of-speech and lexicon metrics plus a
//! fixed-layout numeric vector described by [`FeatureSchema`].
//!
//! # Example
//!
//! ```
//! use psyprofile_core::config::FeatureConfig;
//! use psyprofile_core::features::FeatureExtractor;
//!
//! let extractor = FeatureExtractor::new(FeatureConfig::default());
//! let vector = extractor.extract("VILLAIN", &["I hate you!", "Get out now!"]);
//! assert_eq!(vector.feature_vector().len(), extractor.schema().len());
//! ```

mod extractor;
mod lemma;
mod lexicon;
mod metrics;
mod pos;
mod schema;
mod sentiment;
mod stopwords;
mod text;

pub use extractor::FeatureExtractor;
pub use lemma::{Lemmatizer, RuleLemmatizer};
pub use lexicon::Lexicon;
pub use metrics::{
    DialogueMetrics, LexicalMetrics, MetricVector, PosDistribution, SyntacticMetrics,
};
pub use pos::{HeuristicPosTagger, PosTag, PosTagger};
pub use schema::{
    BaseFeature, FeatureSchema, FEATURE_SCHEMA_VERSION, LEXICON_FEATURE_PREFIX, NUM_BASE_FEATURES,
};
pub use sentiment::{LexiconSentimentAnalyzer, SentimentAnalyzer, SentimentScores};
pub use stopwords::is_stop_word;
pub use text::{split_sentences, tokenize};
