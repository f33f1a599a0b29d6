//! Feature schema: the single owner of feature-vector layout.
//!
//! A vector is the 15 base features in [`BaseFeature::ALL`] order followed
//! by one `liwc_<category>` entry per lexicon category, sorted by category
//! name. Every value is projected onto [0, 1] here and nowhere else.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::lexicon::Lexicon;
use super::metrics::{DialogueMetrics, MetricVector};
use crate::config::constants::features::{SENTENCE_LENGTH_SCALE, WORD_LENGTH_SCALE};
use crate::error::{CoreError, CoreResult};

/// Version of the vector layout. Bump whenever base features change.
pub const FEATURE_SCHEMA_VERSION: u32 = 1;

/// Prefix of lexicon-category feature names.
pub const LEXICON_FEATURE_PREFIX: &str = "liwc_";

/// Number of base (non-lexicon) features.
pub const NUM_BASE_FEATURES: usize = 15;

static STANDARD_SCHEMA: Lazy<Arc<FeatureSchema>> =
    Lazy::new(|| Arc::new(FeatureSchema::new(&Lexicon::standard())));

/// The fixed scalar features preceding the lexicon block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseFeature {
    AvgWordLength,
    TypeTokenRatio,
    HapaxRatio,
    AvgSentenceLength,
    QuestionRatio,
    ExclamationRatio,
    FragmentRatio,
    SentimentPositive,
    SentimentNegative,
    SentimentNeutral,
    SentimentCompoundShifted,
    NounPct,
    VerbPct,
    AdjPct,
    AdvPct,
}

impl BaseFeature {
    /// Base features in vector order.
    pub const ALL: [BaseFeature; NUM_BASE_FEATURES] = [
        Self::AvgWordLength,
        Self::TypeTokenRatio,
        Self::HapaxRatio,
        Self::AvgSentenceLength,
        Self::QuestionRatio,
        Self::ExclamationRatio,
        Self::FragmentRatio,
        Self::SentimentPositive,
        Self::SentimentNegative,
        Self::SentimentNeutral,
        Self::SentimentCompoundShifted,
        Self::NounPct,
        Self::VerbPct,
        Self::AdjPct,
        Self::AdvPct,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::AvgWordLength => "avg_word_length",
            Self::TypeTokenRatio => "type_token_ratio",
            Self::HapaxRatio => "hapax_ratio",
            Self::AvgSentenceLength => "avg_sentence_length",
            Self::QuestionRatio => "question_ratio",
            Self::ExclamationRatio => "exclamation_ratio",
            Self::FragmentRatio => "fragment_ratio",
            Self::SentimentPositive => "sentiment_positive",
            Self::SentimentNegative => "sentiment_negative",
            Self::SentimentNeutral => "sentiment_neutral",
            Self::SentimentCompoundShifted => "sentiment_compound_shifted",
            Self::NounPct => "noun_pct",
            Self::VerbPct => "verb_pct",
            Self::AdjPct => "adj_pct",
            Self::AdvPct => "adv_pct",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Projected [0, 1] value of this feature.
    pub fn project(self, m: &DialogueMetrics) -> f64 {
        let value = match self {
            Self::AvgWordLength => m.lexical.avg_word_length / WORD_LENGTH_SCALE,
            Self::TypeTokenRatio => m.lexical.type_token_ratio,
            Self::HapaxRatio => m.lexical.hapax_ratio,
            Self::AvgSentenceLength => m.syntactic.avg_sentence_length / SENTENCE_LENGTH_SCALE,
            Self::QuestionRatio => m.syntactic.question_ratio,
            Self::ExclamationRatio => m.syntactic.exclamation_ratio,
            Self::FragmentRatio => m.syntactic.fragment_ratio,
            Self::SentimentPositive => m.sentiment.positive,
            Self::SentimentNegative => m.sentiment.negative,
            Self::SentimentNeutral => m.sentiment.neutral,
            Self::SentimentCompoundShifted => (m.sentiment.compound + 1.0) / 2.0,
            Self::NounPct => m.pos.noun_pct,
            Self::VerbPct => m.pos.verb_pct,
            Self::AdjPct => m.pos.adj_pct,
            Self::AdvPct => m.pos.adv_pct,
        };
        clamp_unit(value)
    }

    /// Set the underlying metric so that [`project`](Self::project) yields
    /// `value`. Used to build synthetic metrics.
    pub fn apply(self, m: &mut DialogueMetrics, value: f64) {
        let value = clamp_unit(value);
        match self {
            Self::AvgWordLength => m.lexical.avg_word_length = value * WORD_LENGTH_SCALE,
            Self::TypeTokenRatio => m.lexical.type_token_ratio = value,
            Self::HapaxRatio => m.lexical.hapax_ratio = value,
            Self::AvgSentenceLength => {
                m.syntactic.avg_sentence_length = value * SENTENCE_LENGTH_SCALE
            }
            Self::QuestionRatio => m.syntactic.question_ratio = value,
            Self::ExclamationRatio => m.syntactic.exclamation_ratio = value,
            Self::FragmentRatio => m.syntactic.fragment_ratio = value,
            Self::SentimentPositive => m.sentiment.positive = value,
            Self::SentimentNegative => m.sentiment.negative = value,
            Self::SentimentNeutral => m.sentiment.neutral = value,
            Self::SentimentCompoundShifted => m.sentiment.compound = value * 2.0 - 1.0,
            Self::NounPct => m.pos.noun_pct = value,
            Self::VerbPct => m.pos.verb_pct = value,
            Self::AdjPct => m.pos.adj_pct = value,
            Self::AdvPct => m.pos.adv_pct = value,
        }
    }
}

#[inline]
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Ordered, versioned list of feature names.
///
/// Shared read-only (behind `Arc`) by the extractor, scorer, similarity
/// engine and cluster engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    version: u32,
    names: Vec<String>,
    categories: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Schema for the base features plus the categories of `lexicon`.
    pub fn new(lexicon: &Lexicon) -> Self {
        let categories: Vec<String> = lexicon.category_names().map(str::to_string).collect();

        let names: Vec<String> = BaseFeature::ALL
            .iter()
            .map(|f| f.name().to_string())
            .chain(
                categories
                    .iter()
                    .map(|c| format!("{}{}", LEXICON_FEATURE_PREFIX, c)),
            )
            .collect();

        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Self {
            version: FEATURE_SCHEMA_VERSION,
            names,
            categories,
            index,
        }
    }

    /// Shared schema for the standard lexicon (L = 27).
    pub fn standard() -> Arc<FeatureSchema> {
        Arc::clone(&STANDARD_SCHEMA)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Vector length L.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Feature names in vector order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Lexicon category names in vector order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Project named metrics into the ordered [0, 1] vector.
    ///
    /// Categories missing from `metrics.lexicon` contribute 0.
    pub fn project(&self, metrics: &DialogueMetrics) -> Vec<f64> {
        let mut vector = Vec::with_capacity(self.len());
        vector.extend(BaseFeature::ALL.iter().map(|f| f.project(metrics)));
        vector.extend(
            self.categories
                .iter()
                .map(|c| clamp_unit(metrics.lexicon.get(c).copied().unwrap_or(0.0))),
        );
        vector
    }

    /// Reject a vector produced under a different layout: another version,
    /// another length, or other lexicon categories in another order.
    pub fn check_compatible(&self, vector: &MetricVector) -> CoreResult<()> {
        let len = vector.feature_vector().len();
        if vector.schema_version() != self.version || len != self.len() {
            return Err(CoreError::SchemaMismatch {
                expected_version: self.version,
                expected_len: self.len(),
                actual_version: vector.schema_version(),
                actual_len: len,
            });
        }
        if vector.categories() != self.categories.as_slice() {
            return Err(CoreError::FeatureNamesMismatch {
                expected: self.categories.clone(),
                actual: vector.categories().to_vec(),
            });
        }
        Ok(())
    }

    /// Set a named feature on `metrics` so that projection yields `value`.
    ///
    /// Returns `false` when the name is not part of this schema.
    pub fn apply(&self, metrics: &mut DialogueMetrics, name: &str, value: f64) -> bool {
        if let Some(base) = BaseFeature::from_name(name) {
            base.apply(metrics, value);
            return true;
        }
        match name.strip_prefix(LEXICON_FEATURE_PREFIX) {
            Some(category) if self.categories.iter().any(|c| c == category) => {
                metrics.lexicon.insert(category.to_string(), clamp_unit(value));
                true
            }
            _ => false,
        }
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::new(&Lexicon::standard())
    }
}
