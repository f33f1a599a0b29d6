//! The archetype catalog.
//!
//! A catalog is an ordered, validated list of [`ArchetypeDefinition`]s.
//! Declaration order is significant: it breaks score ties and fixes the
//! order of registry entries. Catalogs can be loaded from TOML or JSON:
//!
//! ```toml
//! [[archetypes]]
//! name = "The Aggressor"
//! description = "Dominant, confrontational personality."
//! criteria = [
//!     { feature = "liwc_anger", ideal = 0.8, weight = 1.0 },
//!     { feature = "fragment_ratio", ideal = 0.8, weight = 0.9 },
//! ]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::definition::{ArchetypeDefinition, Criterion};
use crate::error::{CoreError, CoreResult};
use crate::features::FeatureSchema;

type CriteriaTable = &'static [(&'static str, f64, f64)];

const STANDARD_ARCHETYPES: &[(&str, &str, CriteriaTable)] = &[
    (
        "The Aggressor",
        "Dominant, confrontational personality. Uses short, direct sentences. \
         High negative emotion and anger vocabulary. Speaks to control.",
        &[
            ("fragment_ratio", 0.8, 0.9),
            ("avg_sentence_length", 0.2, 0.7),
            ("sentiment_negative", 0.8, 0.8),
            ("liwc_anger", 0.8, 1.0),
            ("liwc_power", 0.7, 0.8),
            ("liwc_negative_emotion", 0.8, 0.7),
            ("exclamation_ratio", 0.7, 0.5),
            ("question_ratio", 0.2, 0.3),
        ],
    ),
    (
        "The Intellectual",
        "Analytical, deliberate thinker. Uses longer, complex sentences. \
         High cognitive vocabulary. Tends toward neutral or measured emotion.",
        &[
            ("avg_sentence_length", 0.8, 0.9),
            ("liwc_cognitive", 0.8, 1.0),
            ("type_token_ratio", 0.8, 0.7),
            ("adj_pct", 0.7, 0.6),
            ("sentiment_neutral", 0.7, 0.5),
            ("fragment_ratio", 0.2, 0.6),
            ("liwc_certainty", 0.7, 0.5),
        ],
    ),
    (
        "The Emotionalist",
        "Driven by feelings. High affective language, both positive and negative. \
         Emotional volatility visible in sentiment swings. Expressive syntax.",
        &[
            ("liwc_positive_emotion", 0.7, 0.8),
            ("liwc_negative_emotion", 0.6, 0.6),
            ("liwc_sadness", 0.6, 0.7),
            ("sentiment_positive", 0.6, 0.6),
            ("exclamation_ratio", 0.7, 0.7),
            ("liwc_social", 0.7, 0.6),
            ("question_ratio", 0.5, 0.4),
        ],
    ),
    (
        "The Controller",
        "Strategic, authoritative speaker. Uses power and achievement language. \
         Measured emotion, factual delivery. Commands rather than requests.",
        &[
            ("liwc_power", 0.8, 1.0),
            ("liwc_achievement", 0.7, 0.8),
            ("liwc_certainty", 0.8, 0.7),
            ("sentiment_neutral", 0.7, 0.6),
            ("liwc_cognitive", 0.6, 0.5),
            ("question_ratio", 0.3, 0.5),
            ("fragment_ratio", 0.5, 0.4),
        ],
    ),
    (
        "The Survivor",
        "Alert to danger, risk-aware. Uses anxiety and risk/danger vocabulary. \
         Pragmatic speech, short sentences, vigilant mindset.",
        &[
            ("liwc_anxiety", 0.7, 0.9),
            ("liwc_risk_danger", 0.8, 1.0),
            ("liwc_negative_emotion", 0.6, 0.6),
            ("fragment_ratio", 0.6, 0.6),
            ("sentiment_negative", 0.6, 0.5),
            ("question_ratio", 0.5, 0.4),
            ("liwc_tentativeness", 0.6, 0.5),
        ],
    ),
    (
        "The Pragmatist",
        "Factual, no-nonsense speaker. Neutral sentiment, achievement-oriented. \
         Concrete vocabulary, moderate sentence length, low emotional affect.",
        &[
            ("sentiment_neutral", 0.8, 0.9),
            ("sentiment_compound_shifted", 0.5, 0.7),
            ("liwc_achievement", 0.6, 0.6),
            ("noun_pct", 0.7, 0.5),
            ("liwc_positive_emotion", 0.2, 0.5),
            ("liwc_negative_emotion", 0.2, 0.5),
            ("type_token_ratio", 0.5, 0.3),
        ],
    ),
    (
        "The Manipulator",
        "Deceptive, calculating speaker. Uses social and cognitive language to \
         influence others. Tentative phrasing masks true intent. Asks questions \
         to probe and control the conversation indirectly.",
        &[
            ("liwc_social", 0.8, 1.0),
            ("liwc_cognitive", 0.7, 0.9),
            ("liwc_tentativeness", 0.7, 0.8),
            ("question_ratio", 0.7, 0.8),
            ("liwc_positive_emotion", 0.6, 0.6),
            ("sentiment_compound_shifted", 0.6, 0.5),
            ("liwc_certainty", 0.2, 0.6),
            ("exclamation_ratio", 0.2, 0.4),
        ],
    ),
    (
        "The Protector",
        "Selfless, protective personality. High social and positive emotion language. \
         Achievement-oriented in service of others. Speaks with warmth and urgency \
         when those they care about are threatened.",
        &[
            ("liwc_social", 0.8, 1.0),
            ("liwc_positive_emotion", 0.7, 0.8),
            ("liwc_risk_danger", 0.6, 0.7),
            ("liwc_achievement", 0.6, 0.6),
            ("exclamation_ratio", 0.6, 0.6),
            ("sentiment_positive", 0.6, 0.5),
            ("liwc_power", 0.5, 0.4),
            ("liwc_anger", 0.2, 0.4),
        ],
    ),
    (
        "The Rebel",
        "Defiant outsider who rejects authority and convention. Uses negative emotion \
         and risk language. Low social integration. Short, punchy sentences that \
         challenge the status quo.",
        &[
            ("liwc_negative_emotion", 0.7, 0.9),
            ("liwc_anger", 0.6, 0.8),
            ("liwc_risk_danger", 0.6, 0.7),
            ("liwc_social", 0.2, 0.7),
            ("liwc_certainty", 0.7, 0.6),
            ("fragment_ratio", 0.7, 0.6),
            ("liwc_power", 0.3, 0.5),
            ("liwc_tentativeness", 0.2, 0.5),
        ],
    ),
    (
        "The Victim",
        "Passive, suffering personality. High sadness and anxiety vocabulary. \
         Tentative speech patterns, negative sentiment. Speaks from a position \
         of helplessness and resignation.",
        &[
            ("liwc_sadness", 0.8, 1.0),
            ("liwc_anxiety", 0.7, 0.9),
            ("liwc_negative_emotion", 0.8, 0.8),
            ("liwc_tentativeness", 0.7, 0.7),
            ("sentiment_negative", 0.7, 0.7),
            ("liwc_power", 0.1, 0.6),
            ("liwc_achievement", 0.1, 0.5),
            ("exclamation_ratio", 0.2, 0.4),
        ],
    ),
    (
        "The Philosopher",
        "Reflective, questioning mind. High cognitive and tentative language, \
         long sentences exploring ideas. Asks questions not to probe others \
         but to probe existence. Measured, contemplative tone.",
        &[
            ("liwc_cognitive", 0.9, 1.0),
            ("liwc_tentativeness", 0.7, 0.8),
            ("avg_sentence_length", 0.8, 0.9),
            ("question_ratio", 0.6, 0.7),
            ("type_token_ratio", 0.8, 0.7),
            ("fragment_ratio", 0.1, 0.6),
            ("sentiment_neutral", 0.7, 0.5),
            ("adj_pct", 0.7, 0.5),
        ],
    ),
    (
        "The Cynic",
        "Disillusioned, sardonic speaker. Mixes cognitive and negative emotion \
         language. Uses irony, positive words in negative contexts. Questions \
         motives and sincerity. Moderate vocabulary complexity.",
        &[
            ("liwc_negative_emotion", 0.7, 0.9),
            ("liwc_cognitive", 0.6, 0.8),
            ("sentiment_negative", 0.6, 0.7),
            ("question_ratio", 0.5, 0.6),
            ("liwc_positive_emotion", 0.3, 0.5),
            ("liwc_social", 0.3, 0.5),
            ("liwc_certainty", 0.6, 0.5),
            ("type_token_ratio", 0.7, 0.4),
        ],
    ),
    (
        "The Zealot",
        "Fanatically convinced speaker. Extreme certainty, power language, \
         high exclamation ratio. Speaks in absolutes with no room for doubt. \
         Achievement-driven rhetoric, often at the expense of nuance.",
        &[
            ("liwc_certainty", 0.9, 1.0),
            ("exclamation_ratio", 0.8, 0.9),
            ("liwc_power", 0.7, 0.8),
            ("liwc_achievement", 0.7, 0.7),
            ("liwc_tentativeness", 0.1, 0.7),
            ("question_ratio", 0.1, 0.6),
            ("sentiment_compound_shifted", 0.7, 0.5),
            ("fragment_ratio", 0.6, 0.4),
        ],
    ),
    (
        "The Mentor",
        "Wise guide figure. Combines cognitive depth with social warmth. \
         Uses achievement language to encourage, certainty to reassure. \
         Longer sentences that teach and explain.",
        &[
            ("liwc_cognitive", 0.7, 1.0),
            ("liwc_social", 0.7, 0.9),
            ("liwc_achievement", 0.7, 0.7),
            ("liwc_positive_emotion", 0.6, 0.7),
            ("avg_sentence_length", 0.7, 0.7),
            ("liwc_certainty", 0.6, 0.6),
            ("question_ratio", 0.4, 0.5),
            ("liwc_anger", 0.1, 0.5),
        ],
    ),
    (
        "The Peacemaker",
        "Conciliatory, harmony-seeking speaker. High positive emotion and social \
         language. Tentative phrasing to avoid conflict. Low anger, low power \
         assertion. Asks questions to understand, not to challenge.",
        &[
            ("liwc_positive_emotion", 0.8, 1.0),
            ("liwc_social", 0.8, 0.9),
            ("liwc_anger", 0.1, 0.8),
            ("liwc_tentativeness", 0.6, 0.7),
            ("liwc_power", 0.1, 0.7),
            ("question_ratio", 0.5, 0.6),
            ("sentiment_positive", 0.7, 0.6),
            ("liwc_negative_emotion", 0.1, 0.5),
        ],
    ),
    (
        "The Narcissist",
        "Self-absorbed, grandiose speaker. High power and achievement language \
         centred on self. Certainty in own superiority. Low social engagement \
         except as audience. Positive self-sentiment masking contempt for others.",
        &[
            ("liwc_power", 0.8, 1.0),
            ("liwc_achievement", 0.8, 0.9),
            ("liwc_certainty", 0.8, 0.8),
            ("liwc_social", 0.2, 0.7),
            ("sentiment_compound_shifted", 0.7, 0.6),
            ("liwc_positive_emotion", 0.5, 0.5),
            ("liwc_anxiety", 0.1, 0.5),
            ("liwc_sadness", 0.1, 0.5),
        ],
    ),
    (
        "The Innocent",
        "Open, trusting personality. Warm positive language and curious questions \
         asked out of wonder rather than suspicion. Little certainty, anger or \
         awareness of danger.",
        &[
            ("liwc_positive_emotion", 0.8, 1.0),
            ("question_ratio", 0.6, 0.8),
            ("sentiment_positive", 0.7, 0.7),
            ("liwc_certainty", 0.1, 0.7),
            ("liwc_anger", 0.1, 0.7),
            ("liwc_risk_danger", 0.1, 0.6),
            ("liwc_social", 0.6, 0.5),
            ("avg_sentence_length", 0.3, 0.4),
        ],
    ),
];

/// Ordered, validated set of archetypes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeCatalog {
    archetypes: Vec<ArchetypeDefinition>,
}

impl ArchetypeCatalog {
    /// Build a catalog, validating every definition.
    ///
    /// # Errors
    /// `CatalogError` for an empty catalog, duplicate names, or an invalid
    /// definition.
    pub fn new(archetypes: Vec<ArchetypeDefinition>) -> CoreResult<Self> {
        let catalog = Self { archetypes };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in seventeen archetypes.
    pub fn standard() -> Self {
        let archetypes = STANDARD_ARCHETYPES
            .iter()
            .map(|(name, description, criteria)| {
                ArchetypeDefinition::new(
                    *name,
                    *description,
                    criteria
                        .iter()
                        .map(|(feature, ideal, weight)| Criterion::new(*feature, *ideal, *weight))
                        .collect(),
                )
            })
            .collect();
        Self { archetypes }
    }

    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let catalog: Self = toml::from_str(content)
            .map_err(|e| CoreError::CatalogError(format!("Failed to parse catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> CoreResult<Self> {
        let catalog: Self = serde_json::from_str(content)
            .map_err(|e| CoreError::CatalogError(format!("Failed to parse catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file; `.json` files are read as JSON, anything else as
    /// TOML.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::CatalogError(format!(
                "Failed to read catalog file {}: {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.archetypes.is_empty() {
            return Err(CoreError::CatalogError(
                "catalog must contain at least one archetype".into(),
            ));
        }
        let mut names = HashSet::new();
        for archetype in &self.archetypes {
            archetype.validate()?;
            if !names.insert(archetype.name.as_str()) {
                return Err(CoreError::CatalogError(format!(
                    "duplicate archetype name '{}'",
                    archetype.name
                )));
            }
        }
        Ok(())
    }

    /// Archetypes in declaration order.
    pub fn archetypes(&self) -> &[ArchetypeDefinition] {
        &self.archetypes
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchetypeDefinition> {
        self.archetypes.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ArchetypeDefinition> {
        self.archetypes.iter().find(|a| a.name == name)
    }

    /// Declaration index of an archetype.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.archetypes.iter().position(|a| a.name == name)
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// `(archetype, feature)` pairs whose feature is absent from `schema`.
    pub fn unknown_features(&self, schema: &FeatureSchema) -> Vec<(String, String)> {
        self.archetypes
            .iter()
            .flat_map(|a| {
                a.criteria
                    .iter()
                    .filter(|c| !schema.contains(&c.feature))
                    .map(|c| (a.name.clone(), c.feature.clone()))
            })
            .collect()
    }
}

impl Default for ArchetypeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
