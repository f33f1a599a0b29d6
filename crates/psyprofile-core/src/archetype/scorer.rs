//! Weighted-distance archetype scoring.
//!
//! For each criterion `(feature, ideal, weight)` of an archetype:
//!
//! ```text
//! similarity   = 1 - |actual - ideal|
//! contribution = similarity * weight
//! score        = Σ contribution / Σ weight
//! ```
//!
//! Membership tiers are decided per (character, archetype) pair, so one
//! character can be a full member of several archetypes at once.

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::catalog::ArchetypeCatalog;
use super::definition::ArchetypeDefinition;
use crate::config::constants::membership::{MEMBERSHIP, PARTIAL};
use crate::config::ScoringConfig;
use crate::error::{CoreError, CoreResult};
use crate::features::{FeatureSchema, MetricVector};

/// Classification of one character-archetype pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    /// score >= membership threshold
    Full,
    /// partial threshold <= score < membership threshold
    Partial,
    None,
}

/// Score thresholds separating the membership tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MembershipThresholds {
    pub membership: f64,
    pub partial: f64,
}

impl MembershipThresholds {
    /// # Errors
    /// `ValidationError` unless `0 <= partial <= membership <= 1`.
    pub fn new(membership: f64, partial: f64) -> CoreResult<Self> {
        let valid = membership.is_finite()
            && partial.is_finite()
            && 0.0 <= partial
            && partial <= membership
            && membership <= 1.0;
        if !valid {
            return Err(CoreError::validation(
                "thresholds",
                format!(
                    "expected 0 <= partial <= membership <= 1, got partial={}, membership={}",
                    partial, membership
                ),
            ));
        }
        Ok(Self {
            membership,
            partial,
        })
    }

    pub fn from_config(config: &ScoringConfig) -> CoreResult<Self> {
        Self::new(config.membership_threshold, config.partial_threshold)
    }

    #[inline]
    pub fn tier(&self, score: f64) -> MembershipTier {
        if score >= self.membership {
            MembershipTier::Full
        } else if score >= self.partial {
            MembershipTier::Partial
        } else {
            MembershipTier::None
        }
    }
}

impl Default for MembershipThresholds {
    fn default() -> Self {
        Self {
            membership: MEMBERSHIP,
            partial: PARTIAL,
        }
    }
}

/// Normalized contribution (similarity) of one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub feature: String,
    /// contribution / weight, i.e. the similarity in [0, 1]
    pub value: f64,
}

/// Result of scoring one character against one archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeMatch {
    pub archetype: String,
    pub character: String,
    /// Weighted similarity in [0, 1]
    pub score: f64,
    pub tier: MembershipTier,
    /// Per-criterion contributions in criterion declaration order
    pub contributions: Vec<FeatureContribution>,
}

impl ArchetypeMatch {
    pub fn is_member(&self) -> bool {
        self.tier == MembershipTier::Full
    }

    pub fn is_partial(&self) -> bool {
        self.tier == MembershipTier::Partial
    }

    /// The `n` strongest contributions, strongest first.
    pub fn top_contributions(&self, n: usize) -> Vec<&FeatureContribution> {
        let mut sorted: Vec<&FeatureContribution> = self.contributions.iter().collect();
        sorted.sort_by(|a, b| b.value.total_cmp(&a.value));
        sorted.truncate(n);
        sorted
    }
}

/// Scores metric vectors against a catalog.
#[derive(Debug, Clone)]
pub struct ArchetypeScorer {
    schema: Arc<FeatureSchema>,
    catalog: Arc<ArchetypeCatalog>,
    thresholds: MembershipThresholds,
}

impl ArchetypeScorer {
    /// Criteria naming features outside `schema` are logged here once; at
    /// scoring time they read as 0.
    pub fn new(
        schema: Arc<FeatureSchema>,
        catalog: Arc<ArchetypeCatalog>,
        thresholds: MembershipThresholds,
    ) -> Self {
        for (archetype, feature) in catalog.unknown_features(&schema) {
            warn!(
                archetype = %archetype,
                feature = %feature,
                "Criterion references a feature missing from the schema; it will score as 0"
            );
        }
        Self {
            schema,
            catalog,
            thresholds,
        }
    }

    pub fn schema(&self) -> &Arc<FeatureSchema> {
        &self.schema
    }

    pub fn catalog(&self) -> &Arc<ArchetypeCatalog> {
        &self.catalog
    }

    pub fn thresholds(&self) -> MembershipThresholds {
        self.thresholds
    }

    /// Score one vector against one archetype.
    ///
    /// # Errors
    /// `SchemaMismatch` when the vector was built with a different schema
    /// version or length, `FeatureNamesMismatch` when its lexicon categories
    /// differ.
    pub fn score(
        &self,
        vector: &MetricVector,
        archetype: &ArchetypeDefinition,
    ) -> CoreResult<ArchetypeMatch> {
        self.schema.check_compatible(vector)?;
        let values = vector.feature_vector();

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        let mut contributions = Vec::with_capacity(archetype.criteria.len());

        for criterion in &archetype.criteria {
            let actual = self
                .schema
                .index_of(&criterion.feature)
                .map_or(0.0, |i| values[i]);
            let similarity = 1.0 - (actual - criterion.ideal).abs();
            let contribution = similarity * criterion.weight;

            weighted_sum += contribution;
            total_weight += criterion.weight;
            contributions.push(FeatureContribution {
                feature: criterion.feature.clone(),
                value: if criterion.weight > 0.0 {
                    contribution / criterion.weight
                } else {
                    0.0
                },
            });
        }

        let score = if total_weight > 0.0 {
            (weighted_sum / total_weight).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Ok(ArchetypeMatch {
            archetype: archetype.name.clone(),
            character: vector.character().to_string(),
            score,
            tier: self.thresholds.tier(score),
            contributions,
        })
    }

    /// Score one vector against every catalog archetype, best first.
    ///
    /// Equal scores keep catalog declaration order.
    pub fn score_all(&self, vector: &MetricVector) -> CoreResult<Vec<ArchetypeMatch>> {
        let mut matches = self
            .catalog
            .iter()
            .map(|archetype| self.score(vector, archetype))
            .collect::<CoreResult<Vec<_>>>()?;
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(matches)
    }

    /// Score every character against every archetype, in parallel.
    ///
    /// Keys are the character names of `vectors`; each list is sorted as in
    /// [`score_all`](Self::score_all).
    pub fn assign_profiles(
        &self,
        vectors: &BTreeMap<String, MetricVector>,
    ) -> CoreResult<BTreeMap<String, Vec<ArchetypeMatch>>> {
        let assignments: BTreeMap<String, Vec<ArchetypeMatch>> = vectors
            .par_iter()
            .map(|(name, vector)| {
                let mut matches = self.score_all(vector)?;
                for m in &mut matches {
                    m.character.clone_from(name);
                }
                Ok((name.clone(), matches))
            })
            .collect::<CoreResult<_>>()?;

        debug!(
            characters = assignments.len(),
            archetypes = self.catalog.len(),
            "Assigned archetype profiles"
        );
        Ok(assignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::definition::Criterion;
    use crate::features::{DialogueMetrics, FEATURE_SCHEMA_VERSION};

    fn vector_with(pairs: &[(&str, f64)]) -> MetricVector {
        let schema = FeatureSchema::standard();
        let mut metrics = DialogueMetrics::zeroed(&schema);
        // compound 0 would project to 0.5; start from an all-zero vector
        metrics.sentiment.compound = -1.0;
        for (name, value) in pairs {
            assert!(schema.apply(&mut metrics, name, *value), "unknown feature {}", name);
        }
        MetricVector::new("TEST", metrics, &schema)
    }

    fn scorer() -> ArchetypeScorer {
        ArchetypeScorer::new(
            FeatureSchema::standard(),
            Arc::new(ArchetypeCatalog::standard()),
            MembershipThresholds::default(),
        )
    }

    fn single(criteria: Vec<Criterion>) -> ArchetypeDefinition {
        ArchetypeDefinition::new("Probe", "", criteria)
    }

    #[test]
    fn test_tier_boundaries() {
        let t = MembershipThresholds::default();
        assert_eq!(t.tier(0.45), MembershipTier::Full);
        assert_eq!(t.tier(0.30), MembershipTier::Partial);
        assert_eq!(t.tier(0.2999), MembershipTier::None);
        assert_eq!(t.tier(1.0), MembershipTier::Full);
        assert_eq!(t.tier(0.0), MembershipTier::None);
        println!("[PASS] test_tier_boundaries");
    }

    #[test]
    fn test_thresholds_validation() {
        assert!(MembershipThresholds::new(0.45, 0.30).is_ok());
        assert!(MembershipThresholds::new(0.30, 0.45).is_err());
        assert!(MembershipThresholds::new(1.2, 0.3).is_err());
        assert!(MembershipThresholds::new(0.5, -0.1).is_err());
        assert!(MembershipThresholds::new(f64::NAN, 0.3).is_err());
    }

    #[test]
    fn test_weighted_formula() {
        let scorer = scorer();
        let vector = vector_with(&[("liwc_anger", 0.6), ("question_ratio", 0.2)]);
        let archetype = single(vec![
            Criterion::new("liwc_anger", 0.8, 1.0),
            Criterion::new("question_ratio", 0.0, 0.5),
        ]);
        let m = scorer.score(&vector, &archetype).expect("score");
        // (0.8 * 1.0 + 0.8 * 0.5) / 1.5 = 0.8
        assert!((m.score - 0.8).abs() < 1e-9);
        assert_eq!(m.tier, MembershipTier::Full);
        assert_eq!(m.contributions.len(), 2);
        assert_eq!(m.contributions[0].feature, "liwc_anger");
        assert!((m.contributions[0].value - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_feature_reads_as_zero() {
        let scorer = scorer();
        let vector = vector_with(&[]);
        let archetype = single(vec![Criterion::new("liwc_humor", 0.25, 1.0)]);
        let m = scorer.score(&vector, &archetype).expect("score");
        assert!((m.score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weight_criteria() {
        let scorer = scorer();
        let vector = vector_with(&[("verb_pct", 1.0)]);
        let archetype = single(vec![Criterion::new("verb_pct", 1.0, 0.0)]);
        let m = scorer.score(&vector, &archetype).expect("score");
        assert_eq!(m.score, 0.0);
        assert_eq!(m.contributions[0].value, 0.0);
        assert_eq!(m.tier, MembershipTier::None);
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let scorer = scorer();
        let mut categories = std::collections::BTreeMap::new();
        categories.insert("humor".to_string(), vec!["jok".to_string()]);
        let small_schema =
            FeatureSchema::new(&crate::features::Lexicon::new(categories).expect("lexicon"));
        let vector = MetricVector::new("X", DialogueMetrics::default(), &small_schema);
        assert_eq!(vector.schema_version(), FEATURE_SCHEMA_VERSION);

        let archetype = scorer.catalog().archetypes()[0].clone();
        let err = scorer.score(&vector, &archetype).unwrap_err();
        assert!(matches!(err, CoreError::SchemaMismatch { actual_len: 16, .. }));
    }

    #[test]
    fn test_score_all_sorted_with_catalog_tie_break() {
        let catalog = ArchetypeCatalog::new(vec![
            single(vec![Criterion::new("hapax_ratio", 0.5, 1.0)]).renamed("First"),
            single(vec![Criterion::new("hapax_ratio", 0.9, 1.0)]).renamed("Best"),
            single(vec![Criterion::new("hapax_ratio", 0.5, 1.0)]).renamed("Second"),
        ])
        .expect("catalog");
        let scorer = ArchetypeScorer::new(
            FeatureSchema::standard(),
            Arc::new(catalog),
            MembershipThresholds::default(),
        );
        let vector = vector_with(&[("hapax_ratio", 0.9)]);
        let names: Vec<String> = scorer
            .score_all(&vector)
            .expect("score")
            .into_iter()
            .map(|m| m.archetype)
            .collect();
        assert_eq!(names, vec!["Best", "First", "Second"]);
    }

    #[test]
    fn test_top_contributions() {
        let m = ArchetypeMatch {
            archetype: "A".into(),
            character: "C".into(),
            score: 0.5,
            tier: MembershipTier::Full,
            contributions: vec![
                FeatureContribution { feature: "a".into(), value: 0.2 },
                FeatureContribution { feature: "b".into(), value: 0.9 },
                FeatureContribution { feature: "c".into(), value: 0.5 },
            ],
        };
        let top: Vec<&str> = m.top_contributions(2).iter().map(|c| c.feature.as_str()).collect();
        assert_eq!(top, vec!["b", "c"]);
        assert!(m.is_member());
        assert!(!m.is_partial());
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MembershipTier::Partial).unwrap(), "\"partial\"");
    }

    impl ArchetypeDefinition {
        fn renamed(mut self, name: &str) -> Self {
            self.name = name.to_string();
            self
        }
    }
}
