//! Sample dialogue and synthetic metric vectors.
//!
//! Synthetic vectors are built on the standard schema by setting named
//! features directly, so scoring tests do not depend on text analysis.

use std::collections::BTreeMap;

use psyprofile_core::features::{DialogueMetrics, FeatureSchema, MetricVector};
use psyprofile_core::ArchetypeCatalog;
use rand::Rng;

/// Three short hostile lines: exclamations, fragments, negative tone.
pub fn confrontational_lines() -> Vec<String> {
    ["I hate you!", "Get out now!", "This is wrong."]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Build an input map from `(character, lines)` pairs.
pub fn dialogues(entries: &[(&str, Vec<&str>)]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(name, lines)| {
            (
                name.to_string(),
                lines.iter().map(|l| l.to_string()).collect(),
            )
        })
        .collect()
}

/// Four characters with enough dialogue each to clear the small-sample floor.
pub fn sample_cast() -> BTreeMap<String, Vec<String>> {
    dialogues(&[
        (
            "COMMANDER",
            vec![
                "Get down! Now!",
                "I want that door sealed in two minutes. No excuses.",
                "You will follow my orders or you will leave this ship.",
                "Destroy the bridge. Burn everything they left behind!",
                "I hate cowards. I hate waiting. Move!",
                "We attack at dawn and we win.",
            ],
        ),
        (
            "DOCTOR",
            vec![
                "I think the results suggest something else entirely, don't you?",
                "Perhaps we should consider why the samples changed over time.",
                "If the hypothesis is correct, then the infection spreads through water.",
                "I wonder whether the evidence really supports that conclusion.",
                "Maybe we can understand it better if we analyze the data again.",
            ],
        ),
        (
            "FRIEND",
            vec![
                "We are in this together, my friend, and I love you for it.",
                "Thank you for helping our family when nobody else would.",
                "Let us share the food and talk with everyone tonight.",
                "I am so happy you came home. We missed you, brother.",
                "Our team is strong because we trust each other.",
            ],
        ),
        (
            "SCOUT",
            vec![
                "Why is the road empty? Where did everyone go?",
                "Is that smoke over the hills? Are we safe here?",
                "What happens if the bridge collapses before we cross?",
                "Did you hear that? Something is moving in the dark forest.",
                "Should we wait for the others or keep walking north?",
            ],
        ),
    ])
}

/// A vector on the standard schema with the given features set and every
/// other feature at its zero-metric value.
///
/// # Panics
/// When a feature name is not in the standard schema.
pub fn vector_with(character: &str, features: &[(&str, f64)]) -> MetricVector {
    let schema = FeatureSchema::standard();
    let mut metrics = DialogueMetrics::zeroed(&schema);
    metrics.word_count = 100;
    metrics.sentence_count = 10;
    for (name, value) in features {
        assert!(
            schema.apply(&mut metrics, name, *value),
            "unknown feature '{}'",
            name
        );
    }
    MetricVector::new(character, metrics, &schema)
}

/// A vector sitting exactly on every criterion of the named archetype.
///
/// # Panics
/// When the archetype is not in `catalog`.
pub fn ideal_vector(catalog: &ArchetypeCatalog, character: &str, archetype: &str) -> MetricVector {
    let definition = catalog
        .get(archetype)
        .unwrap_or_else(|| panic!("archetype '{}' not in catalog", archetype));
    let features: Vec<(&str, f64)> = definition
        .criteria
        .iter()
        .map(|c| (c.feature.as_str(), c.ideal))
        .collect();
    vector_with(character, &features)
}

/// A vector with every standard feature drawn uniformly from [0, 1].
pub fn random_vector<R: Rng>(rng: &mut R, character: &str) -> MetricVector {
    let schema = FeatureSchema::standard();
    let features: Vec<(&str, f64)> = schema
        .names()
        .iter()
        .map(|name| (name.as_str(), rng.gen_range(0.0..=1.0)))
        .collect();
    vector_with(character, &features)
}
