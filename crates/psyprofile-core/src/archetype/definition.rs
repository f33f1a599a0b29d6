//! Archetype definitions: named, weighted feature criteria.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// One weighted target value for a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Feature name as it appears in the feature schema
    pub feature: String,
    /// Target value in [0, 1]
    pub ideal: f64,
    /// Relative importance in [0, 1]
    pub weight: f64,
}

impl Criterion {
    pub fn new(feature: impl Into<String>, ideal: f64, weight: f64) -> Self {
        Self {
            feature: feature.into(),
            ideal,
            weight,
        }
    }

    /// "high" when the ideal lies above the midpoint, "low" otherwise.
    pub fn direction(&self) -> &'static str {
        if self.ideal > 0.5 {
            "high"
        } else {
            "low"
        }
    }
}

/// A personality archetype.
///
/// Archetypes are pure data: scoring is uniform across all of them, and a
/// feature an archetype does not list has no influence on its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeDefinition {
    /// Unique name, e.g. "The Aggressor"
    pub name: String,
    pub description: String,
    /// Criteria in declaration order
    pub criteria: Vec<Criterion>,
}

impl ArchetypeDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        criteria: Vec<Criterion>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            criteria,
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    pub fn criterion(&self, feature: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.feature == feature)
    }

    /// One line per criterion, heaviest first (stable for equal weights):
    ///
    /// ```text
    ///   - liwc_anger: high (ideal=0.80, weight=1.00)
    /// ```
    pub fn describe_criteria(&self) -> String {
        let mut sorted: Vec<&Criterion> = self.criteria.iter().collect();
        sorted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        sorted
            .iter()
            .map(|c| {
                format!(
                    "  - {}: {} (ideal={:.2}, weight={:.2})",
                    c.feature,
                    c.direction(),
                    c.ideal,
                    c.weight
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check name, criteria count, value ranges and duplicate features.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::CatalogError("archetype name must not be empty".into()));
        }
        if self.criteria.is_empty() {
            return Err(CoreError::CatalogError(format!(
                "archetype '{}' has no criteria",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for c in &self.criteria {
            if !seen.insert(c.feature.as_str()) {
                return Err(CoreError::CatalogError(format!(
                    "archetype '{}' lists feature '{}' twice",
                    self.name, c.feature
                )));
            }
            for (what, value) in [("ideal", c.ideal), ("weight", c.weight)] {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(CoreError::CatalogError(format!(
                        "archetype '{}', feature '{}': {} must be within [0, 1], got {}",
                        self.name, c.feature, what, value
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArchetypeDefinition {
        ArchetypeDefinition::new(
            "The Sample",
            "For tests.",
            vec![
                Criterion::new("question_ratio", 0.2, 0.3),
                Criterion::new("liwc_anger", 0.8, 1.0),
                Criterion::new("fragment_ratio", 0.5, 0.3),
            ],
        )
    }

    #[test]
    fn test_describe_criteria_sorted_by_weight() {
        let text = sample().describe_criteria();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "  - liwc_anger: high (ideal=0.80, weight=1.00)",
                "  - question_ratio: low (ideal=0.20, weight=0.30)",
                "  - fragment_ratio: low (ideal=0.50, weight=0.30)",
            ]
        );
        println!("[PASS] test_describe_criteria_sorted_by_weight\n{}", text);
    }

    #[test]
    fn test_total_weight() {
        assert!((sample().total_weight() - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let mut bad = sample();
        bad.criteria[0].weight = 1.5;
        assert!(bad.validate().is_err());

        let mut dup = sample();
        dup.criteria.push(Criterion::new("liwc_anger", 0.1, 0.1));
        assert!(dup.validate().unwrap_err().to_string().contains("twice"));

        let empty = ArchetypeDefinition::new("Empty", "", vec![]);
        assert!(empty.validate().is_err());
    }
}
