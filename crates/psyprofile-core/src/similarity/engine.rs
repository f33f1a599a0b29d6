//! Run-level pairwise similarity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cosine::{cosine_similarity, min_max_normalize};
use crate::error::{CoreError, CoreResult};
use crate::features::MetricVector;

/// Character names with their feature rows, ready for pairwise comparison.
///
/// Names are in lexicographic order. With two or more characters every
/// column is min-max normalized across this set only.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFeatures {
    pub names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl NormalizedFeatures {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Symmetric character-by-character cosine similarity with unit diagonal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    names: Vec<String>,
    matrix: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Similarity between two named characters.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.matrix[i][j])
    }

    /// Other characters ordered by similarity to `name`, most similar first.
    pub fn most_similar(&self, name: &str) -> Option<Vec<(&str, f64)>> {
        let i = self.index_of(name)?;
        let mut others: Vec<(&str, f64)> = self
            .names
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(j, other)| (other.as_str(), self.matrix[i][j]))
            .collect();
        others.sort_by(|a, b| b.1.total_cmp(&a.1));
        Some(others)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).ok()
    }
}

/// Pairwise cosine similarity over per-run normalized feature vectors.
///
/// Values are only comparable within one run: normalization ranges come
/// from the characters passed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityEngine;

impl SimilarityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Stack and normalize the feature vectors of one run.
    ///
    /// # Errors
    /// `DimensionMismatch` when the vectors differ in length.
    pub fn normalize(&self, vectors: &BTreeMap<String, MetricVector>) -> CoreResult<NormalizedFeatures> {
        let mut names = Vec::with_capacity(vectors.len());
        let mut rows = Vec::with_capacity(vectors.len());
        let mut expected: Option<usize> = None;

        for (name, vector) in vectors {
            let row = vector.feature_vector();
            match expected {
                None => expected = Some(row.len()),
                Some(len) if len != row.len() => {
                    return Err(CoreError::DimensionMismatch {
                        expected: len,
                        actual: row.len(),
                    });
                }
                Some(_) => {}
            }
            names.push(name.clone());
            rows.push(row.to_vec());
        }

        if rows.len() > 1 {
            min_max_normalize(&mut rows);
        }

        Ok(NormalizedFeatures { names, rows })
    }

    /// Similarity matrix for every character in the run.
    pub fn compute(&self, vectors: &BTreeMap<String, MetricVector>) -> CoreResult<SimilarityMatrix> {
        let features = self.normalize(vectors)?;
        Ok(self.matrix_from(features))
    }

    /// Similarity matrix for already normalized features.
    pub fn matrix_from(&self, features: NormalizedFeatures) -> SimilarityMatrix {
        let n = features.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            matrix[i][i] = 1.0;
            for j in (i + 1)..n {
                let sim = cosine_similarity(&features.rows[i], &features.rows[j]);
                matrix[i][j] = sim;
                matrix[j][i] = sim;
            }
        }

        debug!(characters = n, "Computed similarity matrix");
        SimilarityMatrix {
            names: features.names,
            matrix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{DialogueMetrics, FeatureSchema};

    fn vectors(names: &[&str]) -> BTreeMap<String, MetricVector> {
        let schema = FeatureSchema::standard();
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut metrics = DialogueMetrics::zeroed(&schema);
                metrics.word_count = 100;
                metrics.syntactic.question_ratio = i as f64 * 0.2;
                metrics.syntactic.exclamation_ratio = 0.6 - i as f64 * 0.2;
                metrics.lexical.type_token_ratio = 0.5;
                (name.to_string(), MetricVector::new(*name, metrics, &schema))
            })
            .collect()
    }

    #[test]
    fn test_matrix_symmetric_unit_diagonal() {
        let engine = SimilarityEngine::new();
        let sim = engine.compute(&vectors(&["CAROL", "ALICE", "BOB"])).expect("similarity");

        assert_eq!(sim.names(), &["ALICE", "BOB", "CAROL"]);
        for i in 0..3 {
            assert_eq!(sim.matrix()[i][i], 1.0);
            for j in 0..3 {
                assert_eq!(sim.matrix()[i][j], sim.matrix()[j][i]);
                assert!((-1.0..=1.0).contains(&sim.matrix()[i][j]));
            }
        }
        println!("[PASS] test_matrix_symmetric_unit_diagonal - {:?}", sim.matrix());
    }

    #[test]
    fn test_normalization_is_per_run() {
        let engine = SimilarityEngine::new();
        let features = engine.normalize(&vectors(&["A", "B", "C"])).expect("normalize");
        let schema = FeatureSchema::standard();
        let q = schema.index_of("question_ratio").expect("question_ratio");
        let ttr = schema.index_of("type_token_ratio").expect("type_token_ratio");

        assert_eq!(features.rows[0][q], 0.0);
        assert!((features.rows[1][q] - 0.5).abs() < 1e-12);
        assert_eq!(features.rows[2][q], 1.0);
        // constant across the run
        assert!(features.rows.iter().all(|r| r[ttr] == 0.0));
    }

    #[test]
    fn test_single_character_skips_normalization() {
        let engine = SimilarityEngine::new();
        let input = vectors(&["SOLO"]);
        let features = engine.normalize(&input).expect("normalize");
        assert_eq!(features.rows[0], input["SOLO"].feature_vector().to_vec());

        let sim = engine.compute(&input).expect("similarity");
        assert_eq!(sim.matrix(), &[vec![1.0]]);
    }

    #[test]
    fn test_empty_run() {
        let sim = SimilarityEngine::new().compute(&BTreeMap::new()).expect("similarity");
        assert!(sim.is_empty());
    }

    #[test]
    fn test_zero_row_similarity() {
        let engine = SimilarityEngine::new();
        let sim = engine.matrix_from(NormalizedFeatures {
            names: vec!["A".into(), "B".into()],
            rows: vec![vec![0.0, 0.0], vec![1.0, 0.5]],
        });
        assert_eq!(sim.get("A", "B"), Some(0.0));
        assert_eq!(sim.get("A", "A"), Some(1.0));
    }

    #[test]
    fn test_dimension_mismatch() {
        let schema = FeatureSchema::standard();
        let small = crate::features::Lexicon::new(
            [("anger".to_string(), vec!["hate".to_string()])].into_iter().collect(),
        )
        .expect("lexicon");
        let small_schema = FeatureSchema::new(&small);

        let mut input = BTreeMap::new();
        input.insert("A".to_string(), MetricVector::empty("A", "none", &schema));
        input.insert("B".to_string(), MetricVector::empty("B", "none", &small_schema));

        let err = SimilarityEngine::new().compute(&input).unwrap_err();
        assert!(matches!(err, CoreError::DimensionMismatch { expected: 27, actual: 16 }));
    }

    #[test]
    fn test_most_similar() {
        let sim = SimilarityEngine::new().compute(&vectors(&["A", "B", "C"])).expect("similarity");
        let ranked = sim.most_similar("A").expect("A present");
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].1 >= ranked[1].1);
        assert!(sim.most_similar("Z").is_none());
    }
}
