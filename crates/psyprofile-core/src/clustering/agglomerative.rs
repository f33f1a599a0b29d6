//! Average-linkage agglomerative clustering over cosine distance.
//!
//! Starts from one cluster per character and repeatedly merges the closest
//! pair. The distance between two clusters is the mean pairwise cosine
//! distance between their members, maintained with the Lance-Williams
//! update:
//!
//! ```text
//! d(i ∪ j, k) = (|i| · d(i, k) + |j| · d(j, k)) / (|i| + |j|)
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ClusterError;
use crate::config::ClusteringConfig;
use crate::similarity::{cosine_distance, NormalizedFeatures};

// =============================================================================
// ClusterCriterion
// =============================================================================

/// When to stop merging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum ClusterCriterion {
    /// Merge while the closest pair is strictly nearer than this distance.
    DistanceThreshold(f64),
    /// Merge until this many clusters remain (capped at the character count).
    Count(usize),
}

impl ClusterCriterion {
    /// An explicit `n_clusters` wins over the distance threshold.
    pub fn from_config(config: &ClusteringConfig) -> Self {
        match config.n_clusters {
            Some(n) => Self::Count(n),
            None => Self::DistanceThreshold(config.distance_threshold),
        }
    }

    fn validate(&self) -> Result<(), ClusterError> {
        match *self {
            Self::Count(0) => Err(ClusterError::invalid_parameter(
                "cluster count must be greater than 0",
            )),
            Self::DistanceThreshold(t) if !t.is_finite() || t < 0.0 => Err(
                ClusterError::invalid_parameter(format!(
                    "distance threshold must be a non-negative number, got {}",
                    t
                )),
            ),
            _ => Ok(()),
        }
    }
}

impl Default for ClusterCriterion {
    fn default() -> Self {
        Self::DistanceThreshold(crate::config::constants::clustering::DISTANCE_THRESHOLD)
    }
}

// =============================================================================
// ClusterAssignment
// =============================================================================

/// Cluster id to member names.
///
/// Ids carry no meaning beyond grouping. They are numbered from 0 in order
/// of each cluster's lexicographically first member, and members are listed
/// lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterAssignment {
    clusters: BTreeMap<usize, Vec<String>>,
}

impl ClusterAssignment {
    pub fn clusters(&self) -> &BTreeMap<usize, Vec<String>> {
        &self.clusters
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.clusters.iter().map(|(id, members)| (*id, members.as_slice()))
    }

    pub fn members(&self, id: usize) -> Option<&[String]> {
        self.clusters.get(&id).map(Vec::as_slice)
    }

    /// Cluster id containing `character`.
    pub fn cluster_of(&self, character: &str) -> Option<usize> {
        self.clusters
            .iter()
            .find(|(_, members)| members.iter().any(|m| m == character))
            .map(|(id, _)| *id)
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

// =============================================================================
// ClusterEngine
// =============================================================================

/// Hierarchical grouping of characters by feature similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterEngine {
    criterion: ClusterCriterion,
}

impl ClusterEngine {
    /// # Errors
    /// `InvalidParameter` for a zero count or a negative / non-finite threshold.
    pub fn new(criterion: ClusterCriterion) -> Result<Self, ClusterError> {
        criterion.validate()?;
        Ok(Self { criterion })
    }

    pub fn from_config(config: &ClusteringConfig) -> Result<Self, ClusterError> {
        Self::new(ClusterCriterion::from_config(config))
    }

    pub fn criterion(&self) -> ClusterCriterion {
        self.criterion
    }

    /// Group the characters of one run.
    ///
    /// Fewer than two characters yield a single trivial cluster (or none for
    /// an empty run) without running the algorithm.
    pub fn cluster(&self, features: &NormalizedFeatures) -> Result<ClusterAssignment, ClusterError> {
        let n = features.len();
        if n < 2 {
            let clusters = if n == 0 {
                BTreeMap::new()
            } else {
                BTreeMap::from([(0, features.names.clone())])
            };
            return Ok(ClusterAssignment { clusters });
        }

        let width = features.rows[0].len();
        if let Some(row) = features.rows.iter().find(|r| r.len() != width) {
            return Err(ClusterError::dimension_mismatch(width, row.len()));
        }

        let groups = self.merge(&features.rows);
        debug!(
            characters = n,
            clusters = groups.len(),
            criterion = ?self.criterion,
            "Clustered characters"
        );
        Ok(assignment_from(groups, &features.names))
    }

    /// Run the merge loop, returning member indices per surviving cluster.
    fn merge(&self, rows: &[Vec<f64>]) -> Vec<Vec<usize>> {
        let n = rows.len();
        let mut groups: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
        let mut dist = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cosine_distance(&rows[i], &rows[j]);
                dist[i][j] = d;
                dist[j][i] = d;
            }
        }

        let target = match self.criterion {
            ClusterCriterion::Count(k) => k.min(n),
            ClusterCriterion::DistanceThreshold(_) => 1,
        };

        while groups.len() > target {
            let (a, b, d) = closest_pair(&dist);
            if let ClusterCriterion::DistanceThreshold(threshold) = self.criterion {
                if d >= threshold {
                    break;
                }
            }

            let (size_a, size_b) = (groups[a].len() as f64, groups[b].len() as f64);
            for k in 0..groups.len() {
                if k == a || k == b {
                    continue;
                }
                let merged = (size_a * dist[a][k] + size_b * dist[b][k]) / (size_a + size_b);
                dist[a][k] = merged;
                dist[k][a] = merged;
            }

            let absorbed = groups.remove(b);
            groups[a].extend(absorbed);
            dist.remove(b);
            for row in dist.iter_mut() {
                row.remove(b);
            }
        }

        groups
    }
}

/// Closest pair `(a, b, distance)` with `a < b`; ties go to the lowest indices.
fn closest_pair(dist: &[Vec<f64>]) -> (usize, usize, f64) {
    let mut best = (0, 1, f64::INFINITY);
    for (i, row) in dist.iter().enumerate() {
        for (j, &d) in row.iter().enumerate().skip(i + 1) {
            if d < best.2 {
                best = (i, j, d);
            }
        }
    }
    best
}

fn assignment_from(mut groups: Vec<Vec<usize>>, names: &[String]) -> ClusterAssignment {
    for group in groups.iter_mut() {
        group.sort_unstable();
    }
    groups.sort_by_key(|g| g[0]);

    let clusters = groups
        .into_iter()
        .enumerate()
        .map(|(id, group)| (id, group.into_iter().map(|i| names[i].clone()).collect()))
        .collect();
    ClusterAssignment { clusters }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(rows: &[(&str, Vec<f64>)]) -> NormalizedFeatures {
        NormalizedFeatures {
            names: rows.iter().map(|(n, _)| n.to_string()).collect(),
            rows: rows.iter().map(|(_, r)| r.clone()).collect(),
        }
    }

    fn two_groups() -> NormalizedFeatures {
        features(&[
            ("ALICE", vec![1.0, 0.0, 0.1]),
            ("BOB", vec![0.0, 1.0, 0.0]),
            ("CAROL", vec![0.9, 0.1, 0.0]),
            ("DAVE", vec![0.1, 0.9, 0.1]),
        ])
    }

    #[test]
    fn test_threshold_finds_natural_groups() {
        let engine = ClusterEngine::default();
        let result = engine.cluster(&two_groups()).expect("cluster");

        assert_eq!(result.len(), 2);
        assert_eq!(result.members(0), Some(&["ALICE".to_string(), "CAROL".to_string()][..]));
        assert_eq!(result.members(1), Some(&["BOB".to_string(), "DAVE".to_string()][..]));
        assert_eq!(result.cluster_of("DAVE"), Some(1));
        println!("[PASS] test_threshold_finds_natural_groups - {:?}", result.clusters());
    }

    #[test]
    fn test_fixed_count() {
        let one = ClusterEngine::new(ClusterCriterion::Count(1)).expect("engine");
        let result = one.cluster(&two_groups()).expect("cluster");
        assert_eq!(result.len(), 1);
        assert_eq!(result.members(0).map(<[String]>::len), Some(4));

        let many = ClusterEngine::new(ClusterCriterion::Count(10)).expect("engine");
        let result = many.cluster(&two_groups()).expect("cluster");
        assert_eq!(result.len(), 4, "count is capped at the character count");

        let two = ClusterEngine::new(ClusterCriterion::Count(2)).expect("engine");
        let result = two.cluster(&two_groups()).expect("cluster");
        assert_eq!(result.cluster_of("ALICE"), result.cluster_of("CAROL"));
        assert_ne!(result.cluster_of("ALICE"), result.cluster_of("BOB"));
    }

    #[test]
    fn test_zero_threshold_keeps_singletons() {
        let engine = ClusterEngine::new(ClusterCriterion::DistanceThreshold(0.0)).expect("engine");
        let result = engine.cluster(&two_groups()).expect("cluster");
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_trivial_inputs() {
        let engine = ClusterEngine::default();

        let empty = engine.cluster(&features(&[])).expect("cluster");
        assert!(empty.is_empty());

        let solo = engine.cluster(&features(&[("SOLO", vec![0.0, 0.0])])).expect("cluster");
        assert_eq!(solo.len(), 1);
        assert_eq!(solo.members(0), Some(&["SOLO".to_string()][..]));
        println!("[PASS] test_trivial_inputs - empty and single-character runs");
    }

    #[test]
    fn test_zero_rows_stay_apart() {
        let engine = ClusterEngine::default();
        let result = engine
            .cluster(&features(&[("A", vec![0.0, 0.0]), ("B", vec![0.0, 0.0])]))
            .expect("cluster");
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_average_linkage_update() {
        // A and B coincide; C sits at 45 degrees to both.
        let rows = vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        let engine = ClusterEngine::new(ClusterCriterion::Count(1)).expect("engine");
        let groups = engine.merge(&rows);
        assert_eq!(groups.len(), 1);

        let d_ac = cosine_distance(&rows[0], &rows[2]);
        let threshold_engine =
            ClusterEngine::new(ClusterCriterion::DistanceThreshold(d_ac)).expect("engine");
        let groups = threshold_engine.merge(&rows);
        assert_eq!(groups.len(), 2, "average distance equal to threshold must not merge");
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            ClusterEngine::new(ClusterCriterion::Count(0)),
            Err(ClusterError::InvalidParameter { .. })
        ));
        assert!(ClusterEngine::new(ClusterCriterion::DistanceThreshold(-0.1)).is_err());
        assert!(ClusterEngine::new(ClusterCriterion::DistanceThreshold(f64::NAN)).is_err());
    }

    #[test]
    fn test_dimension_mismatch() {
        let engine = ClusterEngine::default();
        let err = engine
            .cluster(&features(&[("A", vec![1.0, 0.0]), ("B", vec![1.0])]))
            .unwrap_err();
        assert_eq!(err, ClusterError::dimension_mismatch(2, 1));
    }

    #[test]
    fn test_from_config() {
        let mut config = ClusteringConfig::default();
        assert_eq!(ClusterCriterion::from_config(&config), ClusterCriterion::DistanceThreshold(0.5));
        config.n_clusters = Some(3);
        assert_eq!(ClusterCriterion::from_config(&config), ClusterCriterion::Count(3));
    }
}
