//! End-to-end profiling of one run.
//!
//! ```text
//! dialogue per character
//!   → FeatureExtractor        (parallel, per character)
//!   → ArchetypeScorer          (parallel, per character)
//!   → SimilarityEngine + ClusterEngine   (whole run)
//!   → ProfileRegistryBuilder   (whole run)
//! ```
//!
//! A run is a pure function of the dialogue, the feature schema and the
//! archetype catalog. Nothing is cached between runs.

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::archetype::{
    ArchetypeCatalog, ArchetypeMatch, ArchetypeScorer, MembershipThresholds, ProfileRegistry,
    ProfileRegistryBuilder,
};
use crate::clustering::{ClusterAssignment, ClusterEngine};
use crate::config::constants::features::EXTRACTION_FAILED_WARNING;
use crate::config::Config;
use crate::error::CoreResult;
use crate::features::{FeatureExtractor, MetricVector};
use crate::similarity::{SimilarityEngine, SimilarityMatrix};

/// Everything one run produces. Plain data, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRun {
    pub schema_version: u32,
    /// Feature names in vector order
    pub feature_names: Vec<String>,
    pub vectors: BTreeMap<String, MetricVector>,
    /// Matches per character, best first
    pub matches: BTreeMap<String, Vec<ArchetypeMatch>>,
    pub registry: ProfileRegistry,
    pub similarity: SimilarityMatrix,
    pub clusters: ClusterAssignment,
}

impl ProfileRun {
    pub fn character_count(&self) -> usize {
        self.vectors.len()
    }

    /// Full-member matches of one character.
    pub fn memberships(&self, character: &str) -> Vec<&ArchetypeMatch> {
        self.matches
            .get(character)
            .map(|ms| ms.iter().filter(|m| m.is_member()).collect())
            .unwrap_or_default()
    }

    /// Characters whose vectors carry a warning.
    pub fn warnings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vectors
            .iter()
            .filter_map(|(name, v)| v.warning().map(|w| (name.as_str(), w)))
    }
}

/// Wires the extractor, scorer, similarity, clustering and registry stages.
#[derive(Debug, Clone)]
pub struct ProfilingPipeline {
    extractor: FeatureExtractor,
    scorer: ArchetypeScorer,
    registry: ProfileRegistryBuilder,
    similarity: SimilarityEngine,
    clustering: ClusterEngine,
}

impl ProfilingPipeline {
    /// The scorer is bound to the extractor's schema.
    pub fn new(
        extractor: FeatureExtractor,
        catalog: Arc<ArchetypeCatalog>,
        thresholds: MembershipThresholds,
        clustering: ClusterEngine,
    ) -> Self {
        let scorer = ArchetypeScorer::new(extractor.schema().clone(), catalog.clone(), thresholds);
        Self {
            extractor,
            scorer,
            registry: ProfileRegistryBuilder::new(catalog),
            similarity: SimilarityEngine::new(),
            clustering,
        }
    }

    /// Default backends and the standard catalog, tuned by `config`.
    pub fn from_config(config: &Config) -> CoreResult<Self> {
        Self::from_config_with_catalog(config, Arc::new(ArchetypeCatalog::standard()))
    }

    pub fn from_config_with_catalog(
        config: &Config,
        catalog: Arc<ArchetypeCatalog>,
    ) -> CoreResult<Self> {
        config.validate()?;
        let thresholds = MembershipThresholds::from_config(&config.scoring)?;
        let clustering = ClusterEngine::from_config(&config.clustering)?;
        let extractor = FeatureExtractor::new(config.features.clone());
        Ok(Self::new(extractor, catalog, thresholds, clustering))
    }

    /// Swap the extractor, rebinding the scorer to its schema.
    pub fn with_extractor(self, extractor: FeatureExtractor) -> Self {
        let catalog = self.scorer.catalog().clone();
        let thresholds = self.scorer.thresholds();
        Self::new(extractor, catalog, thresholds, self.clustering)
    }

    pub fn with_clustering(mut self, clustering: ClusterEngine) -> Self {
        self.clustering = clustering;
        self
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn scorer(&self) -> &ArchetypeScorer {
        &self.scorer
    }

    pub fn catalog(&self) -> &Arc<ArchetypeCatalog> {
        self.scorer.catalog()
    }

    /// Extract every character in parallel.
    ///
    /// A panic while extracting one character is contained: that character
    /// gets an all-zero vector with a warning and the others are unaffected.
    pub fn extract_all<S>(&self, dialogues: &BTreeMap<String, Vec<S>>) -> BTreeMap<String, MetricVector>
    where
        S: AsRef<str> + Sync,
    {
        dialogues
            .par_iter()
            .map(|(name, lines)| {
                let extracted = catch_unwind(AssertUnwindSafe(|| self.extractor.extract(name, lines)));
                let vector = extracted.unwrap_or_else(|_| {
                    error!(character = %name, "Feature extraction panicked; using empty vector");
                    MetricVector::empty(name.as_str(), EXTRACTION_FAILED_WARNING, self.extractor.schema())
                });
                (name.clone(), vector)
            })
            .collect()
    }

    /// Profile every character of one run.
    #[instrument(skip(self, dialogues), fields(characters = dialogues.len()))]
    pub fn run<S>(&self, dialogues: &BTreeMap<String, Vec<S>>) -> CoreResult<ProfileRun>
    where
        S: AsRef<str> + Sync,
    {
        let start = Instant::now();
        let vectors = self.extract_all(dialogues);
        let run = self.analyze(vectors)?;
        info!(
            characters = run.character_count(),
            clusters = run.clusters.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Profiling run complete"
        );
        Ok(run)
    }

    /// Score, compare and cluster already extracted vectors.
    pub fn analyze(&self, vectors: BTreeMap<String, MetricVector>) -> CoreResult<ProfileRun> {
        let matches = self.scorer.assign_profiles(&vectors)?;
        let normalized = self.similarity.normalize(&vectors)?;
        let clusters = self.clustering.cluster(&normalized)?;
        let similarity = self.similarity.matrix_from(normalized);
        let registry = self.registry.build(&matches);

        let schema = self.scorer.schema();
        Ok(ProfileRun {
            schema_version: schema.version(),
            feature_names: schema.names().to_vec(),
            vectors,
            matches,
            registry,
            similarity,
            clusters,
        })
    }
}
