//! Psyprofile Core Library
//!
//! Quantitative psycholinguistic profiling of fictional characters from
//! their dialogue.
//!
//! # Architecture
//!
//! This crate provides:
//! - Feature extraction (`FeatureExtractor`, `MetricVector`, `FeatureSchema`)
//!   with injectable sentiment, tagging and lemmatization backends
//! - A data-driven archetype catalog and weighted-distance scorer
//!   (`ArchetypeCatalog`, `ArchetypeScorer`)
//! - Per-archetype rosters (`ProfileRegistryBuilder`)
//! - Run-level cosine similarity and average-linkage clustering
//! - The end-to-end `ProfilingPipeline`
//! - Error types, result aliases and configuration
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use psyprofile_core::{Config, ProfilingPipeline};
//!
//! let pipeline = ProfilingPipeline::from_config(&Config::default()).unwrap();
//! let mut dialogue = BTreeMap::new();
//! dialogue.insert("VILLAIN".to_string(), vec!["I hate you!", "Get out now!"]);
//!
//! let run = pipeline.run(&dialogue).unwrap();
//! assert_eq!(run.registry.len(), pipeline.catalog().len());
//! ```

pub mod archetype;
pub mod clustering;
pub mod config;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod similarity;

// Re-exports for convenience
pub use archetype::{
    ArchetypeCatalog, ArchetypeDefinition, ArchetypeMatch, ArchetypeScorer, Criterion,
    MembershipThresholds, MembershipTier, ProfileRegistry, ProfileRegistryBuilder,
};
pub use clustering::{ClusterAssignment, ClusterCriterion, ClusterEngine, ClusterError};
pub use config::Config;
pub use error::{BackendError, CoreError, CoreResult};
pub use features::{FeatureExtractor, FeatureSchema, MetricVector};
pub use pipeline::{ProfileRun, ProfilingPipeline};
pub use similarity::{SimilarityEngine, SimilarityMatrix};
