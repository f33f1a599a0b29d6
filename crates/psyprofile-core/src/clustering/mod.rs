//! Hierarchical grouping of characters.
//!
//! Runs over the same per-run normalized rows as [`crate::similarity`], so
//! cluster membership and the similarity matrix always agree on scaling.

mod agglomerative;
mod error;

pub use agglomerative::{ClusterAssignment, ClusterCriterion, ClusterEngine};
pub use error::ClusterError;
