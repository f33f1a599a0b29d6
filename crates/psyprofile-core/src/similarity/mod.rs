//! Pairwise character similarity.
//!
//! Feature columns are min-max normalized across the characters of one run,
//! then compared with cosine similarity. The normalized rows are shared with
//! [`crate::clustering`].

mod cosine;
mod engine;

pub use cosine::{cosine_distance, cosine_similarity, min_max_normalize};
pub use engine::{NormalizedFeatures, SimilarityEngine, SimilarityMatrix};
