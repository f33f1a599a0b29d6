//! Test fixtures for the psyprofile workspace.
//!
//! - [`fixtures`]: sample casts and synthetic metric vectors
//! - [`fakes`]: analysis backends with fixed or failing behavior

pub mod fakes;
pub mod fixtures;

pub use fakes::{
    FailingLemmatizer, FailingSentiment, FailingTagger, FixedSentiment, PanickingTagger,
};
pub use fixtures::{
    confrontational_lines, dialogues, ideal_vector, random_vector, sample_cast, vector_with,
};
