//! Archetype catalog, scoring and per-archetype rosters.
//!
//! - [`ArchetypeCatalog`]: ordered, data-driven archetype definitions
//! - [`ArchetypeScorer`]: weighted-distance score and membership tier per pair
//! - [`ProfileRegistryBuilder`]: inverts matches into per-archetype rosters

mod catalog;
mod definition;
mod registry;
mod scorer;

pub use catalog::ArchetypeCatalog;
pub use definition::{ArchetypeDefinition, Criterion};
pub use registry::{ProfileRegistry, ProfileRegistryBuilder, ProfileRegistryEntry, RosterEntry};
pub use scorer::{
    ArchetypeMatch, ArchetypeScorer, FeatureContribution, MembershipThresholds, MembershipTier,
};
