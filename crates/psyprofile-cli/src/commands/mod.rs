//! CLI command handlers
//!
//! # Modules
//!
//! - `analyze`: run the profiling pipeline over a dialogue map and write a JSON report
//! - `archetypes`: print the archetype catalog
//!
//! Handlers return the process exit code: 0 on success, 1 on error.

pub mod analyze;
pub mod archetypes;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use psyprofile_core::ArchetypeCatalog;

/// The catalog at `path`, or the built-in one.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Arc<ArchetypeCatalog>> {
    let catalog = match path {
        Some(path) => ArchetypeCatalog::from_file(path)
            .with_context(|| format!("loading archetype catalog from {}", path.display()))?,
        None => ArchetypeCatalog::standard(),
    };
    Ok(Arc::new(catalog))
}
