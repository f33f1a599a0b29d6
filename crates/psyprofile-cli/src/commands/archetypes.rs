//! `archetypes` command: print the catalog.

use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::error;

use psyprofile_core::ArchetypeCatalog;

use super::load_catalog;

/// Arguments for the archetypes command.
#[derive(Args, Debug)]
pub struct ArchetypesArgs {
    /// Archetype catalog file (TOML or JSON) instead of the built-in one
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Output as JSON instead of human-readable
    #[arg(long)]
    pub json: bool,
}

pub fn handle_archetypes(args: ArchetypesArgs) -> i32 {
    let catalog = match load_catalog(args.catalog.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load catalog: {:#}", e);
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(catalog.as_ref()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    } else {
        print!("{}", format_catalog(&catalog));
    }
    0
}

/// Human-readable catalog listing.
fn format_catalog(catalog: &ArchetypeCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Archetype Catalog ({} archetypes)", catalog.len());
    let _ = writeln!(out, "==================================\n");

    for archetype in catalog.iter() {
        let _ = writeln!(out, "{}", archetype.name);
        let _ = writeln!(out, "  {}", archetype.description);
        let _ = writeln!(out, "{}\n", archetype.describe_criteria());
    }
    out
}
