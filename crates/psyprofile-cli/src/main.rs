//! psyprofile command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Profile every character in a dialogue map and print the report
//! psyprofile analyze --input dialogues.json --pretty
//!
//! # Fixed cluster count, report written to a file
//! psyprofile analyze --input dialogues.json --clusters 3 --output report.json
//!
//! # Attach a narrative interpretation (needs GEMINI_API_KEY)
//! psyprofile analyze --input dialogues.json --interpret
//!
//! # Show the archetype catalog
//! psyprofile archetypes
//!
//! # Debug logging
//! RUST_LOG=debug psyprofile analyze --input dialogues.json
//! ```
//!
//! Configuration priority: CLI flags > `PSYPROFILE__*` environment >
//! `--config` file (or `config/*.toml`) > defaults.

mod commands;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use psyprofile_core::config::{Config, LoggingConfig};

use commands::analyze::AnalyzeArgs;
use commands::archetypes::ArchetypesArgs;

/// Psycholinguistic character profiling.
#[derive(Parser, Debug)]
#[command(name = "psyprofile", version, about, propagate_version = true)]
struct Cli {
    /// Configuration file (TOML). Defaults to config/default.toml when present.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Profile characters from a JSON map of name -> dialogue lines
    Analyze(AnalyzeArgs),
    /// List the archetype catalog with its criteria
    Archetypes(ArchetypesArgs),
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Config::load().context("loading configuration"),
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config.logging);

    let code = match cli.command {
        Commands::Analyze(args) => commands::analyze::handle_analyze(args, config).await,
        Commands::Archetypes(args) => commands::archetypes::handle_archetypes(args),
    };
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_analyze_flags() {
        let cli = Cli::try_parse_from([
            "psyprofile",
            "analyze",
            "--input",
            "lines.json",
            "--clusters",
            "3",
            "--pretty",
            "--config",
            "custom.toml",
        ])
        .expect("parse");

        assert_eq!(cli.config.as_deref(), Some(Path::new("custom.toml")));
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.input, PathBuf::from("lines.json"));
                assert_eq!(args.clusters, Some(3));
                assert!(args.pretty);
                assert!(!args.interpret);
                assert!(args.output.is_none());
            }
            other => panic!("expected analyze, got {:?}", other),
        }
        println!("[PASS] test_parse_analyze_flags - global --config accepted after subcommand");
    }

    #[test]
    fn test_clusters_conflicts_with_threshold() {
        let result = Cli::try_parse_from([
            "psyprofile",
            "analyze",
            "--input",
            "lines.json",
            "--clusters",
            "2",
            "--distance-threshold",
            "0.4",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("tempfile");
        writeln!(file, "[logging]\nlevel = \"debug\"\nformat = \"compact\"").expect("write");
        let config = load_config(Some(file.path())).expect("config");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "compact");
        assert_eq!(config.scoring.membership_threshold, 0.45);

        let missing = load_config(Some(Path::new("/nonexistent/psyprofile.toml")));
        assert!(format!("{:#}", missing.expect_err("missing file")).contains("loading configuration"));
    }
}
