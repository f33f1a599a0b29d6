//! `analyze` command
//!
//! Reads a JSON object mapping character names to dialogue lines, runs the
//! profiling pipeline and writes a JSON report to stdout or `--output`.
//! Per-character status, assignments and clusters go to the log on stderr.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use tracing::{error, info, warn};

use psyprofile_core::archetype::ArchetypeMatch;
use psyprofile_core::{ClusterCriterion, Config, ProfileRun, ProfilingPipeline};
use psyprofile_interpret::InterpretationService;

use super::load_catalog;

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// JSON file: `{ "CHARACTER": ["line", ...], ... }`
    #[arg(short, long)]
    pub input: PathBuf,

    /// Archetype catalog file (TOML or JSON) instead of the built-in one
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Cut the dendrogram at exactly this many clusters
    #[arg(long)]
    pub clusters: Option<usize>,

    /// Average-linkage distance at which merging stops
    #[arg(long, conflicts_with = "clusters")]
    pub distance_threshold: Option<f64>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Request a narrative interpretation (best effort)
    #[arg(long)]
    pub interpret: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

/// How the numbers in a report were produced.
#[derive(Debug, Serialize)]
pub struct Methodology<'a> {
    pub metrics: &'static str,
    pub profile_assignment: &'static str,
    pub membership_threshold: f64,
    pub partial_threshold: f64,
    pub min_words_for_reliable: usize,
    pub similarity: &'static str,
    pub clustering: &'static str,
    pub cluster_criterion: ClusterCriterion,
    pub schema_version: u32,
    pub feature_names: &'a [String],
}

/// The JSON document written by `analyze`.
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub methodology: Methodology<'a>,
    pub run: &'a ProfileRun,
    pub interpretation: Option<String>,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(run: &'a ProfileRun, config: &Config, interpretation: Option<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            methodology: Methodology {
                metrics: "lexical, syntactic, sentiment, part-of-speech and lexicon-category ratios",
                profile_assignment: "weighted_distance_scoring",
                membership_threshold: config.scoring.membership_threshold,
                partial_threshold: config.scoring.partial_threshold,
                min_words_for_reliable: config.features.min_words_for_reliable,
                similarity: "cosine_similarity",
                clustering: "agglomerative_average_cosine",
                cluster_criterion: ClusterCriterion::from_config(&config.clustering),
                schema_version: run.schema_version,
                feature_names: &run.feature_names,
            },
            run,
            interpretation,
        }
    }
}

pub async fn handle_analyze(args: AnalyzeArgs, config: Config) -> i32 {
    match analyze(&args, config).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

async fn analyze(args: &AnalyzeArgs, mut config: Config) -> Result<()> {
    apply_overrides(&mut config, args)?;

    let dialogues = read_dialogues(&args.input).await?;
    let catalog = load_catalog(args.catalog.as_deref())?;
    let pipeline = ProfilingPipeline::from_config_with_catalog(&config, catalog)
        .context("building profiling pipeline")?;

    info!(characters = dialogues.len(), input = %args.input.display(), "Analyzing dialogue");
    let run = pipeline.run(&dialogues).context("profiling run")?;

    for (name, vector) in &run.vectors {
        match vector.warning() {
            Some(w) => warn!("{}: WARNING: {}", name, w),
            None => info!("{}: OK ({} words)", name, vector.word_count()),
        }
    }
    for line in format_assignments(&run) {
        info!("{}", line);
    }
    for line in format_clusters(&run) {
        info!("{}", line);
    }

    let interpretation = if args.interpret {
        InterpretationService::from_config(&config.interpretation)
            .interpret_best_effort(&run)
            .await
    } else {
        None
    };

    let report = AnalysisReport::new(&run, &config, interpretation);
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("serializing report")?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Fold CLI cluster flags into `config` and re-validate.
fn apply_overrides(config: &mut Config, args: &AnalyzeArgs) -> Result<()> {
    if let Some(n) = args.clusters {
        config.clustering.n_clusters = Some(n);
    }
    if let Some(threshold) = args.distance_threshold {
        config.clustering.distance_threshold = threshold;
        config.clustering.n_clusters = None;
    }
    config.validate().context("invalid configuration")?;
    Ok(())
}

async fn read_dialogues(path: &Path) -> Result<BTreeMap<String, Vec<String>>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading dialogue from {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| {
        format!(
            "parsing {}: expected an object of character name -> list of lines",
            path.display()
        )
    })
}

fn format_scores(matches: &[&ArchetypeMatch]) -> String {
    matches
        .iter()
        .map(|m| format!("{}({:.3})", m.archetype, m.score))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per character: full memberships, else partials, else none.
fn format_assignments(run: &ProfileRun) -> Vec<String> {
    run.matches
        .iter()
        .map(|(name, matches)| {
            let full: Vec<&ArchetypeMatch> = matches.iter().filter(|m| m.is_member()).collect();
            if !full.is_empty() {
                return format!("{} -> [{}]", name, format_scores(&full));
            }
            let partial: Vec<&ArchetypeMatch> = matches.iter().filter(|m| m.is_partial()).collect();
            if !partial.is_empty() {
                return format!("{} -> partial: [{}]", name, format_scores(&partial));
            }
            format!("{} -> no strong match", name)
        })
        .collect()
}

/// `Cluster N: a, b` lines, numbered from 1.
fn format_clusters(run: &ProfileRun) -> Vec<String> {
    run.clusters
        .iter()
        .map(|(id, members)| format!("Cluster {}: {}", id + 1, members.join(", ")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(input: PathBuf) -> AnalyzeArgs {
        AnalyzeArgs {
            input,
            catalog: None,
            clusters: None,
            distance_threshold: None,
            output: None,
            interpret: false,
            pretty: false,
        }
    }

    fn input_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().expect("tempfile");
        write!(file, "{}", json).expect("write");
        file
    }

    const CAST: &str = r#"{
        "ALPHA": ["I hate this! Get out now!", "Destroy them all. No mercy!"],
        "BETA": ["I think we should consider the evidence carefully.", "Perhaps the data suggests otherwise?"],
        "GAMMA": ["Thank you, friend. We love you and our family."]
    }"#;

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        let mut a = args(PathBuf::from("x.json"));
        a.clusters = Some(3);
        apply_overrides(&mut config, &a).expect("valid");
        assert_eq!(config.clustering.n_clusters, Some(3));

        let mut a = args(PathBuf::from("x.json"));
        a.distance_threshold = Some(0.25);
        apply_overrides(&mut config, &a).expect("valid");
        assert_eq!(config.clustering.distance_threshold, 0.25);
        assert_eq!(config.clustering.n_clusters, None);

        let mut a = args(PathBuf::from("x.json"));
        a.clusters = Some(0);
        assert!(apply_overrides(&mut config, &a).is_err());
        println!("[PASS] test_apply_overrides - cluster flags validated");
    }

    #[tokio::test]
    async fn test_read_dialogues_rejects_wrong_shape() {
        let good = input_file(CAST);
        let dialogues = read_dialogues(good.path()).await.expect("valid input");
        assert_eq!(dialogues.len(), 3);
        assert_eq!(dialogues["GAMMA"].len(), 1);

        let bad = input_file(r#"["not", "a", "map"]"#);
        let err = read_dialogues(bad.path()).await.expect_err("array input");
        assert!(format!("{:#}", err).contains("character name -> list of lines"));
    }

    #[test]
    fn test_format_lines() {
        let pipeline = ProfilingPipeline::from_config(&Config::default()).expect("pipeline");
        let dialogues: BTreeMap<String, Vec<String>> = serde_json::from_str(CAST).expect("cast");
        let run = pipeline.run(&dialogues).expect("run");

        let assignments = format_assignments(&run);
        assert_eq!(assignments.len(), 3);
        assert!(assignments[0].starts_with("ALPHA -> "));
        assert!(assignments.iter().all(|l| l.contains(" -> [")
            || l.contains(" -> partial: [")
            || l.ends_with(" -> no strong match")));

        let clusters = format_clusters(&run);
        assert!(!clusters.is_empty());
        assert!(clusters[0].starts_with("Cluster 1: ALPHA"));
        println!("[PASS] test_format_lines - {:?} / {:?}", assignments, clusters);
    }

    #[tokio::test]
    async fn test_analyze_writes_report() {
        let input = input_file(CAST);
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("report.json");

        let mut a = args(input.path().to_path_buf());
        a.output = Some(output.clone());
        a.clusters = Some(2);
        analyze(&a, Config::default()).await.expect("analyze");

        let written = std::fs::read_to_string(&output).expect("report");
        let report: serde_json::Value = serde_json::from_str(&written).expect("json");
        assert!(report["generated_at"].is_string());
        assert_eq!(report["methodology"]["profile_assignment"], "weighted_distance_scoring");
        assert_eq!(report["methodology"]["membership_threshold"], 0.45);
        assert_eq!(report["methodology"]["cluster_criterion"]["mode"], "count");
        assert_eq!(report["methodology"]["feature_names"].as_array().map(Vec::len), Some(27));
        assert!(report["run"]["vectors"]["BETA"].is_object());
        assert_eq!(report["run"]["clusters"].as_object().map(|c| c.len()), Some(2));
        assert!(report["interpretation"].is_null());
        println!("[PASS] test_analyze_writes_report - report at {}", output.display());
    }

    #[tokio::test]
    async fn test_handle_analyze_missing_input() {
        let code = handle_analyze(args(PathBuf::from("/nonexistent/lines.json")), Config::default()).await;
        assert_eq!(code, 1);
    }
}
