//! Sub-configuration structures for psyprofile components.
//!
//! This module contains the individual configuration sections that make up
//! the main `Config` structure. Every field has a serde default so partial
//! configuration files only need to name what they override.

use serde::{Deserialize, Serialize};

use super::constants;

/// Feature extraction configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FeatureConfig {
    /// Word count below which a small-sample warning is attached (default: 30)
    #[serde(default = "default_min_words_for_reliable")]
    pub min_words_for_reliable: usize,

    /// Number of ranked keywords kept per character (default: 15)
    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,
}

fn default_min_words_for_reliable() -> usize {
    constants::features::MIN_WORDS_FOR_RELIABLE
}

fn default_top_keywords() -> usize {
    constants::features::TOP_KEYWORDS
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            min_words_for_reliable: default_min_words_for_reliable(),
            top_keywords: default_top_keywords(),
        }
    }
}

/// Archetype scoring configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ScoringConfig {
    /// Minimum score for full membership (default: 0.45)
    #[serde(default = "default_membership_threshold")]
    pub membership_threshold: f64,

    /// Minimum score for a partial match (default: 0.30)
    #[serde(default = "default_partial_threshold")]
    pub partial_threshold: f64,
}

fn default_membership_threshold() -> f64 {
    constants::membership::MEMBERSHIP
}

fn default_partial_threshold() -> f64 {
    constants::membership::PARTIAL
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            membership_threshold: default_membership_threshold(),
            partial_threshold: default_partial_threshold(),
        }
    }
}

/// Clustering configuration.
///
/// When `n_clusters` is set it wins over `distance_threshold`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ClusteringConfig {
    /// Linkage distance at or above which clusters are not merged (default: 0.5)
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f64,

    /// Explicit target cluster count
    #[serde(default)]
    pub n_clusters: Option<usize>,
}

fn default_distance_threshold() -> f64 {
    constants::clustering::DISTANCE_THRESHOLD
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            distance_threshold: default_distance_threshold(),
            n_clusters: None,
        }
    }
}

/// Narrative interpretation service configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct InterpretationConfig {
    /// Whether to request an interpretation at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Environment variable that holds the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Service base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Reasoning token budget
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: u32,

    /// Maximum characters of raw dialogue per character in the request
    #[serde(default = "default_max_excerpt_chars")]
    pub max_excerpt_chars: usize,
}

fn default_true() -> bool {
    true
}

fn default_api_key_env() -> String {
    constants::interpretation::API_KEY_ENV.to_string()
}

fn default_base_url() -> String {
    constants::interpretation::BASE_URL.to_string()
}

fn default_model() -> String {
    constants::interpretation::MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    constants::interpretation::TIMEOUT_SECS
}

fn default_temperature() -> f64 {
    constants::interpretation::TEMPERATURE
}

fn default_thinking_budget() -> u32 {
    constants::interpretation::THINKING_BUDGET
}

fn default_max_excerpt_chars() -> usize {
    constants::interpretation::MAX_EXCERPT_CHARS
}

impl Default for InterpretationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            thinking_budget: default_thinking_budget(),
            max_excerpt_chars: default_max_excerpt_chars(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: "pretty", "compact" or "json"
    #[serde(default = "default_format")]
    pub format: String,

    /// Include file/line in log lines
    #[serde(default)]
    pub include_location: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            include_location: false,
        }
    }
}
