//! Configuration management for psyprofile.

pub mod constants;
mod sub_configs;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub use sub_configs::{
    ClusteringConfig, FeatureConfig, InterpretationConfig, LoggingConfig, ScoringConfig,
};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub interpretation: InterpretationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{PSYPROFILE_ENV}.toml (environment-specific)
    /// 3. Environment variables with PSYPROFILE_ prefix, `__` as separator
    ///    (e.g. `PSYPROFILE__SCORING__MEMBERSHIP_THRESHOLD=0.5`)
    pub fn load() -> CoreResult<Self> {
        let env = std::env::var("PSYPROFILE_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("PSYPROFILE").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| CoreError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> CoreResult<()> {
        let scoring = &self.scoring;
        for (name, value) in [
            ("scoring.membership_threshold", scoring.membership_threshold),
            ("scoring.partial_threshold", scoring.partial_threshold),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CoreError::ConfigError(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if scoring.partial_threshold > scoring.membership_threshold {
            return Err(CoreError::ConfigError(format!(
                "scoring.partial_threshold ({}) must not exceed scoring.membership_threshold ({})",
                scoring.partial_threshold, scoring.membership_threshold
            )));
        }

        let threshold = self.clustering.distance_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(CoreError::ConfigError(format!(
                "clustering.distance_threshold must be a non-negative number, got {}",
                threshold
            )));
        }

        if self.clustering.n_clusters == Some(0) {
            return Err(CoreError::ConfigError(
                "clustering.n_clusters must be greater than 0".into(),
            ));
        }

        if self.features.top_keywords == 0 {
            return Err(CoreError::ConfigError(
                "features.top_keywords must be greater than 0".into(),
            ));
        }

        if self.interpretation.timeout_secs == 0 {
            return Err(CoreError::ConfigError(
                "interpretation.timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!((config.scoring.membership_threshold - 0.45).abs() < f64::EPSILON);
        assert!((config.scoring.partial_threshold - 0.30).abs() < f64::EPSILON);
        assert_eq!(config.features.min_words_for_reliable, 30);
        assert!((config.clustering.distance_threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.clustering.n_clusters, None);
        println!("[PASS] test_default_config_is_valid");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[scoring]\nmembership_threshold = 0.5\n\n[clustering]\nn_clusters = 3"
        )
        .expect("write config");

        let config = Config::from_file(file.path()).expect("load config");
        assert!((config.scoring.membership_threshold - 0.5).abs() < f64::EPSILON);
        assert!((config.scoring.partial_threshold - 0.30).abs() < f64::EPSILON);
        assert_eq!(config.clustering.n_clusters, Some(3));
        assert_eq!(config.features.top_keywords, 15);
        println!(
            "[PASS] test_partial_file_keeps_defaults - membership={}, n_clusters={:?}",
            config.scoring.membership_threshold, config.clustering.n_clusters
        );
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let mut config = Config::default();
        config.scoring.partial_threshold = 0.6;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("partial_threshold"));
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let mut config = Config::default();
        config.scoring.membership_threshold = 1.5;
        assert!(config.validate().is_err());

        config.scoring.membership_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_cluster_count() {
        let mut config = Config::default();
        config.clustering.n_clusters = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/psyprofile.toml"))
            .unwrap_err();
        assert!(matches!(err, CoreError::ConfigError(_)));
    }
}
