//! Error types for psyprofile-core.

use thiserror::Error;

use crate::clustering::ClusterError;

/// Top-level error type for psyprofile-core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Feature schema mismatch: expected v{expected_version} with {expected_len} features, got v{actual_version} with {actual_len}")]
    SchemaMismatch {
        expected_version: u32,
        expected_len: usize,
        actual_version: u32,
        actual_len: usize,
    },

    #[error("Feature schema mismatch: expected lexicon categories {expected:?}, got {actual:?}")]
    FeatureNamesMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Invalid feature vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Archetype catalog error: {0}")]
    CatalogError(String),

    #[error("Clustering error: {0}")]
    Cluster(#[from] ClusterError),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create a ValidationError.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::ConfigError(err.to_string())
    }
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Failure reported by an injectable analysis backend (sentiment, tagging,
/// lemmatization).
///
/// Backend failures never abort a run: the extractor substitutes a neutral
/// fallback for the affected step and logs the error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{backend} backend failed: {message}")]
pub struct BackendError {
    /// Backend name (e.g. "sentiment", "pos-tagger").
    pub backend: String,
    /// Description of the failure.
    pub message: String,
}

impl BackendError {
    pub fn new(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_display() {
        let err = CoreError::SchemaMismatch {
            expected_version: 1,
            expected_len: 27,
            actual_version: 1,
            actual_len: 20,
        };
        let msg = err.to_string();
        assert!(msg.contains("27"));
        assert!(msg.contains("20"));
        println!("[PASS] test_schema_mismatch_display - {}", msg);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = CoreError::DimensionMismatch {
            expected: 27,
            actual: 15,
        };
        assert!(err.to_string().contains("27"));
        assert!(err.to_string().contains("15"));
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::new("sentiment", "lexicon unavailable");
        assert_eq!(
            err.to_string(),
            "sentiment backend failed: lexicon unavailable"
        );
    }

    #[test]
    fn test_cluster_error_converts() {
        let err: CoreError = ClusterError::invalid_parameter("n_clusters must be > 0").into();
        assert!(err.to_string().contains("n_clusters"));
    }
}
