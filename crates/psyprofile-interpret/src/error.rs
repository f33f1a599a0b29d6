//! Error types for psyprofile-interpret.

use thiserror::Error;

/// Errors raised while requesting a narrative interpretation.
///
/// None of these ever reach the profiling results: callers going through
/// [`crate::InterpretationService::interpret_best_effort`] only see `None`.
#[derive(Debug, Error)]
pub enum InterpretError {
    /// The API key environment variable is unset or empty.
    #[error("API key not set: {env_var}")]
    MissingCredentials { env_var: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Interpretation timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The response parsed but carried no text.
    #[error("Empty response from interpretation service")]
    EmptyResponse,
}

impl From<serde_json::Error> for InterpretError {
    fn from(err: serde_json::Error) -> Self {
        InterpretError::InvalidResponse(err.to_string())
    }
}

/// Result type alias for interpretation operations.
pub type InterpretResult<T> = Result<T, InterpretError>;
