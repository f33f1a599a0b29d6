//! Best-effort interpretation around a [`NarrativeInterpreter`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use psyprofile_core::config::constants::interpretation::{
    API_KEY_ENV, MAX_EXCERPT_CHARS, TIMEOUT_SECS,
};
use psyprofile_core::config::InterpretationConfig;
use psyprofile_core::ProfileRun;

use crate::client::{GenerativeLanguageInterpreter, NarrativeInterpreter};
use crate::error::{InterpretError, InterpretResult};
use crate::request::InterpretationRequest;

/// Optional enrichment step: never blocks or fails a profiling run.
#[derive(Clone)]
pub struct InterpretationService {
    interpreter: Option<Arc<dyn NarrativeInterpreter>>,
    timeout: Duration,
    max_excerpt_chars: usize,
    api_key_env: String,
}

impl std::fmt::Debug for InterpretationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterpretationService")
            .field("interpreter", &self.interpreter.as_ref().map(|i| i.name().to_string()))
            .field("timeout", &self.timeout)
            .field("max_excerpt_chars", &self.max_excerpt_chars)
            .field("api_key_env", &self.api_key_env)
            .finish()
    }
}

impl InterpretationService {
    /// Build from configuration, reading the API key from the configured
    /// environment variable.
    pub fn from_config(config: &InterpretationConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env).ok();
        Self::from_config_with_key(config, api_key)
    }

    /// Like [`from_config`](Self::from_config) with an explicit key.
    ///
    /// A disabled config, a missing key or a client that fails to build all
    /// leave the service without an interpreter.
    pub fn from_config_with_key(config: &InterpretationConfig, api_key: Option<String>) -> Self {
        let interpreter = if !config.enabled {
            info!("Narrative interpretation disabled by configuration");
            None
        } else {
            match api_key.filter(|k| !k.trim().is_empty()) {
                None => {
                    info!(env_var = %config.api_key_env, "API key not set; skipping narrative interpretation");
                    None
                }
                Some(key) => match GenerativeLanguageInterpreter::new(config, key) {
                    Ok(client) => Some(Arc::new(client) as Arc<dyn NarrativeInterpreter>),
                    Err(e) => {
                        warn!(error = %e, "Failed to build interpretation client");
                        None
                    }
                },
            }
        };

        Self {
            interpreter,
            timeout: Duration::from_secs(config.timeout_secs),
            max_excerpt_chars: config.max_excerpt_chars,
            api_key_env: config.api_key_env.clone(),
        }
    }

    /// Service around an explicit interpreter.
    pub fn with_interpreter(
        interpreter: Arc<dyn NarrativeInterpreter>,
        timeout: Duration,
        max_excerpt_chars: usize,
    ) -> Self {
        Self {
            interpreter: Some(interpreter),
            timeout,
            max_excerpt_chars,
            api_key_env: API_KEY_ENV.to_string(),
        }
    }

    /// A service that never interprets.
    pub fn disabled() -> Self {
        Self {
            interpreter: None,
            timeout: Duration::from_secs(TIMEOUT_SECS),
            max_excerpt_chars: MAX_EXCERPT_CHARS,
            api_key_env: API_KEY_ENV.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.interpreter.is_some()
    }

    pub fn request_for(&self, run: &ProfileRun) -> InterpretationRequest {
        InterpretationRequest::from_run(run, self.max_excerpt_chars)
    }

    /// Interpret `run`, bounded by the configured timeout.
    ///
    /// # Errors
    /// `MissingCredentials` when no interpreter is configured, `Timeout`
    /// when the call exceeds the limit, or whatever the interpreter reports.
    pub async fn interpret(&self, run: &ProfileRun) -> InterpretResult<String> {
        let Some(interpreter) = self.interpreter.as_ref() else {
            return Err(InterpretError::MissingCredentials {
                env_var: self.api_key_env.clone(),
            });
        };

        let request = self.request_for(run);
        match tokio::time::timeout(self.timeout, interpreter.interpret(&request)).await {
            Ok(result) => result,
            Err(_) => Err(InterpretError::Timeout {
                secs: self.timeout.as_secs(),
            }),
        }
    }

    /// Interpret `run`, turning every failure into `None`.
    pub async fn interpret_best_effort(&self, run: &ProfileRun) -> Option<String> {
        if !self.is_available() {
            return None;
        }
        match self.interpret(run).await {
            Ok(text) => {
                info!(chars = text.len(), "Narrative interpretation received");
                Some(text)
            }
            Err(e) => {
                warn!(error = %e, "Narrative interpretation failed; continuing without it");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_disables_service() {
        let config = InterpretationConfig::default();
        assert!(!InterpretationService::from_config_with_key(&config, None).is_available());
        assert!(!InterpretationService::from_config_with_key(&config, Some("  ".into())).is_available());
        assert!(InterpretationService::from_config_with_key(&config, Some("key".into())).is_available());
        println!("[PASS] test_missing_key_disables_service - blank keys are treated as absent");
    }

    #[tokio::test]
    async fn test_missing_credentials_names_configured_variable() {
        let config = InterpretationConfig {
            api_key_env: "STUDIO_LLM_KEY".into(),
            ..Default::default()
        };
        let service = InterpretationService::from_config_with_key(&config, None);
        let run = psyprofile_core::ProfilingPipeline::from_config(&psyprofile_core::Config::default())
            .expect("pipeline")
            .run(&std::collections::BTreeMap::<String, Vec<String>>::new())
            .expect("run");

        match service.interpret(&run).await {
            Err(InterpretError::MissingCredentials { env_var }) => assert_eq!(env_var, "STUDIO_LLM_KEY"),
            other => panic!("expected MissingCredentials, got {:?}", other),
        }
        println!("[PASS] test_missing_credentials_names_configured_variable - STUDIO_LLM_KEY reported");
    }

    #[test]
    fn test_disabled_config() {
        let config = InterpretationConfig {
            enabled: false,
            ..Default::default()
        };
        let service = InterpretationService::from_config_with_key(&config, Some("key".into()));
        assert!(!service.is_available());
        assert!(!InterpretationService::disabled().is_available());
    }
}
