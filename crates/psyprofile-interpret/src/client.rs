//! Generative language service client.
//!
//! Posts one `generateContent` call per run and concatenates the text parts
//! of the returned candidates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use psyprofile_core::config::InterpretationConfig;

use crate::error::{InterpretError, InterpretResult};
use crate::prompt::{render_user_payload, SYSTEM_PROMPT};
use crate::request::InterpretationRequest;

/// Anything that can turn a rendered run into narrative text.
#[async_trait]
pub trait NarrativeInterpreter: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    async fn interpret(&self, request: &InterpretationRequest) -> InterpretResult<String>;
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
    /// Set on reasoning summaries, which are not part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client for a Gemini-compatible `generateContent` endpoint.
pub struct GenerativeLanguageInterpreter {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f64,
    thinking_budget: u32,
}

impl std::fmt::Debug for GenerativeLanguageInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerativeLanguageInterpreter")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("thinking_budget", &self.thinking_budget)
            .finish_non_exhaustive()
    }
}

impl GenerativeLanguageInterpreter {
    pub fn new(config: &InterpretationConfig, api_key: impl Into<String>) -> InterpretResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
            temperature: config.temperature,
            thinking_budget: config.thinking_budget,
        })
    }

    /// `{base_url}/v1beta/models/{model}:generateContent`
    pub fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(&self, request: &InterpretationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(SYSTEM_PROMPT.to_string()),
                    thought: None,
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(render_user_payload(request)),
                    thought: None,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                thinking_config: ThinkingConfig {
                    thinking_budget: self.thinking_budget,
                },
            },
        }
    }
}

#[async_trait]
impl NarrativeInterpreter for GenerativeLanguageInterpreter {
    fn name(&self) -> &str {
        &self.model
    }

    async fn interpret(&self, request: &InterpretationRequest) -> InterpretResult<String> {
        info!(model = %self.model, "Requesting narrative interpretation");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(InterpretError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!(bytes = body.len(), "Received interpretation response");
        extract_text(&body)
    }
}

/// Concatenate the answer text of every candidate, skipping reasoning parts.
fn extract_text(body: &str) -> InterpretResult<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;

    let text: String = response
        .candidates
        .iter()
        .flat_map(|c| c.content.parts.iter())
        .filter(|p| p.thought != Some(true))
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        return Err(InterpretError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreter() -> GenerativeLanguageInterpreter {
        let config = InterpretationConfig {
            base_url: "https://example.test/".into(),
            ..Default::default()
        };
        GenerativeLanguageInterpreter::new(&config, "secret").expect("client")
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            interpreter().endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = InterpretationRequest {
            registry_summary: "R".into(),
            metrics_summary: "M".into(),
            excerpts: vec![("A".into(), "line".into())],
        };
        let body = serde_json::to_value(interpreter().request_body(&request)).expect("json");

        assert_eq!(body["generationConfig"]["temperature"], 0.8);
        assert_eq!(body["generationConfig"]["thinkingConfig"]["thinkingBudget"], 2048);
        assert_eq!(body["contents"][0]["role"], "user");
        let system = body["systemInstruction"]["parts"][0]["text"].as_str().expect("system");
        assert!(system.starts_with("YOU ARE A NARRATIVE PSYCHOLOGIST"));
        let user = body["contents"][0]["parts"][0]["text"].as_str().expect("user");
        assert!(user.contains("=== PROFILE REGISTRY ===\nR"));
        println!("[PASS] test_request_body_shape - {}", body["generationConfig"]);
    }

    #[test]
    fn test_extract_text_skips_thoughts() {
        let body = r###"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "planning...", "thought": true},
                        {"text": "## VILLAIN\n"},
                        {"text": "Hostile."}
                    ]
                }
            }]
        }"###;
        assert_eq!(extract_text(body).expect("text"), "## VILLAIN\nHostile.");
    }

    #[test]
    fn test_extract_text_errors() {
        assert!(matches!(
            extract_text(r#"{"candidates": []}"#),
            Err(InterpretError::EmptyResponse)
        ));
        assert!(matches!(
            extract_text("not json"),
            Err(InterpretError::InvalidResponse(_))
        ));
    }
}
