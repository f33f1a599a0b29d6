//! Narrative interpretation for psyprofile runs.
//!
//! Renders a [`ProfileRun`](psyprofile_core::ProfileRun) into a prompt and
//! asks a generative language service for a per-character psychological
//! reading. The text is attached to reports only; it never feeds back into
//! scoring.
//!
//! # Components
//!
//! - **Request**: registry summary, metrics summary and truncated dialogue
//!   excerpts
//! - **Prompt**: system instruction and user payload layout
//! - **Client**: `GenerativeLanguageInterpreter`, a reqwest client for the
//!   `generateContent` API
//! - **Service**: `InterpretationService`, timeout-bounded and best-effort
//!
//! # Usage
//!
//! ```rust,ignore
//! use psyprofile_core::config::InterpretationConfig;
//! use psyprofile_interpret::InterpretationService;
//!
//! async fn example(run: &psyprofile_core::ProfileRun) {
//!     let service = InterpretationService::from_config(&InterpretationConfig::default());
//!     if let Some(text) = service.interpret_best_effort(run).await {
//!         println!("{}", text);
//!     }
//! }
//! ```

pub mod client;
pub mod error;
pub mod prompt;
pub mod request;
pub mod service;

// Re-exports
pub use client::{GenerativeLanguageInterpreter, NarrativeInterpreter};
pub use error::{InterpretError, InterpretResult};
pub use prompt::{render_user_payload, SYSTEM_PROMPT};
pub use request::InterpretationRequest;
pub use service::InterpretationService;
