//! OpenAI Assistants backend for the Pristup intent engine.
//!
//! - [`client`] -- HTTP client for the thread, run and assistant endpoints.
//! - [`backend`] -- [`pristup_intent::AnalysisBackend`] implementation.
//! - [`provision`] -- one-off creation of the accessibility assistant.
//! - [`types`] -- wire types for runs.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod provision;
pub mod types;

pub use backend::OpenAiAssistantBackend;
pub use client::AssistantClient;
pub use config::{AssistantConfig, DEFAULT_MODEL, OPENAI_BASE_URL};
pub use error::{AssistantError, Result};
pub use provision::{
    ASSISTANT_INSTRUCTIONS, AssistantDefinition, DEFAULT_ASSISTANT_NAME, provision_assistant,
};
pub use types::{Run, RunStatus};
