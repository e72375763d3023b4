//! Connection settings for the OpenAI Assistants API.

use std::time::Duration;

use crate::error::{AssistantError, Result};

/// Default OpenAI API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when provisioning a new assistant.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// Settings for [`crate::AssistantClient`].
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Identifier of the provisioned accessibility assistant.
    pub assistant_id: Option<String>,
    /// Base URL for the API, without a trailing slash.
    pub base_url: String,
    /// Model used when provisioning.
    pub model: String,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl AssistantConfig {
    /// Create a configuration against the public OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            assistant_id: None,
            base_url: OPENAI_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Set the assistant id.
    pub fn with_assistant_id(mut self, id: impl Into<String>) -> Self {
        self.assistant_id = Some(id.into());
        self
    }

    /// Point at a different (e.g. self-hosted or test) endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Build a configuration from the environment.
    ///
    /// Reads `OPENAI_API_KEY` (required), `ACCESSIBILITY_ASSISTANT_ID`,
    /// `OPENAI_BASE_URL` and `OPENAI_MODEL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("OPENAI_API_KEY").ok_or(AssistantError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Some(id) = non_empty("ACCESSIBILITY_ASSISTANT_ID") {
            config = config.with_assistant_id(id);
        }
        if let Some(url) = non_empty("OPENAI_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Some(model) = non_empty("OPENAI_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// The assistant id, or an error when it is not configured.
    pub fn require_assistant_id(&self) -> Result<&str> {
        self.assistant_id
            .as_deref()
            .ok_or(AssistantError::MissingAssistantId)
    }
}
