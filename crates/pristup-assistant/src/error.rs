//! Assistant backend error types.

use pristup_intent::IntentError;

/// Unified error type for the OpenAI Assistants backend.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    // -- Transport -----------------------------------------------------------
    /// The HTTP request could not be sent or its body could not be read.
    #[error("assistant request failed: {reason}")]
    RequestFailed { reason: String },

    /// The API answered with a non-success status.
    #[error("assistant API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("assistant response parse error: {reason}")]
    ParseFailed { reason: String },

    // -- Configuration -------------------------------------------------------
    /// No API key was configured.
    #[error("missing api key (set OPENAI_API_KEY)")]
    MissingApiKey,

    /// No assistant id was configured.
    #[error("missing assistant id (set ACCESSIBILITY_ASSISTANT_ID)")]
    MissingAssistantId,
}

/// Convenience alias used throughout the assistant crate.
pub type Result<T> = std::result::Result<T, AssistantError>;

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestFailed {
            reason: err.to_string(),
        }
    }
}

impl AssistantError {
    /// Wrap into the engine's backend error for the named operation.
    pub fn into_backend(self, operation: &'static str) -> IntentError {
        IntentError::backend(operation, self.to_string())
    }
}
