//! The remote reasoning capability the analyzer depends on.
//!
//! [`AnalysisBackend`] abstracts the lifecycle of one remote classification
//! job: create a session, submit text, poll, acknowledge structured-output
//! invocations, delete the session.  Transport is the implementor's concern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::Result;
use crate::session::SessionStatus;

/// Name of the structured-output function the remote reasoner is asked to call.
pub const ANALYZE_FUNCTION_NAME: &str = "analyze_accessibility_intent";

/// Output sent back for every acknowledged invocation.
pub const ACK_OUTPUT: &str = r#"{"success":true}"#;

/// A structured-output function offered to the remote reasoner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments.
    pub parameters: Value,
}

impl FunctionSpec {
    /// The accessibility classification function.
    pub fn analyze_intent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: "Analyze if the user's input contains an accessibility-related request"
                .into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "intentType": {
                        "type": "string",
                        "enum": ["FONT_SIZE", "FONT_TYPE", "THEME", "GENERAL_QUERY", "NOT_ACCESSIBILITY"],
                        "description": "The type of accessibility request detected"
                    },
                    "action": {
                        "type": "string",
                        "enum": ["INCREASE", "DECREASE", "RESET", "SET"],
                        "description": "The specific action requested"
                    },
                    "value": {
                        "type": "string",
                        "description": "Additional value for the action (e.g., 'dark' for theme)"
                    },
                    "confidence": {
                        "type": "number",
                        "description": "Confidence score for the detection (0.0 to 1.0)"
                    }
                },
                "required": ["intentType", "confidence"]
            }),
        }
    }
}

/// Remote identifiers of one analysis job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub session_id: String,
    pub job_id: String,
}

/// A structured-output invocation the remote reasoner is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInvocation {
    /// Identifier used to correlate the acknowledgment.
    pub id: String,
    /// Name of the function invoked.
    pub function: String,
    /// Raw JSON argument payload.
    pub arguments: String,
}

/// One poll of the remote job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPoll {
    pub status: SessionStatus,
    /// Invocations awaiting acknowledgment; only meaningful for
    /// [`SessionStatus::NeedsInput`].
    pub pending: Vec<PendingInvocation>,
}

impl JobPoll {
    /// A poll result with no pending invocations.
    pub fn status(status: SessionStatus) -> Self {
        Self {
            status,
            pending: Vec::new(),
        }
    }

    /// A poll result asking for the given invocations to be acknowledged.
    pub fn needs_input(pending: Vec<PendingInvocation>) -> Self {
        Self {
            status: SessionStatus::NeedsInput,
            pending,
        }
    }
}

/// Acknowledgment for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOutput {
    pub invocation_id: String,
    pub output: String,
}

impl InvocationOutput {
    /// Generic success acknowledgment.
    pub fn ack(invocation_id: impl Into<String>) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            output: ACK_OUTPUT.to_owned(),
        }
    }
}

/// Lifecycle operations of the remote structured-reasoning service.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Open a new, empty session and return its identifier.
    async fn create_session(&self) -> Result<String>;

    /// Submit `text` for classification, offering `function` as the only
    /// structured-output capability.  Returns the job identifier.
    async fn submit_text(
        &self,
        session_id: &str,
        text: &str,
        function: &FunctionSpec,
    ) -> Result<String>;

    /// Fetch the current job status.
    async fn poll_status(&self, job: &JobHandle) -> Result<JobPoll>;

    /// Acknowledge pending invocations, one output per invocation.
    async fn submit_results(&self, job: &JobHandle, outputs: &[InvocationOutput]) -> Result<()>;

    /// Delete the session and everything attached to it.
    async fn delete_session(&self, session_id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_function_schema_requires_kind_and_confidence() {
        let spec = FunctionSpec::analyze_intent(ANALYZE_FUNCTION_NAME);
        assert_eq!(spec.name, "analyze_accessibility_intent");
        let required = spec.parameters["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
        assert!(required.contains(&json!("intentType")));
        assert!(required.contains(&json!("confidence")));
        assert_eq!(
            spec.parameters["properties"]["intentType"]["enum"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
    }

    #[test]
    fn ack_output_is_generic_success() {
        let ack = InvocationOutput::ack("call_1");
        assert_eq!(ack.invocation_id, "call_1");
        let parsed: Value = serde_json::from_str(&ack.output).unwrap();
        assert_eq!(parsed["success"], true);
    }
}
