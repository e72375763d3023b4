//! Wire types of the Assistants API (threads and runs).
//!
//! Only the fields the backend reads are modelled; everything else in the
//! responses is ignored.

use serde::{Deserialize, Serialize};

use pristup_intent::{PendingInvocation, SessionStatus};

/// Any object that carries an `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectId {
    pub id: String,
}

/// Status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    /// Statuses added to the API after this client was written.
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Map onto the engine's session lifecycle.
    ///
    /// Cancelled and incomplete runs will never produce a result, so they
    /// count as failures.  Unknown statuses keep the poll loop going.
    pub fn to_session_status(self) -> SessionStatus {
        match self {
            RunStatus::Queued => SessionStatus::Queued,
            RunStatus::InProgress | RunStatus::Unknown => SessionStatus::Running,
            RunStatus::RequiresAction => SessionStatus::NeedsInput,
            RunStatus::Completed => SessionStatus::Completed,
            RunStatus::Cancelling
            | RunStatus::Cancelled
            | RunStatus::Failed
            | RunStatus::Incomplete => SessionStatus::Failed,
            RunStatus::Expired => SessionStatus::Expired,
        }
    }
}

/// A run as returned by `GET /threads/{thread}/runs/{run}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub required_action: Option<RequiredAction>,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

impl Run {
    /// Function calls awaiting outputs, in the order the API listed them.
    pub fn pending_invocations(&self) -> Vec<PendingInvocation> {
        let Some(action) = &self.required_action else {
            return Vec::new();
        };
        action
            .submit_tool_outputs
            .tool_calls
            .iter()
            .filter(|call| call.kind == "function")
            .map(|call| PendingInvocation {
                id: call.id.clone(),
                function: call.function.name.clone(),
                arguments: call.function.arguments.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequiredAction {
    pub submit_tool_outputs: SubmitToolOutputs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitToolOutputs {
    #[serde(default)]
    pub tool_calls: Vec<RunToolCall>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
