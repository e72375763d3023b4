//! Analysis session lifecycle.
//!
//! The remote job moves through [`SessionStatus`] states.  After every poll
//! the analyzer asks [`transition`] what to do next; the table is the single
//! place where "keep polling", "parse", "give up" and "fail" are decided.
//!
//! ```text
//! Queued ──> Running ──> NeedsInput ──> (acknowledged, stop)
//!                │  └──> Completed  ──> (no structured output, stop)
//!                └─────> Failed | Expired ──> (abort)
//! ```
//!
//! [`SessionLease`] owns the remote session for the lifetime of one analysis
//! call and makes sure it is deleted on every exit path.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::{AnalysisBackend, JobHandle, JobPoll};
use crate::error::IntentError;

// ---------------------------------------------------------------------------
// Status and transitions
// ---------------------------------------------------------------------------

/// Lifecycle state of a remote analysis job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Queued,
    Running,
    /// The remote reasoner wants structured-output invocations acknowledged.
    NeedsInput,
    Completed,
    Failed,
    Expired,
}

impl SessionStatus {
    /// Whether the remote job can no longer make progress on its own.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::Failed | SessionStatus::Expired
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Queued => "queued",
            SessionStatus::Running => "running",
            SessionStatus::NeedsInput => "needs_input",
            SessionStatus::Completed => "completed",
            SessionStatus::Failed => "failed",
            SessionStatus::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// What the poll loop does after observing a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    /// Sleep for one interval and poll again.
    Wait,
    /// Exactly one invocation is pending: parse it.
    ParseSingle,
    /// More than one invocation is pending: collapse to a general query.
    CollapseAmbiguous,
    /// The job finished without invoking the function.
    NoStructuredOutput,
    /// The job failed or expired.
    Abort,
}

/// Transition table of the poll loop.
pub fn transition(status: SessionStatus, pending: usize) -> PollStep {
    match (status, pending) {
        (SessionStatus::Queued | SessionStatus::Running, _) => PollStep::Wait,
        (SessionStatus::NeedsInput, 0) => PollStep::Wait,
        (SessionStatus::NeedsInput, 1) => PollStep::ParseSingle,
        (SessionStatus::NeedsInput, _) => PollStep::CollapseAmbiguous,
        (SessionStatus::Completed, _) => PollStep::NoStructuredOutput,
        (SessionStatus::Failed | SessionStatus::Expired, _) => PollStep::Abort,
    }
}

// ---------------------------------------------------------------------------
// Local view of one job
// ---------------------------------------------------------------------------

/// Local view of a single in-flight remote job.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    handle: JobHandle,
    status: SessionStatus,
    attempts: u32,
}

impl AnalysisSession {
    /// A freshly submitted job.
    pub fn new(handle: JobHandle) -> Self {
        Self {
            handle,
            status: SessionStatus::Queued,
            attempts: 0,
        }
    }

    pub fn handle(&self) -> &JobHandle {
        &self.handle
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Number of polls observed so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Record a poll result and return the next step.
    pub fn observe(&mut self, poll: &JobPoll) -> PollStep {
        self.attempts += 1;
        if poll.status != self.status {
            debug!(
                session_id = %self.handle.session_id,
                job_id = %self.handle.job_id,
                from = %self.status,
                to = %poll.status,
                attempt = self.attempts,
                "session status changed"
            );
        }
        self.status = poll.status;
        transition(poll.status, poll.pending.len())
    }
}

// ---------------------------------------------------------------------------
// Lease
// ---------------------------------------------------------------------------

/// Exclusive ownership of a remote session.
///
/// Call [`SessionLease::release`] when done.  If the lease is dropped without
/// being released (for example when the analysis future is cancelled), the
/// deletion is spawned onto the current Tokio runtime.
pub struct SessionLease {
    backend: Arc<dyn AnalysisBackend>,
    session_id: String,
    released: bool,
}

impl SessionLease {
    pub fn new(backend: Arc<dyn AnalysisBackend>, session_id: String) -> Self {
        Self {
            backend,
            session_id,
            released: false,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Delete the remote session.  Failures are logged, never returned.
    ///
    /// The lease only counts as released once the delete call returns; if
    /// this future is cancelled mid-call, `Drop` schedules the delete again.
    pub async fn release(mut self) {
        delete_quietly(self.backend.as_ref(), &self.session_id).await;
        self.released = true;
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let backend = Arc::clone(&self.backend);
        let session_id = std::mem::take(&mut self.session_id);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!(session_id = %session_id, "session lease dropped, releasing in background");
                handle.spawn(async move {
                    delete_quietly(backend.as_ref(), &session_id).await;
                });
            }
            Err(_) => {
                warn!(session_id = %session_id, "session lease dropped outside a runtime, remote session leaked");
            }
        }
    }
}

async fn delete_quietly(backend: &dyn AnalysisBackend, session_id: &str) {
    match backend.delete_session(session_id).await {
        Ok(()) => debug!(session_id = %session_id, "session released"),
        Err(e) => {
            let err = IntentError::SessionCleanupFailed {
                session_id: session_id.to_owned(),
                reason: e.to_string(),
            };
            warn!(error = %err, "best-effort session cleanup failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
