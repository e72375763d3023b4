//! Intent engine error types.
//!
//! All engine subsystems surface errors through [`IntentError`].  Only
//! [`IntentError::AnalysisFailed`] and [`IntentError::AnalysisTimedOut`] ever
//! leave the remote analyzer; the remaining variants are absorbed and logged
//! where they occur.

/// Unified error type for the intent engine.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    // -- Analysis errors -----------------------------------------------------
    /// The remote job reported failure or expiry, or the remote service could
    /// not be reached while driving the job.
    #[error("intent analysis failed: {reason}")]
    AnalysisFailed { reason: String },

    /// The poll loop hit its attempt ceiling without reaching a terminal state.
    #[error("intent analysis timed out after {attempts} polls")]
    AnalysisTimedOut { attempts: u32 },

    /// A structured-output payload did not match the intent schema.
    #[error("malformed structured result: {reason}")]
    MalformedResult { reason: String },

    /// Deleting a remote session failed.
    #[error("failed to release session {session_id}: {reason}")]
    SessionCleanupFailed { session_id: String, reason: String },

    // -- Backend errors ------------------------------------------------------
    /// A call into the remote reasoning backend failed.
    #[error("backend {operation} failed: {reason}")]
    Backend {
        operation: &'static str,
        reason: String,
    },

    // -- Configuration errors ------------------------------------------------
    /// Configuration validation failed.
    #[error("config error: {reason}")]
    Config { reason: String },
}

impl IntentError {
    /// Shorthand for a [`IntentError::Backend`] error.
    pub fn backend(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Backend {
            operation,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the intent crate.
pub type Result<T> = std::result::Result<T, IntentError>;
