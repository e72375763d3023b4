//! Analyzer configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::ANALYZE_FUNCTION_NAME;
use crate::error::{IntentError, Result};

/// Tunables for [`crate::RemoteIntentAnalyzer`].
///
/// The defaults bound the worst-case wait to roughly six seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Delay between two status polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Maximum number of status polls before giving up.
    pub max_attempts: u32,
    /// Name of the structured-output function offered to the remote reasoner.
    pub function_name: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            max_attempts: 60,
            function_name: ANALYZE_FUNCTION_NAME.to_owned(),
        }
    }
}

impl AnalyzerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Upper bound on the time spent sleeping between polls.
    pub fn max_wait(&self) -> Duration {
        self.poll_interval() * self.max_attempts
    }

    /// Reject configurations that would never poll or would spin.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(IntentError::Config {
                reason: "max_attempts must be at least 1".into(),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(IntentError::Config {
                reason: "poll_interval_ms must be at least 1".into(),
            });
        }
        if self.function_name.trim().is_empty() {
            return Err(IntentError::Config {
                reason: "function_name must not be empty".into(),
            });
        }
        Ok(())
    }
}
