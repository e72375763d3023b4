//! Remote intent analysis.
//!
//! [`RemoteIntentAnalyzer`] drives one remote classification job per call:
//!
//! 1. open a session and submit the text with the classification function,
//! 2. poll at a fixed interval up to the attempt ceiling,
//! 3. resolve pending structured-output invocations into an [`Intent`],
//! 4. release the session, whatever the outcome.
//!
//! Only [`IntentError::AnalysisFailed`] and [`IntentError::AnalysisTimedOut`]
//! are returned; malformed payloads and cleanup failures are absorbed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::backend::{AnalysisBackend, FunctionSpec, InvocationOutput, JobHandle, PendingInvocation};
use crate::config::AnalyzerConfig;
use crate::error::{IntentError, Result};
use crate::intent::Intent;
use crate::session::{AnalysisSession, PollStep, SessionLease};

// ---------------------------------------------------------------------------
// Analyzer trait
// ---------------------------------------------------------------------------

/// Anything that can turn free text into an optional structured intent.
///
/// `Ok(None)` means no structured classification was obtained and the caller
/// should fall back to ordinary conversation.
#[async_trait]
pub trait IntentAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Option<Intent>>;
}

// ---------------------------------------------------------------------------
// Remote analyzer
// ---------------------------------------------------------------------------

/// Classifies text through a remote asynchronous reasoning job.
pub struct RemoteIntentAnalyzer {
    backend: Arc<dyn AnalysisBackend>,
    config: AnalyzerConfig,
    function: FunctionSpec,
}

impl RemoteIntentAnalyzer {
    /// Create an analyzer with the default polling configuration.
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        let config = AnalyzerConfig::default();
        let function = FunctionSpec::analyze_intent(&config.function_name);
        Self {
            backend,
            config,
            function,
        }
    }

    /// Create an analyzer with a custom configuration.
    pub fn with_config(backend: Arc<dyn AnalysisBackend>, config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let function = FunctionSpec::analyze_intent(&config.function_name);
        Ok(Self {
            backend,
            config,
            function,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Submit the text and run the poll loop on an already opened session.
    async fn drive(&self, session_id: &str, text: &str) -> Result<Option<Intent>> {
        let job_id = self
            .backend
            .submit_text(session_id, text, &self.function)
            .await
            .map_err(into_failure)?;

        let mut session = AnalysisSession::new(JobHandle {
            session_id: session_id.to_owned(),
            job_id,
        });
        let interval = self.config.poll_interval();
        debug!(
            job_id = %session.handle().job_id,
            max_wait_ms = self.config.max_wait().as_millis() as u64,
            "polling remote job"
        );

        while session.attempts() < self.config.max_attempts {
            tokio::time::sleep(interval).await;

            let poll = self
                .backend
                .poll_status(session.handle())
                .await
                .map_err(into_failure)?;

            match session.observe(&poll) {
                PollStep::Wait => {}
                PollStep::ParseSingle => {
                    let intent = self.parse_invocation(&poll.pending[0]);
                    self.acknowledge(&session, &poll.pending).await;
                    return Ok(Some(intent));
                }
                PollStep::CollapseAmbiguous => {
                    warn!(
                        invocations = poll.pending.len(),
                        "remote reasoner proposed several structured calls, treating as general query"
                    );
                    self.acknowledge(&session, &poll.pending).await;
                    return Ok(Some(Intent::ambiguous()));
                }
                PollStep::NoStructuredOutput => {
                    debug!(
                        attempts = session.attempts(),
                        "job completed without a structured result"
                    );
                    return Ok(None);
                }
                PollStep::Abort => {
                    return Err(IntentError::AnalysisFailed {
                        reason: format!("remote job ended as {}", session.status()),
                    });
                }
            }
        }

        Err(IntentError::AnalysisTimedOut {
            attempts: session.attempts(),
        })
    }

    /// Parse the single pending invocation, downgrading anything unusable.
    fn parse_invocation(&self, invocation: &PendingInvocation) -> Intent {
        let parsed = if invocation.function == self.function.name {
            Intent::from_arguments(&invocation.arguments)
        } else {
            Err(IntentError::MalformedResult {
                reason: format!("unexpected function `{}`", invocation.function),
            })
        };

        parsed.unwrap_or_else(|e| {
            warn!(
                error = %e,
                invocation_id = %invocation.id,
                "falling back to not-accessibility"
            );
            Intent::not_accessibility()
        })
    }

    /// Acknowledge every pending invocation with a generic success output.
    ///
    /// The session is deleted right after, so a failed acknowledgment is only
    /// logged.
    async fn acknowledge(&self, session: &AnalysisSession, pending: &[PendingInvocation]) {
        let outputs: Vec<InvocationOutput> = pending
            .iter()
            .map(|p| InvocationOutput::ack(p.id.clone()))
            .collect();

        if let Err(e) = self.backend.submit_results(session.handle(), &outputs).await {
            warn!(error = %e, count = outputs.len(), "failed to acknowledge invocations");
        }
    }
}

#[async_trait]
impl IntentAnalyzer for RemoteIntentAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Option<Intent>> {
        let span = info_span!("analyze", request_id = %Uuid::now_v7());

        async move {
            let session_id = self
                .backend
                .create_session()
                .await
                .map_err(into_failure)?;
            let lease = SessionLease::new(Arc::clone(&self.backend), session_id);

            let outcome = self.drive(lease.session_id(), text).await;
            lease.release().await;

            match &outcome {
                Ok(Some(intent)) => info!(
                    kind = %intent.kind(),
                    action = ?intent.action(),
                    confidence = intent.confidence(),
                    "remote analysis resolved intent"
                ),
                Ok(None) => info!("remote analysis produced no structured result"),
                Err(e) => warn!(error = %e, "remote analysis failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

/// Collapse backend errors into the analyzer's failure kind.
fn into_failure(err: IntentError) -> IntentError {
    match err {
        IntentError::AnalysisFailed { .. } | IntentError::AnalysisTimedOut { .. } => err,
        other => IntentError::AnalysisFailed {
            reason: other.to_string(),
        },
    }
}
