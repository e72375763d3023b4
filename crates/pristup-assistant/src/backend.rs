//! [`AnalysisBackend`] over Assistants threads and runs.
//!
//! A session is a thread; a job is a run on that thread.

use async_trait::async_trait;
use tracing::{debug, warn};

use pristup_intent::{AnalysisBackend, FunctionSpec, InvocationOutput, JobHandle, JobPoll};

use crate::client::AssistantClient;
use crate::config::AssistantConfig;
use crate::error::Result;

/// Drives accessibility classification through a provisioned assistant.
#[derive(Debug, Clone)]
pub struct OpenAiAssistantBackend {
    client: AssistantClient,
    assistant_id: String,
}

impl OpenAiAssistantBackend {
    /// Build a backend; the configuration must carry an assistant id.
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let assistant_id = config.require_assistant_id()?.to_owned();
        let client = AssistantClient::new(config)?;
        Ok(Self {
            client,
            assistant_id,
        })
    }

    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }
}

#[async_trait]
impl AnalysisBackend for OpenAiAssistantBackend {
    async fn create_session(&self) -> pristup_intent::Result<String> {
        let thread_id = self
            .client
            .create_thread()
            .await
            .map_err(|e| e.into_backend("create_session"))?;
        debug!(thread_id = %thread_id, "thread created");
        Ok(thread_id)
    }

    async fn submit_text(
        &self,
        session_id: &str,
        text: &str,
        function: &FunctionSpec,
    ) -> pristup_intent::Result<String> {
        self.client
            .add_user_message(session_id, text)
            .await
            .map_err(|e| e.into_backend("submit_text"))?;

        let run_id = self
            .client
            .create_run(session_id, &self.assistant_id, std::slice::from_ref(function))
            .await
            .map_err(|e| e.into_backend("submit_text"))?;
        debug!(thread_id = %session_id, run_id = %run_id, "run started");
        Ok(run_id)
    }

    async fn poll_status(&self, job: &JobHandle) -> pristup_intent::Result<JobPoll> {
        let run = self
            .client
            .retrieve_run(&job.session_id, &job.job_id)
            .await
            .map_err(|e| e.into_backend("poll_status"))?;

        let status = run.status.to_session_status();
        if let (true, Some(err)) = (status.is_terminal(), &run.last_error) {
            warn!(run_id = %run.id, code = %err.code, message = %err.message, "run ended with an error");
        }

        Ok(JobPoll {
            status,
            pending: run.pending_invocations(),
        })
    }

    async fn submit_results(
        &self,
        job: &JobHandle,
        outputs: &[InvocationOutput],
    ) -> pristup_intent::Result<()> {
        self.client
            .submit_tool_outputs(&job.session_id, &job.job_id, outputs)
            .await
            .map_err(|e| e.into_backend("submit_results"))
    }

    async fn delete_session(&self, session_id: &str) -> pristup_intent::Result<()> {
        self.client
            .delete_thread(session_id)
            .await
            .map_err(|e| e.into_backend("delete_session"))
    }
}
