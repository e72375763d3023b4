//! HTTP client for the OpenAI Assistants API (v2).
//!
//! Covers the handful of thread and run endpoints the intent engine needs,
//! plus assistant creation for provisioning.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use pristup_intent::{FunctionSpec, InvocationOutput};

use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::provision::AssistantDefinition;
use crate::types::{ObjectId, Run};

/// Beta header value required by the Assistants endpoints.
const ASSISTANTS_BETA: &str = "assistants=v2";

/// Thin client over the Assistants REST endpoints.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    config: Arc<AssistantConfig>,
    http: reqwest::Client,
}

impl AssistantClient {
    /// Create a new client with the given configuration.
    pub fn new(config: AssistantConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AssistantError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AssistantError::RequestFailed {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Threads
    // -----------------------------------------------------------------------

    /// `POST /threads`; returns the thread id.
    pub async fn create_thread(&self) -> Result<String> {
        let thread: ObjectId = self.send(Method::POST, "/threads", Some(&json!({}))).await?;
        Ok(thread.id)
    }

    /// `POST /threads/{thread}/messages` with a user message.
    pub async fn add_user_message(&self, thread_id: &str, text: &str) -> Result<()> {
        let body = json!({ "role": "user", "content": text });
        let _: Value = self
            .send(
                Method::POST,
                &format!("/threads/{thread_id}/messages"),
                Some(&body),
            )
            .await?;
        Ok(())
    }

    /// `DELETE /threads/{thread}`.
    pub async fn delete_thread(&self, thread_id: &str) -> Result<()> {
        let _: Value = self
            .send(Method::DELETE, &format!("/threads/{thread_id}"), None)
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Runs
    // -----------------------------------------------------------------------

    /// `POST /threads/{thread}/runs`; returns the run id.
    pub async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        functions: &[FunctionSpec],
    ) -> Result<String> {
        let body = build_run_body(assistant_id, functions);
        let run: ObjectId = self
            .send(
                Method::POST,
                &format!("/threads/{thread_id}/runs"),
                Some(&body),
            )
            .await?;
        Ok(run.id)
    }

    /// `GET /threads/{thread}/runs/{run}`.
    pub async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.send(
            Method::GET,
            &format!("/threads/{thread_id}/runs/{run_id}"),
            None,
        )
        .await
    }

    /// `POST /threads/{thread}/runs/{run}/submit_tool_outputs`.
    pub async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[InvocationOutput],
    ) -> Result<()> {
        let body = build_tool_outputs_body(outputs);
        let _: Value = self
            .send(
                Method::POST,
                &format!("/threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
                Some(&body),
            )
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Assistants
    // -----------------------------------------------------------------------

    /// `POST /assistants`; returns the new assistant id.
    pub async fn create_assistant(&self, definition: &AssistantDefinition) -> Result<String> {
        let body = definition.to_request_body();
        let assistant: ObjectId = self.send(Method::POST, "/assistants", Some(&body)).await?;
        Ok(assistant.id)
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.config.api_key)).map_err(|e| {
                AssistantError::RequestFailed {
                    reason: format!("invalid authorization header: {e}"),
                }
            })?,
        );
        headers.insert("OpenAI-Beta", HeaderValue::from_static(ASSISTANTS_BETA));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        let url = format!("{}{path}", self.config.base_url);
        debug!(method = %method, url = %url, "sending assistants request");

        let mut request = self.http.request(method, &url).headers(self.headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AssistantError::RequestFailed {
                reason: format!("failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            return Err(AssistantError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| AssistantError::ParseFailed {
            reason: format!("invalid response from {path}: {e}"),
        })
    }
}

// ===========================================================================
// Request bodies (free functions)
// ===========================================================================

/// Body of a run creation request offering the given functions.
pub fn build_run_body(assistant_id: &str, functions: &[FunctionSpec]) -> Value {
    json!({
        "assistant_id": assistant_id,
        "tools": functions_to_tools(functions),
    })
}

/// Convert function specs into the `tools` array format.
pub fn functions_to_tools(functions: &[FunctionSpec]) -> Value {
    let tools: Vec<Value> = functions
        .iter()
        .map(|f| {
            json!({
                "type": "function",
                "function": {
                    "name": f.name,
                    "description": f.description,
                    "parameters": f.parameters,
                }
            })
        })
        .collect();
    json!(tools)
}

/// Body of a tool-output submission.
pub fn build_tool_outputs_body(outputs: &[InvocationOutput]) -> Value {
    let outputs: Vec<Value> = outputs
        .iter()
        .map(|o| json!({ "tool_call_id": o.invocation_id, "output": o.output }))
        .collect();
    json!({ "tool_outputs": outputs })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pristup_intent::ANALYZE_FUNCTION_NAME;

    use super::*;

    #[test]
    fn empty_api_key_returns_error() {
        let result = AssistantClient::new(AssistantConfig::new(""));
        assert!(matches!(result, Err(AssistantError::MissingApiKey)));
    }

    #[test]
    fn headers_carry_bearer_and_beta() {
        let client = AssistantClient::new(AssistantConfig::new("sk-test")).unwrap();
        let headers = client.headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer sk-test");
        assert_eq!(headers["OpenAI-Beta"], "assistants=v2");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn run_body_offers_single_function() {
        let spec = FunctionSpec::analyze_intent(ANALYZE_FUNCTION_NAME);
        let body = build_run_body("asst_1", std::slice::from_ref(&spec));

        assert_eq!(body["assistant_id"], "asst_1");
        let tools = body["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["type"], "function");
        assert_eq!(tools[0]["function"]["name"], ANALYZE_FUNCTION_NAME);
        assert_eq!(tools[0]["function"]["parameters"], spec.parameters);
    }

    #[test]
    fn tool_outputs_body_has_one_entry_per_output() {
        let body = build_tool_outputs_body(&[
            InvocationOutput::ack("call_a"),
            InvocationOutput::ack("call_b"),
        ]);
        let outputs = body["tool_outputs"].as_array().unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0]["tool_call_id"], "call_a");
        assert_eq!(outputs[1]["tool_call_id"], "call_b");
        assert_eq!(outputs[0]["output"], pristup_intent::ACK_OUTPUT);
    }
}
