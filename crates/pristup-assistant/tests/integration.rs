//! Integration tests for the pristup-assistant crate.
//!
//! Each test starts a small axum server on an ephemeral port that mimics the
//! Assistants thread and run endpoints, then drives the real HTTP client,
//! backend and analyzer against it.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use pristup_assistant::{
    AssistantClient, AssistantConfig, AssistantError, DEFAULT_ASSISTANT_NAME,
    OpenAiAssistantBackend, RunStatus, provision_assistant,
};
use pristup_intent::{
    ACK_OUTPUT, ANALYZE_FUNCTION_NAME, AnalyzerConfig, IntentAction, IntentAnalyzer, IntentError,
    IntentKind, IntentResolutionEngine, RemoteIntentAnalyzer, RoutingDecision,
};

// ═══════════════════════════════════════════════════════════════════════
//  Mock Assistants server
// ═══════════════════════════════════════════════════════════════════════

/// How a run ends once it leaves `in_progress`.
#[derive(Clone)]
enum RunOutcome {
    RequiresAction(Vec<Value>),
    Completed,
    Failed,
}

struct MockState {
    outcome: RunOutcome,
    /// Number of `in_progress` answers before the outcome is reported.
    in_progress_polls: u32,
    fail_run_creation: bool,
    threads: AtomicU32,
    polls: AtomicU32,
    submitted: AtomicU32,
    messages: Mutex<Vec<Value>>,
    tool_outputs: Mutex<Vec<Value>>,
    deleted: Mutex<Vec<String>>,
    assistants: Mutex<Vec<Value>>,
    headers: Mutex<Vec<(String, String)>>,
}

impl MockState {
    fn new(outcome: RunOutcome) -> Self {
        Self {
            outcome,
            in_progress_polls: 2,
            fail_run_creation: false,
            threads: AtomicU32::new(0),
            polls: AtomicU32::new(0),
            submitted: AtomicU32::new(0),
            messages: Mutex::new(Vec::new()),
            tool_outputs: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            assistants: Mutex::new(Vec::new()),
            headers: Mutex::new(Vec::new()),
        }
    }

    fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

type Shared = Arc<MockState>;

async fn create_thread(State(state): State<Shared>, headers: HeaderMap) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    };
    state.headers.lock().unwrap().extend([
        ("authorization".to_owned(), header("authorization")),
        ("openai-beta".to_owned(), header("openai-beta")),
    ]);

    let n = state.threads.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({ "id": format!("thread_{n}"), "object": "thread" }))
}

async fn add_message(
    State(state): State<Shared>,
    Path(thread_id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.messages.lock().unwrap().push(body);
    Json(json!({ "id": "msg_1", "thread_id": thread_id }))
}

async fn create_run(
    State(state): State<Shared>,
    Path(thread_id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if state.fail_run_creation {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "message": "upstream unavailable" } })),
        );
    }
    assert!(body["assistant_id"].is_string());
    (
        StatusCode::OK,
        Json(json!({ "id": "run_1", "thread_id": thread_id, "status": "queued" })),
    )
}

async fn retrieve_run(
    State(state): State<Shared>,
    Path((_thread_id, run_id)): Path<(String, String)>,
) -> Json<Value> {
    let poll = state.polls.fetch_add(1, Ordering::SeqCst) + 1;
    if poll <= state.in_progress_polls {
        return Json(json!({ "id": run_id, "status": "in_progress" }));
    }

    // Once outputs are in, the run finishes normally.
    if state.submitted.load(Ordering::SeqCst) > 0 {
        return Json(json!({ "id": run_id, "status": "completed" }));
    }

    match &state.outcome {
        RunOutcome::RequiresAction(calls) => Json(json!({
            "id": run_id,
            "status": "requires_action",
            "required_action": {
                "type": "submit_tool_outputs",
                "submit_tool_outputs": { "tool_calls": calls }
            }
        })),
        RunOutcome::Completed => Json(json!({ "id": run_id, "status": "completed" })),
        RunOutcome::Failed => Json(json!({
            "id": run_id,
            "status": "failed",
            "last_error": { "code": "server_error", "message": "model crashed" }
        })),
    }
}

async fn submit_tool_outputs(
    State(state): State<Shared>,
    Path((_thread_id, run_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.submitted.fetch_add(1, Ordering::SeqCst);
    if let Some(outputs) = body["tool_outputs"].as_array() {
        state.tool_outputs.lock().unwrap().extend(outputs.iter().cloned());
    }
    Json(json!({ "id": run_id, "status": "queued" }))
}

async fn delete_thread(State(state): State<Shared>, Path(thread_id): Path<String>) -> Json<Value> {
    state.deleted.lock().unwrap().push(thread_id.clone());
    Json(json!({ "id": thread_id, "object": "thread.deleted", "deleted": true }))
}

async fn create_assistant(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    state.assistants.lock().unwrap().push(body);
    Json(json!({ "id": "asst_new", "object": "assistant" }))
}

/// Start the mock server and return its `/v1` base URL.
async fn start_mock(state: Shared) -> String {
    let app = Router::new()
        .route("/v1/threads", post(create_thread))
        .route("/v1/threads/{thread_id}", delete(delete_thread))
        .route("/v1/threads/{thread_id}/messages", post(add_message))
        .route("/v1/threads/{thread_id}/runs", post(create_run))
        .route("/v1/threads/{thread_id}/runs/{run_id}", get(retrieve_run))
        .route(
            "/v1/threads/{thread_id}/runs/{run_id}/submit_tool_outputs",
            post(submit_tool_outputs),
        )
        .route("/v1/assistants", post(create_assistant))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1")
}

fn tool_call(id: &str, arguments: Value) -> Value {
    json!({
        "id": id,
        "type": "function",
        "function": {
            "name": ANALYZE_FUNCTION_NAME,
            "arguments": arguments.to_string()
        }
    })
}

fn config(base_url: &str) -> AssistantConfig {
    AssistantConfig::new("sk-test")
        .with_assistant_id("asst_test")
        .with_base_url(base_url)
}

fn analyzer(base_url: &str) -> RemoteIntentAnalyzer {
    let backend = OpenAiAssistantBackend::new(config(base_url)).unwrap();
    let analyzer_config = AnalyzerConfig {
        poll_interval_ms: 5,
        max_attempts: 20,
        ..AnalyzerConfig::default()
    };
    RemoteIntentAnalyzer::with_config(Arc::new(backend), analyzer_config).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
//  Analyzer over HTTP
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn requires_action_yields_intent_and_cleans_up() {
    let state = Arc::new(MockState::new(RunOutcome::RequiresAction(vec![tool_call(
        "call_1",
        json!({ "intentType": "THEME", "action": "SET", "value": "dark", "confidence": 0.92 }),
    )])));
    let base = start_mock(state.clone()).await;

    let intent = analyzer(&base)
        .analyze("možeš li mi upaliti tamnu temu")
        .await
        .unwrap()
        .expect("intent expected");

    assert_eq!(intent.kind(), IntentKind::Theme);
    assert_eq!(intent.action(), Some(IntentAction::Set));
    assert_eq!(intent.value(), Some("dark"));
    assert!((intent.confidence() - 0.92).abs() < f64::EPSILON);

    let messages = state.messages.lock().unwrap().clone();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "možeš li mi upaliti tamnu temu");

    let outputs = state.tool_outputs.lock().unwrap().clone();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0]["tool_call_id"], "call_1");
    assert_eq!(outputs[0]["output"], ACK_OUTPUT);

    assert_eq!(state.deleted(), vec!["thread_1".to_owned()]);
}

#[tokio::test]
async fn requests_carry_auth_and_beta_headers() {
    let state = Arc::new(MockState::new(RunOutcome::Completed));
    let base = start_mock(state.clone()).await;

    let _ = analyzer(&base).analyze("bok").await.unwrap();

    let headers = state.headers.lock().unwrap().clone();
    assert!(headers.contains(&("authorization".to_owned(), "Bearer sk-test".to_owned())));
    assert!(headers.contains(&("openai-beta".to_owned(), "assistants=v2".to_owned())));
}

#[tokio::test]
async fn multiple_tool_calls_collapse_to_general_query() {
    let state = Arc::new(MockState::new(RunOutcome::RequiresAction(vec![
        tool_call("call_a", json!({ "intentType": "FONT_SIZE", "action": "INCREASE", "confidence": 0.9 })),
        tool_call("call_b", json!({ "intentType": "THEME", "action": "SET", "value": "light", "confidence": 0.9 })),
    ])));
    let base = start_mock(state.clone()).await;

    let intent = analyzer(&base).analyze("veći font i svijetla tema").await.unwrap().unwrap();

    assert_eq!(intent.kind(), IntentKind::GeneralQuery);
    assert!((intent.confidence() - 0.6).abs() < f64::EPSILON);
    assert_eq!(state.tool_outputs.lock().unwrap().len(), 2);
    assert_eq!(state.deleted().len(), 1);
}

#[tokio::test]
async fn completed_run_without_tool_call_yields_none() {
    let state = Arc::new(MockState::new(RunOutcome::Completed));
    let base = start_mock(state.clone()).await;

    let result = analyzer(&base).analyze("kakvo je vrijeme danas").await.unwrap();

    assert!(result.is_none());
    assert_eq!(state.deleted(), vec!["thread_1".to_owned()]);
}

#[tokio::test]
async fn failed_run_is_analysis_failure_and_thread_is_deleted() {
    let state = Arc::new(MockState::new(RunOutcome::Failed));
    let base = start_mock(state.clone()).await;

    let err = analyzer(&base).analyze("povećaj slova").await.unwrap_err();

    assert!(matches!(err, IntentError::AnalysisFailed { .. }));
    assert_eq!(state.deleted(), vec!["thread_1".to_owned()]);
}

#[tokio::test]
async fn api_error_on_run_creation_still_deletes_thread() {
    let mut mock = MockState::new(RunOutcome::Completed);
    mock.fail_run_creation = true;
    let state = Arc::new(mock);
    let base = start_mock(state.clone()).await;

    let err = analyzer(&base).analyze("smanji slova").await.unwrap_err();

    assert!(matches!(err, IntentError::AnalysisFailed { .. }));
    assert_eq!(state.polls.load(Ordering::SeqCst), 0);
    assert_eq!(state.deleted(), vec!["thread_1".to_owned()]);
}

#[tokio::test]
async fn engine_executes_remote_intent() {
    let state = Arc::new(MockState::new(RunOutcome::RequiresAction(vec![tool_call(
        "call_1",
        json!({ "intentType": "FONT_TYPE", "action": "SET", "value": "dyslexic", "confidence": 0.85 }),
    )])));
    let base = start_mock(state.clone()).await;

    let engine = IntentResolutionEngine::new(Arc::new(analyzer(&base)));
    let decision = engine.resolve("treba mi font za disleksiju").await;

    match decision {
        RoutingDecision::Execute(intent) => {
            assert_eq!(intent.kind(), IntentKind::FontType);
            assert_eq!(intent.value(), Some("dyslexic"));
        }
        other => panic!("expected execute, got {other:?}"),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Client and provisioning
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn client_surfaces_api_status() {
    let mut mock = MockState::new(RunOutcome::Completed);
    mock.fail_run_creation = true;
    let base = start_mock(Arc::new(mock)).await;

    let client = AssistantClient::new(config(&base)).unwrap();
    let err = client.create_run("thread_1", "asst_test", &[]).await.unwrap_err();

    match err {
        AssistantError::Api { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("upstream unavailable"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn client_retrieves_run_status() {
    let state = Arc::new(MockState::new(RunOutcome::Completed));
    let base = start_mock(state).await;

    let client = AssistantClient::new(config(&base)).unwrap();
    let run = client.retrieve_run("thread_1", "run_1").await.unwrap();

    assert_eq!(run.id, "run_1");
    assert_eq!(run.status, RunStatus::InProgress);
}

#[tokio::test]
async fn provision_posts_accessibility_definition() {
    let state = Arc::new(MockState::new(RunOutcome::Completed));
    let base = start_mock(state.clone()).await;

    let client = AssistantClient::new(AssistantConfig::new("sk-test").with_base_url(&base)).unwrap();
    let id = provision_assistant(&client, DEFAULT_ASSISTANT_NAME, "gpt-4o-mini")
        .await
        .unwrap();

    assert_eq!(id, "asst_new");
    let bodies = state.assistants.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["name"], DEFAULT_ASSISTANT_NAME);
    assert_eq!(bodies[0]["model"], "gpt-4o-mini");
    assert_eq!(bodies[0]["tools"][0]["function"]["name"], ANALYZE_FUNCTION_NAME);
}

#[tokio::test]
async fn unreachable_server_is_request_failure() {
    // Port 9 (discard) is not served in the test environment.
    let client = AssistantClient::new(config("http://127.0.0.1:9/v1")).unwrap();
    let err = client.create_thread().await.unwrap_err();
    assert!(matches!(err, AssistantError::RequestFailed { .. }));
}
