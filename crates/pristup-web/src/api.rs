//! REST API route handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use pristup_intent::{Intent, RoutingDecision};

use crate::state::AppState;

/// Body of the analyze and resolve endpoints.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: String,
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

// ---------------------------------------------------------------------------
// GET /api/status
// ---------------------------------------------------------------------------

/// Response payload for the `/api/status` endpoint.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub remote_analysis: bool,
    pub started_at: String,
    pub uptime_seconds: u64,
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let uptime = (Utc::now() - state.started_at).num_seconds().max(0) as u64;
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        remote_analysis: state.analyzer.is_some(),
        started_at: state.started_at.to_rfc3339(),
        uptime_seconds: uptime,
    })
}

// ---------------------------------------------------------------------------
// POST /api/accessibility-assistant/analyze
// ---------------------------------------------------------------------------

/// Run remote analysis only and return the raw intent.
///
/// No result and failures both answer `NOT_ACCESSIBILITY` with confidence
/// 1.0 so the caller can always fall back to conversation; failures carry an
/// extra `error` field.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Response {
    let text = req.text.trim();
    if text.is_empty() {
        return bad_request("text is required");
    }

    let outcome = match &state.analyzer {
        Some(analyzer) => analyzer.analyze(text).await,
        None => Ok(None),
    };

    match outcome {
        Ok(Some(intent)) => Json(intent).into_response(),
        Ok(None) => Json(Intent::not_accessibility()).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "analysis failed");
            let mut body = serde_json::to_value(Intent::not_accessibility())
                .unwrap_or_else(|_| json!({}));
            body["error"] = Value::String(e.to_string());
            Json(body).into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// POST /api/intent/resolve
// ---------------------------------------------------------------------------

/// Run the full engine and return the routing decision.
///
/// Execute decisions carry the confirmation the dispatcher would show.
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Response {
    let text = req.text.trim();
    if text.is_empty() {
        return bad_request("text is required");
    }

    let decision = state.engine.resolve(text).await;
    let confirmation = match &decision {
        RoutingDecision::Execute(intent) => state.dispatcher.apply(intent),
        _ => None,
    };

    let mut body = match serde_json::to_value(&decision) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize decision");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal error" })),
            )
                .into_response();
        }
    };
    if let Some(confirmation) = confirmation {
        body["confirmation"] = Value::String(confirmation);
    }
    Json(body).into_response()
}
