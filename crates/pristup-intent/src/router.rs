//! Confidence-based routing.
//!
//! [`route`] maps an optional intent to one of three outcomes.  Clauses are
//! evaluated in order; the clarify clauses come before the execute clause so
//! an explicit general query or an uncertain signal is never acted upon.
//!
//! | # | condition                                          | decision    |
//! |---|----------------------------------------------------|-------------|
//! | 1 | no intent                                          | PassThrough |
//! | 2 | kind is GeneralQuery                               | Clarify     |
//! | 3 | 0.3 < confidence < 0.7                             | Clarify     |
//! | 4 | kind is not NotAccessibility and confidence < 0.7  | Clarify     |
//! | 5 | confidence >= 0.7                                  | Execute     |
//! | 6 | otherwise                                          | PassThrough |

use serde::Serialize;

use crate::intent::{Intent, IntentKind};

/// Lower bound (exclusive) of the uncertain confidence band.
pub const UNCERTAIN_LOWER: f64 = 0.3;

/// Confidence at or above which an intent is executed.
pub const EXECUTE_THRESHOLD: f64 = 0.7;

/// The outcome of routing one piece of input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", content = "intent", rename_all = "snake_case")]
pub enum RoutingDecision {
    /// Apply the intent.
    Execute(Intent),
    /// Show the accessibility help menu.
    Clarify,
    /// Forward the text to the general conversational agent.
    PassThrough,
}

impl RoutingDecision {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            RoutingDecision::Execute(_) => "execute",
            RoutingDecision::Clarify => "clarify",
            RoutingDecision::PassThrough => "pass_through",
        }
    }
}

/// Stateless router; see [`route`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceRouter;

impl ConfidenceRouter {
    pub fn new() -> Self {
        Self
    }

    pub fn route(&self, intent: Option<Intent>) -> RoutingDecision {
        route(intent)
    }
}

/// Decide what to do with an intent.
pub fn route(intent: Option<Intent>) -> RoutingDecision {
    let Some(intent) = intent else {
        return RoutingDecision::PassThrough;
    };
    let confidence = intent.confidence();

    if intent.kind() == IntentKind::GeneralQuery {
        return RoutingDecision::Clarify;
    }
    if confidence > UNCERTAIN_LOWER && confidence < EXECUTE_THRESHOLD {
        return RoutingDecision::Clarify;
    }
    // Overlaps the band above; additionally catches confidence <= 0.3 for
    // accessibility kinds.
    if intent.kind() != IntentKind::NotAccessibility && confidence < EXECUTE_THRESHOLD {
        return RoutingDecision::Clarify;
    }
    if confidence >= EXECUTE_THRESHOLD {
        return RoutingDecision::Execute(intent);
    }
    RoutingDecision::PassThrough
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
