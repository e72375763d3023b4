//! Accessibility intent resolution for Pristup.
//!
//! Decides whether a short piece of user input asks to change an
//! accessibility setting (font size, font type, color theme) or is ordinary
//! chat, and which action to apply.
//!
//! - **Quick match**: exact canonical phrases via [`QuickMatchResolver`].
//! - **Remote analysis**: a polled remote classification job via
//!   [`RemoteIntentAnalyzer`] over an [`AnalysisBackend`].
//! - **Routing**: execute / clarify / pass-through via [`route`].
//! - **Dispatch**: presentation side effects via [`ActionDispatcher`].
//! - **Orchestration**: [`IntentResolutionEngine`].

pub mod analyzer;
pub mod backend;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod intent;
pub mod quick_match;
pub mod router;
pub mod session;

pub use analyzer::{IntentAnalyzer, RemoteIntentAnalyzer};
pub use backend::{
    ACK_OUTPUT, ANALYZE_FUNCTION_NAME, AnalysisBackend, FunctionSpec, InvocationOutput, JobHandle,
    JobPoll, PendingInvocation,
};
pub use config::AnalyzerConfig;
pub use dispatcher::{
    ActionDispatcher, DetachedSurface, FontFamily, FontScale, HELP_SENTINEL, PresentationSnapshot,
    PresentationState, PresentationSurface,
};
pub use engine::IntentResolutionEngine;
pub use error::{IntentError, Result};
pub use intent::{Intent, IntentAction, IntentKind};
pub use quick_match::{QUICK_PHRASES, QuickMatchResolver};
pub use router::{ConfidenceRouter, RoutingDecision, route};
pub use session::{AnalysisSession, PollStep, SessionLease, SessionStatus};
