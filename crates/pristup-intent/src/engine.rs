//! Intent resolution engine.
//!
//! Orchestrates the two-tier lookup (quick match, then remote analysis) and
//! routes the result.  Dispatching an [`RoutingDecision::Execute`] is left to
//! the caller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::analyzer::IntentAnalyzer;
use crate::quick_match::QuickMatchResolver;
use crate::router::{ConfidenceRouter, RoutingDecision};

/// Resolves free text into a [`RoutingDecision`].
pub struct IntentResolutionEngine {
    quick: QuickMatchResolver,
    analyzer: Option<Arc<dyn IntentAnalyzer>>,
    router: ConfidenceRouter,
}

impl IntentResolutionEngine {
    /// Create an engine with remote analysis.
    pub fn new(analyzer: Arc<dyn IntentAnalyzer>) -> Self {
        Self {
            quick: QuickMatchResolver::new(),
            analyzer: Some(analyzer),
            router: ConfidenceRouter::new(),
        }
    }

    /// Create an engine that only knows the quick-match phrases.
    ///
    /// Every other input passes through to ordinary conversation.
    pub fn quick_match_only() -> Self {
        Self {
            quick: QuickMatchResolver::new(),
            analyzer: None,
            router: ConfidenceRouter::new(),
        }
    }

    /// Whether a remote analyzer is attached.
    pub fn has_analyzer(&self) -> bool {
        self.analyzer.is_some()
    }

    /// Resolve `text` into a routing decision.
    ///
    /// Never fails: analyzer errors are logged and treated as "no intent".
    pub async fn resolve(&self, text: &str) -> RoutingDecision {
        if let Some(intent) = self.quick.resolve(text) {
            let decision = self.router.route(Some(intent));
            info!(decision = decision.label(), source = "quick_match", "input resolved");
            return decision;
        }

        let intent = match &self.analyzer {
            Some(analyzer) => match analyzer.analyze(text).await {
                Ok(intent) => intent,
                Err(e) => {
                    warn!(error = %e, "intent analysis failed, falling back to conversation");
                    None
                }
            },
            None => {
                debug!("no remote analyzer configured");
                None
            }
        };

        let decision = self.router.route(intent);
        info!(decision = decision.label(), source = "remote", "input resolved");
        decision
    }
}
