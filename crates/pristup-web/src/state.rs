//! Shared application state for the web server.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use pristup_intent::{ActionDispatcher, DetachedSurface, IntentAnalyzer, IntentResolutionEngine};

/// Shared state accessible from every Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// Quick match, remote analysis and routing.
    pub engine: Arc<IntentResolutionEngine>,

    /// The remote analyzer on its own, for the raw analyze endpoint.
    pub analyzer: Option<Arc<dyn IntentAnalyzer>>,

    /// Produces confirmations without touching any real presentation.
    /// The browser applies the change itself.
    pub dispatcher: Arc<ActionDispatcher>,

    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(analyzer: Option<Arc<dyn IntentAnalyzer>>) -> Self {
        let engine = match &analyzer {
            Some(analyzer) => IntentResolutionEngine::new(Arc::clone(analyzer)),
            None => IntentResolutionEngine::quick_match_only(),
        };
        Self {
            engine: Arc::new(engine),
            analyzer,
            dispatcher: Arc::new(ActionDispatcher::new(Arc::new(DetachedSurface))),
            started_at: Utc::now(),
        }
    }
}
