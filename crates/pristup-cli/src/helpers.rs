//! Shared helpers used across CLI subcommands.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pristup_assistant::{AssistantConfig, AssistantError, OpenAiAssistantBackend};
use pristup_intent::{
    AnalyzerConfig, IntentAnalyzer, IntentResolutionEngine, QUICK_PHRASES, RemoteIntentAnalyzer,
};

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ---------------------------------------------------------------------------
// Engine construction
// ---------------------------------------------------------------------------

/// Build the remote analyzer from the environment.
///
/// Returns `None` when the API key or assistant id is missing; the engine
/// then only knows the quick-match phrases.
pub fn build_analyzer(config: &AnalyzerConfig) -> Result<Option<Arc<dyn IntentAnalyzer>>> {
    let assistant = match AssistantConfig::from_env() {
        Ok(c) => c,
        Err(AssistantError::MissingApiKey) => {
            info!("OPENAI_API_KEY not set, remote analysis disabled");
            return Ok(None);
        }
        Err(e) => return Err(e).context("invalid assistant configuration"),
    };

    let backend = match OpenAiAssistantBackend::new(assistant) {
        Ok(b) => b,
        Err(AssistantError::MissingAssistantId) => {
            warn!("ACCESSIBILITY_ASSISTANT_ID not set, remote analysis disabled (run `pristup init-assistant`)");
            return Ok(None);
        }
        Err(e) => return Err(e).context("failed to create assistant backend"),
    };
    info!(assistant_id = %backend.assistant_id(), "remote analysis enabled");

    let analyzer = RemoteIntentAnalyzer::with_config(Arc::new(backend), config.clone())
        .context("invalid analyzer settings")?;
    Ok(Some(Arc::new(analyzer)))
}

/// Build the engine, with remote analysis when it is configured.
pub fn build_engine(analyzer: Option<Arc<dyn IntentAnalyzer>>) -> IntentResolutionEngine {
    match analyzer {
        Some(analyzer) => IntentResolutionEngine::new(analyzer),
        None => IntentResolutionEngine::quick_match_only(),
    }
}

// ---------------------------------------------------------------------------
// Help menu
// ---------------------------------------------------------------------------

/// The accessibility help menu listing the quick phrases.
pub fn help_menu() -> String {
    let mut menu = String::from(
        "Ako želiš promijeniti opcije pristupačnosti, samo napiši koje postavke želiš \
         prilagoditi. Možeš ih prilagoditi i na sljedeće načine:\n",
    );
    // The first phrase is the question that opens this menu.
    for phrase in QUICK_PHRASES.iter().skip(1) {
        menu.push_str("  - ");
        menu.push_str(phrase);
        menu.push('\n');
    }
    menu
}
