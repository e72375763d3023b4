//! Quick match: exact-phrase shortcut that bypasses the remote analyzer.
//!
//! Input is lower-cased and trimmed, then looked up verbatim in a static
//! table.  There is no fuzzy or substring matching; a near-miss falls through
//! to the remote analyzer.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

use crate::intent::{Intent, IntentAction, IntentKind};

/// The canonical phrases offered as quick questions, in menu order.
pub const QUICK_PHRASES: [&str; 8] = [
    "Koje opcije pristupačnosti nudiš?",
    "Tamna tema",
    "Svijetla tema",
    "Font prilagođen disleksiji",
    "Resetiraj tip fonta",
    "Povećaj font",
    "Smanji font",
    "Resetiraj veličinu fonta",
];

static QUICK_MATCH_TABLE: LazyLock<HashMap<&'static str, Intent>> = LazyLock::new(|| {
    HashMap::from([
        (
            "koje opcije pristupačnosti nudiš?",
            Intent::new(IntentKind::GeneralQuery, 1.0),
        ),
        (
            "tamna tema",
            Intent::new(IntentKind::Theme, 1.0)
                .with_action(IntentAction::Set)
                .with_value("dark"),
        ),
        (
            "svijetla tema",
            Intent::new(IntentKind::Theme, 1.0)
                .with_action(IntentAction::Set)
                .with_value("light"),
        ),
        (
            "povećaj font",
            Intent::new(IntentKind::FontSize, 1.0).with_action(IntentAction::Increase),
        ),
        (
            "smanji font",
            Intent::new(IntentKind::FontSize, 1.0).with_action(IntentAction::Decrease),
        ),
        (
            "resetiraj veličinu fonta",
            Intent::new(IntentKind::FontSize, 1.0).with_action(IntentAction::Reset),
        ),
        (
            "font prilagođen disleksiji",
            Intent::new(IntentKind::FontType, 1.0)
                .with_action(IntentAction::Set)
                .with_value("dyslexic"),
        ),
        (
            "resetiraj tip fonta",
            Intent::new(IntentKind::FontType, 1.0).with_action(IntentAction::Reset),
        ),
    ])
});

/// Normalize text the way quick-match keys are stored.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Resolves canonical phrases to pre-built intents.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickMatchResolver;

impl QuickMatchResolver {
    pub fn new() -> Self {
        Self
    }

    /// Look up `text` in the quick-match table.
    pub fn resolve(&self, text: &str) -> Option<Intent> {
        let key = normalize(text);
        let hit = QUICK_MATCH_TABLE.get(key.as_str()).cloned();
        if let Some(intent) = &hit {
            debug!(phrase = %key, kind = %intent.kind(), "quick match hit");
        }
        hit
    }

    /// Number of canonical phrases.
    pub fn len(&self) -> usize {
        QUICK_MATCH_TABLE.len()
    }

    pub fn is_empty(&self) -> bool {
        QUICK_MATCH_TABLE.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
