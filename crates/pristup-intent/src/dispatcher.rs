//! Action dispatch.
//!
//! [`ActionDispatcher`] turns an approved [`Intent`] into calls on a
//! [`PresentationSurface`] and returns the confirmation shown to the user.
//! The surface owns the presentation state; the dispatcher only decides which
//! setter to call.  All setters are idempotent.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{debug, info};

use crate::intent::{Intent, IntentAction, IntentKind};

/// Returned for a general query; tells the caller to show the help menu.
pub const HELP_SENTINEL: &str = "$$$$";

// ---------------------------------------------------------------------------
// Presentation types
// ---------------------------------------------------------------------------

/// Base font scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontScale {
    Reduced,
    #[default]
    Default,
    Enlarged,
}

impl FontScale {
    /// Root font size for this scale.
    pub fn css_size(self) -> &'static str {
        match self {
            FontScale::Reduced => "0.8rem",
            FontScale::Default => "1rem",
            FontScale::Enlarged => "1.2rem",
        }
    }
}

/// Active font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    #[default]
    Standard,
    /// Font designed for readers with dyslexia.
    Dyslexic,
}

/// Setters the dispatcher drives.
pub trait PresentationSurface: Send + Sync {
    fn apply_font_scale(&self, level: FontScale);
    fn apply_font_family(&self, variant: FontFamily);
    fn set_dark_theme(&self, enabled: bool);
}

/// Snapshot of [`PresentationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PresentationSnapshot {
    pub font_scale: FontScale,
    pub font_family: FontFamily,
    pub dark_theme: bool,
}

/// In-memory, thread-safe presentation state.
#[derive(Debug, Default)]
pub struct PresentationState {
    inner: RwLock<PresentationSnapshot>,
}

impl PresentationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> PresentationSnapshot {
        match self.inner.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn update(&self, f: impl FnOnce(&mut PresentationSnapshot)) {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl PresentationSurface for PresentationState {
    fn apply_font_scale(&self, level: FontScale) {
        self.update(|s| s.font_scale = level);
    }

    fn apply_font_family(&self, variant: FontFamily) {
        self.update(|s| s.font_family = variant);
    }

    fn set_dark_theme(&self, enabled: bool) {
        self.update(|s| s.dark_theme = enabled);
    }
}

/// A surface that accepts every call and keeps nothing.
///
/// Useful for computing a confirmation without touching real state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedSurface;

impl PresentationSurface for DetachedSurface {
    fn apply_font_scale(&self, _level: FontScale) {}
    fn apply_font_family(&self, _variant: FontFamily) {}
    fn set_dark_theme(&self, _enabled: bool) {}
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Applies intents to a presentation surface.
pub struct ActionDispatcher {
    surface: Arc<dyn PresentationSurface>,
}

impl ActionDispatcher {
    pub fn new(surface: Arc<dyn PresentationSurface>) -> Self {
        Self { surface }
    }

    /// Apply the intent and return the confirmation message.
    ///
    /// Returns [`HELP_SENTINEL`] for a general query and `None` for anything
    /// that is not an accessibility change.
    pub fn apply(&self, intent: &Intent) -> Option<String> {
        let confirmation = match intent.kind() {
            IntentKind::FontSize => self.apply_font_size(intent.action()),
            IntentKind::FontType => self.apply_font_type(intent),
            IntentKind::Theme => self.apply_theme(intent),
            IntentKind::GeneralQuery => HELP_SENTINEL,
            IntentKind::NotAccessibility => {
                debug!("nothing to dispatch for non-accessibility intent");
                return None;
            }
        };

        info!(kind = %intent.kind(), action = ?intent.action(), "accessibility action applied");
        Some(confirmation.to_owned())
    }

    fn apply_font_size(&self, action: Option<IntentAction>) -> &'static str {
        let scale = match action {
            Some(IntentAction::Increase) => FontScale::Enlarged,
            Some(IntentAction::Decrease) => FontScale::Reduced,
            _ => FontScale::Default,
        };
        self.surface.apply_font_scale(scale);

        if action == Some(IntentAction::Reset) {
            "Veličina fonta je vraćena na početnu vrijednost."
        } else {
            "Veličina fonta je prilagođena."
        }
    }

    fn apply_font_type(&self, intent: &Intent) -> &'static str {
        if intent.action() == Some(IntentAction::Set) && value_is(intent, "dyslexic") {
            self.surface.apply_font_family(FontFamily::Dyslexic);
            return "Font je prilagođen za lakše čitanje osobama s disleksijom.";
        }
        self.surface.apply_font_family(FontFamily::Standard);
        "Font je vraćen na standardni tip."
    }

    fn apply_theme(&self, intent: &Intent) -> &'static str {
        if intent.action() == Some(IntentAction::Set) {
            if value_is(intent, "dark") {
                self.surface.set_dark_theme(true);
                return "Tamna tema je aktivirana.";
            }
            self.surface.set_dark_theme(false);
            return "Svijetla tema je aktivirana.";
        }
        self.surface.set_dark_theme(false);
        "Tema je vraćena na početnu vrijednost."
    }
}

fn value_is(intent: &Intent, expected: &str) -> bool {
    intent
        .value()
        .is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
