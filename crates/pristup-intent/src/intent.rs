//! The [`Intent`] value type and its wire format.
//!
//! An intent is built once per user input and never mutated.  On the wire it
//! uses the field names and SCREAMING_SNAKE_CASE values of the remote
//! classification function:
//!
//! ```json
//! {"intentType": "THEME", "action": "SET", "value": "dark", "confidence": 0.92}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IntentError, Result};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// What the user input is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentKind {
    /// Change the base font size.
    FontSize,
    /// Change the font family.
    FontType,
    /// Change the color theme.
    Theme,
    /// A question about the accessibility options themselves.
    GeneralQuery,
    /// Ordinary chat, not an accessibility request.
    NotAccessibility,
}

impl IntentKind {
    /// All kinds, in declaration order.
    pub const ALL: [IntentKind; 5] = [
        IntentKind::FontSize,
        IntentKind::FontType,
        IntentKind::Theme,
        IntentKind::GeneralQuery,
        IntentKind::NotAccessibility,
    ];

    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            IntentKind::FontSize => "FONT_SIZE",
            IntentKind::FontType => "FONT_TYPE",
            IntentKind::Theme => "THEME",
            IntentKind::GeneralQuery => "GENERAL_QUERY",
            IntentKind::NotAccessibility => "NOT_ACCESSIBILITY",
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The mutation requested for a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentAction {
    Increase,
    Decrease,
    Reset,
    Set,
}

impl IntentAction {
    pub const ALL: [IntentAction; 4] = [
        IntentAction::Increase,
        IntentAction::Decrease,
        IntentAction::Reset,
        IntentAction::Set,
    ];

    /// Wire name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            IntentAction::Increase => "INCREASE",
            IntentAction::Decrease => "DECREASE",
            IntentAction::Reset => "RESET",
            IntentAction::Set => "SET",
        }
    }

    /// Look up an action by wire name, ignoring case and surrounding
    /// whitespace.
    pub fn from_wire(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(name))
    }
}

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// Structured classification of a piece of user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawIntent")]
pub struct Intent {
    #[serde(rename = "intentType")]
    kind: IntentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<IntentAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    confidence: f64,
}

impl Intent {
    /// Create an intent with no action or value.
    ///
    /// The confidence is clamped into `[0.0, 1.0]`; a NaN confidence becomes
    /// `0.0`.
    pub fn new(kind: IntentKind, confidence: f64) -> Self {
        Self {
            kind,
            action: None,
            value: None,
            confidence: clamp_confidence(confidence),
        }
    }

    /// Attach an action.
    pub fn with_action(mut self, action: IntentAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Attach a value (meaningful for [`IntentAction::Set`]).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// The fallback used whenever a structured result is unusable.
    pub fn not_accessibility() -> Self {
        Self::new(IntentKind::NotAccessibility, 1.0)
    }

    /// The intent synthesized when the remote reasoner proposes several
    /// structured calls at once.
    pub fn ambiguous() -> Self {
        Self::new(IntentKind::GeneralQuery, 0.6)
    }

    /// Parse the argument payload of a structured-output invocation.
    ///
    /// Empty payloads and the empty object are rejected as malformed, the
    /// same as payloads that do not match the schema.
    pub fn from_arguments(arguments: &str) -> Result<Self> {
        let trimmed = arguments.trim();
        if trimmed.is_empty() {
            return Err(IntentError::MalformedResult {
                reason: "empty payload".into(),
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(trimmed).map_err(|e| IntentError::MalformedResult {
                reason: format!("payload is not JSON: {e}"),
            })?;

        if value.as_object().is_some_and(|obj| obj.is_empty()) {
            return Err(IntentError::MalformedResult {
                reason: "empty object payload".into(),
            });
        }

        serde_json::from_value(value).map_err(|e| IntentError::MalformedResult {
            reason: e.to_string(),
        })
    }

    pub fn kind(&self) -> IntentKind {
        self.kind
    }

    pub fn action(&self) -> Option<IntentAction> {
        self.action
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

/// Unvalidated wire shape, converted into [`Intent`] on deserialization.
#[derive(Deserialize)]
struct RawIntent {
    #[serde(rename = "intentType")]
    kind: IntentKind,
    /// Kept as text: non-strict function calls fill optional fields with
    /// `""` or free-form words.
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    value: Option<String>,
    confidence: f64,
}

impl TryFrom<RawIntent> for Intent {
    type Error = String;

    fn try_from(raw: RawIntent) -> std::result::Result<Self, Self::Error> {
        if !raw.confidence.is_finite() {
            return Err(format!("confidence must be finite, got {}", raw.confidence));
        }
        let action = raw.action.as_deref().and_then(|name| {
            let action = IntentAction::from_wire(name);
            if action.is_none() && !name.trim().is_empty() {
                tracing::debug!(action = %name, kind = %raw.kind, "ignoring unknown action");
            }
            action
        });
        Ok(Self {
            kind: raw.kind,
            action,
            value: raw.value.filter(|v| !v.is_empty()),
            confidence: clamp_confidence(raw.confidence),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_payload() {
        let intent = Intent::from_arguments(
            r#"{"intentType": "THEME", "action": "SET", "value": "dark", "confidence": 0.92}"#,
        )
        .unwrap();
        assert_eq!(intent.kind(), IntentKind::Theme);
        assert_eq!(intent.action(), Some(IntentAction::Set));
        assert_eq!(intent.value(), Some("dark"));
        assert!((intent.confidence() - 0.92).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_minimal_payload() {
        let intent =
            Intent::from_arguments(r#"{"intentType": "NOT_ACCESSIBILITY", "confidence": 0.1}"#)
                .unwrap();
        assert_eq!(intent.kind(), IntentKind::NotAccessibility);
        assert_eq!(intent.action(), None);
        assert_eq!(intent.value(), None);
    }

    #[test]
    fn empty_object_is_malformed() {
        assert!(matches!(
            Intent::from_arguments("{}"),
            Err(IntentError::MalformedResult { .. })
        ));
        assert!(matches!(
            Intent::from_arguments("  { }  "),
            Err(IntentError::MalformedResult { .. })
        ));
    }

    #[test]
    fn empty_and_garbage_payloads_are_malformed() {
        assert!(Intent::from_arguments("").is_err());
        assert!(Intent::from_arguments("   ").is_err());
        assert!(Intent::from_arguments("not json").is_err());
        assert!(Intent::from_arguments(r#"{"intentType": "COLOR", "confidence": 1}"#).is_err());
    }

    #[test]
    fn blank_action_means_no_action() {
        let intent = Intent::from_arguments(
            r#"{"intentType": "GENERAL_QUERY", "action": "", "value": "", "confidence": 0.9}"#,
        )
        .unwrap();
        assert_eq!(intent.kind(), IntentKind::GeneralQuery);
        assert_eq!(intent.action(), None);
        assert_eq!(intent.value(), None);
        assert!((intent.confidence() - 0.9).abs() < f64::EPSILON);

        let spaces =
            Intent::from_arguments(r#"{"intentType": "THEME", "action": "  ", "confidence": 0.8}"#)
                .unwrap();
        assert_eq!(spaces.action(), None);
    }

    #[test]
    fn unknown_action_keeps_kind_and_confidence() {
        let intent = Intent::from_arguments(
            r#"{"intentType": "FONT_SIZE", "action": "ENLARGE", "confidence": 0.85}"#,
        )
        .unwrap();
        assert_eq!(intent.kind(), IntentKind::FontSize);
        assert_eq!(intent.action(), None);
        assert!((intent.confidence() - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn action_names_are_case_insensitive() {
        let intent = Intent::from_arguments(
            r#"{"intentType": "FONT_SIZE", "action": " decrease ", "confidence": 0.9}"#,
        )
        .unwrap();
        assert_eq!(intent.action(), Some(IntentAction::Decrease));
        for action in IntentAction::ALL {
            let json = serde_json::to_value(action).unwrap();
            assert_eq!(json.as_str(), Some(action.as_str()));
        }
    }

    #[test]
    fn missing_confidence_is_malformed() {
        let result = Intent::from_arguments(r#"{"intentType": "THEME", "action": "SET"}"#);
        assert!(matches!(result, Err(IntentError::MalformedResult { .. })));
    }

    #[test]
    fn confidence_is_clamped() {
        let high =
            Intent::from_arguments(r#"{"intentType": "THEME", "confidence": 1.4}"#).unwrap();
        assert_eq!(high.confidence(), 1.0);
        let low = Intent::new(IntentKind::FontSize, -0.5);
        assert_eq!(low.confidence(), 0.0);
        assert_eq!(Intent::new(IntentKind::FontSize, f64::NAN).confidence(), 0.0);
    }

    #[test]
    fn serializes_to_wire_shape() {
        let intent = Intent::new(IntentKind::FontType, 1.0)
            .with_action(IntentAction::Set)
            .with_value("dyslexic");
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["intentType"], "FONT_TYPE");
        assert_eq!(json["action"], "SET");
        assert_eq!(json["value"], "dyslexic");
        assert_eq!(json["confidence"], 1.0);

        let bare = serde_json::to_value(Intent::not_accessibility()).unwrap();
        assert!(bare.get("action").is_none());
        assert!(bare.get("value").is_none());
    }

    #[test]
    fn kind_display_matches_wire_name() {
        for kind in IntentKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json.as_str(), Some(kind.as_str()));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
