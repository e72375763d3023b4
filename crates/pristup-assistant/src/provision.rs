//! Provisioning of the remote accessibility assistant.
//!
//! The assistant is created once, out of band, and its id is stored in
//! `ACCESSIBILITY_ASSISTANT_ID`.

use serde_json::{Value, json};
use tracing::info;

use pristup_intent::{ANALYZE_FUNCTION_NAME, FunctionSpec};

use crate::client::{AssistantClient, functions_to_tools};
use crate::error::Result;

/// Default display name of the assistant.
pub const DEFAULT_ASSISTANT_NAME: &str = "Accessibility Assistant";

/// Instructions given to the remote reasoner.
pub const ASSISTANT_INSTRUCTIONS: &str = "\
You are an accessibility assistant that helps users with accessibility settings.
You analyze user input to determine if it contains accessibility-related requests.
You should detect requests related to:
- Font size changes (increase, decrease, reset)
- Font type changes (dyslexic font, standard font)
- Theme changes (dark theme, light theme)
- General accessibility queries

When analyzing text, return:
- intentType: The type of accessibility request (FONT_SIZE, FONT_TYPE, THEME, GENERAL_QUERY, NOT_ACCESSIBILITY)
- action: The specific action requested (INCREASE, DECREASE, RESET, SET)
- value: Additional value for the action (e.g., \"dark\" for theme)
- confidence: How confident you are that this is an accessibility request (0.0 to 1.0)";

/// Everything needed to create an assistant.
#[derive(Debug, Clone)]
pub struct AssistantDefinition {
    pub name: String,
    pub model: String,
    pub instructions: String,
    pub functions: Vec<FunctionSpec>,
}

impl AssistantDefinition {
    /// The accessibility classifier with the standard function schema.
    pub fn accessibility(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            instructions: ASSISTANT_INSTRUCTIONS.to_owned(),
            functions: vec![FunctionSpec::analyze_intent(ANALYZE_FUNCTION_NAME)],
        }
    }

    /// Body of `POST /assistants`.
    pub fn to_request_body(&self) -> Value {
        json!({
            "name": self.name,
            "model": self.model,
            "instructions": self.instructions,
            "tools": functions_to_tools(&self.functions),
        })
    }
}

/// Create the accessibility assistant and return its id.
pub async fn provision_assistant(
    client: &AssistantClient,
    name: &str,
    model: &str,
) -> Result<String> {
    let definition = AssistantDefinition::accessibility(name, model);
    let id = client.create_assistant(&definition).await?;
    info!(assistant_id = %id, model = %model, "assistant provisioned");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = AssistantDefinition::accessibility(DEFAULT_ASSISTANT_NAME, "gpt-4o").to_request_body();
        assert_eq!(body["name"], DEFAULT_ASSISTANT_NAME);
        assert_eq!(body["model"], "gpt-4o");
        assert!(body["instructions"].as_str().unwrap().contains("NOT_ACCESSIBILITY"));
        assert_eq!(body["tools"][0]["function"]["name"], ANALYZE_FUNCTION_NAME);
    }
}
