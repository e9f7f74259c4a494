//! Uniform reply envelope returned by every tool
//!
//! Every tool invocation produces exactly one [`Envelope`]: either a success
//! carrying the pretty-printed vendor response, or an error carrying a
//! human-readable message. The serialized shape matches the MCP
//! `CallToolResult` (`content` + `isError`).

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single content item of an envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            ContentBlock::Text { text } => text,
        }
    }
}

/// Tool reply envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub is_error: bool,
}

impl Envelope {
    /// Successful envelope with a single text block
    pub fn text(text: impl Into<String>) -> Self {
        Self { content: vec![ContentBlock::text(text)], is_error: false }
    }

    /// Error envelope with a single text block
    pub fn error(message: impl Into<String>) -> Self {
        Self { content: vec![ContentBlock::text(message)], is_error: true }
    }

    /// Successful envelope carrying `value` as 2-space indented JSON
    pub fn json(value: &JsonValue) -> Self {
        Self::text(pretty_json(value))
    }

    /// Successful envelope whose text is a confirmation line, a blank line,
    /// then the pretty-printed JSON
    pub fn json_with_message(message: &str, value: &JsonValue) -> Self {
        Self::text(format!("{}\n\n{}", message, pretty_json(value)))
    }

    /// All text blocks joined with newlines
    pub fn text_content(&self) -> String {
        self.content.iter().map(ContentBlock::as_text).collect::<Vec<_>>().join("\n")
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

fn pretty_json(value: &JsonValue) -> String {
    // Serializing a JsonValue cannot fail: keys are always strings.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_envelope_uses_two_space_indent() {
        let env = Envelope::json(&json!({"id": 42}));
        assert!(!env.is_error);
        assert_eq!(env.text_content(), "{\n  \"id\": 42\n}");
    }

    #[test]
    fn test_confirmation_line_precedes_json() {
        let env = Envelope::json_with_message(
            "Ticket created successfully with ID: 7",
            &json!({"id": 7, "subject": "Printer on fire"}),
        );
        let text = env.text_content();
        let (first, rest) = text.split_once("\n\n").unwrap();
        assert_eq!(first, "Ticket created successfully with ID: 7");
        let parsed: JsonValue = serde_json::from_str(rest).unwrap();
        assert_eq!(parsed["subject"], "Printer on fire");
    }

    #[test]
    fn test_serialized_shape_matches_mcp() {
        let env = Envelope::error("API Error (404): not found");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(
            v,
            json!({
                "content": [{"type": "text", "text": "API Error (404): not found"}],
                "isError": true
            })
        );
    }

    #[test]
    fn test_deserialize_without_is_error_defaults_to_success() {
        let env: Envelope =
            serde_json::from_value(json!({"content": [{"type": "text", "text": "ok"}]})).unwrap();
        assert!(!env.is_error());
        assert_eq!(env.text_content(), "ok");
    }
}
