//! Transport-facing data types.
//!
//! These are the two shapes the MCP transport cares about:
//! - `ToolDefinition`: advertised by `tools/list` so the model knows what a
//!   tool is called, what it does, and what arguments it takes
//! - `ToolResponse`: the result of `tools/call`, a list of text content
//!   blocks plus an `isError` flag

use serde::Serialize;

/// Describes one tool to the calling model.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Stable tool name (e.g. "record_create").
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema for the tool's arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// One content item in a tool response. Only text is produced here.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

/// The result of a tool invocation.
///
/// Both success and failure travel through this shape: failures set
/// `isError` and carry the human-readable message as the text. Only an
/// unknown tool name escapes this envelope (see `RouterError`).
#[derive(Debug, Clone, Serialize)]
pub struct ToolResponse {
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResponse {
    /// Success response carrying plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Success response carrying a payload, pretty-printed as JSON.
    /// A payload that cannot be serialized degrades to an internal error
    /// text rather than a panic.
    pub fn json<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_string_pretty(payload) {
            Ok(text) => Self::text(text),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize tool payload");
                Self::error("Internal server error")
            }
        }
    }

    /// Failure response carrying a human-readable message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// The concatenated text of all content blocks (handy in tests).
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|b| match b {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_response_is_pretty_printed() {
        let resp = ToolResponse::json(&json!({"a": 1}));
        assert!(!resp.is_error);
        assert_eq!(resp.text_content(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_error_response_shape() {
        let resp = ToolResponse::error("boom");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["isError"], json!(true));
        assert_eq!(value["content"][0]["type"], json!("text"));
        assert_eq!(value["content"][0]["text"], json!("boom"));
    }
}
