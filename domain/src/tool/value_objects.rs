//! Tool domain value objects: call results as the host sees them
//!
//! A [`CallToolResult`] is what every tool call resolves to, local or remote.
//! Content blocks keep any fields they arrived with so remote results can be
//! forwarded untouched (images, embedded resources, annotations).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a tool result's `content` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Content kind (`text`, `image`, `resource`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Fields specific to non-text kinds, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
            extra: Map::new(),
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == "text"
    }
}

/// Result of a tool call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

impl CallToolResult {
    /// Successful result with a single text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: None,
            structured_content: None,
        }
    }

    /// Successful result whose text is `payload` pretty-printed
    pub fn json(payload: &Value) -> Self {
        Self::text(pretty_json(payload))
    }

    /// Error result carrying `{"error": message}` as its text
    pub fn error(message: impl Into<String>) -> Self {
        let payload = serde_json::json!({ "error": message.into() });
        Self {
            content: vec![ContentBlock::text(pretty_json(&payload))],
            is_error: Some(true),
            structured_content: None,
        }
    }

    /// Like [`CallToolResult::error`], with the payload on a single line
    pub fn compact_error(message: impl Into<String>) -> Self {
        let payload = serde_json::json!({ "error": message.into() });
        Self {
            content: vec![ContentBlock::text(payload.to_string())],
            is_error: Some(true),
            structured_content: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Text of the first text block, if any
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|block| block.is_text())
            .and_then(|block| block.text.as_deref())
    }

    /// Make sure the host always gets a textual representation.
    ///
    /// A result with no content but structured content is rewritten into a
    /// single text block holding the pretty-printed structured payload. The
    /// error flag is carried over.
    pub fn with_text_fallback(self) -> Self {
        match self.structured_content {
            Some(ref structured) if self.content.is_empty() && !structured.is_null() => Self {
                content: vec![ContentBlock::text(pretty_json(structured))],
                is_error: self.is_error,
                structured_content: None,
            },
            _ => self,
        }
    }
}

/// Pretty-print with two-space indentation.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
