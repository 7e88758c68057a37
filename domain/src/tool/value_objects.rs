//! Tool domain value objects (results, content blocks and errors)
//!
//! Validation and execution failures are data, not control flow: every
//! [`ToolError`] converts into a [`ToolResult`] with `is_error = true` so a
//! failing call never aborts its siblings in a batch.
//!
//! | Code | Variant | Retryable? |
//! |------|---------|-----------|
//! | `NOT_FOUND` | [`ToolError::ToolNotFound`] | Yes (LLM can correct the name) |
//! | `INVALID_ARGUMENT` | [`ToolError::InvalidArguments`] | Yes |
//! | `EXECUTION_FAILED` | [`ToolError::ExecutionFailed`] | No |
//! | `TIMEOUT` | [`ToolError::Timeout`] | No |
//! | `INTERNAL` | [`ToolError::Panicked`] | No |

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::schema::FieldIssue;

/// One block of tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text
    Text { text: String },
    /// Structured data
    Json { data: serde_json::Value },
    /// Reference to binary content stored elsewhere (photo, document)
    Resource { uri: String, mime_type: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn json(data: serde_json::Value) -> Self {
        ContentBlock::Json { data }
    }

    pub fn resource(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        ContentBlock::Resource {
            uri: uri.into(),
            mime_type: mime_type.into(),
        }
    }

    fn render(&self) -> String {
        match self {
            ContentBlock::Text { text } => text.clone(),
            ContentBlock::Json { data } => data.to_string(),
            ContentBlock::Resource { uri, mime_type } => format!("[{} ({})]", uri, mime_type),
        }
    }
}

/// Failure of a single tool invocation at the provider boundary.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// The provider never declared this tool
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments do not satisfy the tool's input schema
    #[error("invalid arguments for '{tool}': {}", join_issues(.issues))]
    InvalidArguments {
        tool: String,
        issues: Vec<FieldIssue>,
    },

    /// Domain logic failed (external API error, constraint violation, ...)
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The call did not finish within its time budget
    #[error("tool '{tool}' timed out after {} ms", .after.as_millis())]
    Timeout { tool: String, after: Duration },

    /// Domain logic panicked
    #[error("tool '{tool}' failed unexpectedly: {message}")]
    Panicked { tool: String, message: String },
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ToolError {
    pub fn execution_failed(message: impl Into<String>) -> Self {
        ToolError::ExecutionFailed(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            ToolError::ToolNotFound(_) => "NOT_FOUND",
            ToolError::InvalidArguments { .. } => "INVALID_ARGUMENT",
            ToolError::ExecutionFailed(_) => "EXECUTION_FAILED",
            ToolError::Timeout { .. } => "TIMEOUT",
            ToolError::Panicked { .. } => "INTERNAL",
        }
    }

    /// Whether the LLM can plausibly fix the call and try again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ToolError::ToolNotFound(_) | ToolError::InvalidArguments { .. }
        )
    }

    /// Names of the offending fields for validation errors.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ToolError::InvalidArguments { issues, .. } => {
                issues.iter().map(|i| i.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Successful output of a tool handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOutput {
    pub content: Vec<ContentBlock>,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
        }
    }

    pub fn json(data: serde_json::Value) -> Self {
        Self {
            content: vec![ContentBlock::json(data)],
        }
    }

    pub fn with_block(mut self, block: ContentBlock) -> Self {
        self.content.push(block);
        self
    }
}

/// Outcome of one invocation: content blocks plus an error flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: Vec<ContentBlock>) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::success(vec![ContentBlock::text(text)])
    }

    pub fn json(data: serde_json::Value) -> Self {
        Self::success(vec![ContentBlock::json(data)])
    }

    /// An error result. The content always explains the failure.
    pub fn error(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "tool failed without an error message".to_string();
        }
        Self {
            content: vec![ContentBlock::text(message)],
            is_error: true,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.is_error
    }

    /// First text block, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Render all blocks into one string for a model tool-response message.
    pub fn to_message_text(&self) -> String {
        self.content
            .iter()
            .map(ContentBlock::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<ToolOutput> for ToolResult {
    fn from(output: ToolOutput) -> Self {
        ToolResult::success(output.content)
    }
}

impl From<ToolError> for ToolResult {
    fn from(error: ToolError) -> Self {
        ToolResult::error(error.to_string())
    }
}

impl From<&ToolError> for ToolResult {
    fn from(error: &ToolError) -> Self {
        ToolResult::error(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_result_never_empty() {
        let result = ToolResult::error("");
        assert!(result.is_error);
        assert!(!result.to_message_text().is_empty());
    }

    #[test]
    fn test_invalid_arguments_message_names_fields() {
        let error = ToolError::InvalidArguments {
            tool: "search".into(),
            issues: vec![FieldIssue::missing("query"), FieldIssue::missing("city")],
        };

        assert_eq!(error.code(), "INVALID_ARGUMENT");
        assert!(error.is_retryable());
        assert_eq!(error.fields(), vec!["query", "city"]);

        let result = ToolResult::from(&error);
        assert!(result.is_error);
        let text = result.first_text().unwrap();
        assert!(text.contains("'query'"));
        assert!(text.contains("'city'"));
    }

    #[test]
    fn test_timeout_message() {
        let error = ToolError::Timeout {
            tool: "geo_search".into(),
            after: Duration::from_millis(1500),
        };
        assert_eq!(error.to_string(), "tool 'geo_search' timed out after 1500 ms");
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_result_serialization_shape() {
        let result = ToolResult::json(json!({"hotels": 3}));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isError"], false);
        assert_eq!(value["content"][0]["type"], "json");
        assert_eq!(value["content"][0]["data"]["hotels"], 3);
    }

    #[test]
    fn test_to_message_text_joins_blocks() {
        let output = ToolOutput::text("Found 1 place")
            .with_block(ContentBlock::json(json!({"name": "Louvre"})))
            .with_block(ContentBlock::resource("photos/louvre.jpg", "image/jpeg"));
        let result = ToolResult::from(output);

        assert_eq!(
            result.to_message_text(),
            "Found 1 place\n{\"name\":\"Louvre\"}\n[photos/louvre.jpg (image/jpeg)]"
        );
    }
}
