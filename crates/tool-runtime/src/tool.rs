use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use notebridge_client::NotesError;

/// Describes a tool's interface for the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name (e.g., "search-notes")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema describing the expected arguments
    pub input_schema: Value,
}

/// Outcome of a tool call that reached its handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Result text shown to the host
    pub content: String,
    /// Whether this result represents an application-level error
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Error-flagged result. The text always starts with "Error:".
    pub fn error(message: impl fmt::Display) -> Self {
        Self {
            content: format!("Error: {message}"),
            is_error: true,
        }
    }
}

/// The primary extension point: every catalog entry implements this trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's definition (name, description, JSON Schema).
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the given JSON arguments.
    async fn execute(&self, input: Value) -> Result<ToolResult, ToolError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Arguments do not match the declared schema. Raised before any remote call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Remote(#[from] NotesError),
    #[error("JSON serialization failed: {0}")]
    Serialization(String),
}

/// Destructure tool arguments into a typed struct. A missing arguments
/// object is treated as `{}`.
pub fn parse_args<T: DeserializeOwned>(input: Value) -> Result<T, ToolError> {
    let input = if input.is_null() {
        Value::Object(Default::default())
    } else {
        input
    };
    serde_json::from_value(input).map_err(|e| ToolError::InvalidInput(e.to_string()))
}

/// Pretty-print an opaque payload for a text content block.
pub fn pretty_json(value: &Value) -> Result<String, ToolError> {
    serde_json::to_string_pretty(value).map_err(|e| ToolError::Serialization(e.to_string()))
}
