//! Error types for the MCP crate.

use notebridge_client::NotesError;

use crate::types::{error_codes, JsonRpcError};

/// Errors that surface as JSON-RPC error responses.
///
/// Remote failures inside a tool call never become an `McpError`; they are
/// reported as error-flagged tool results instead.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    /// Failed to parse JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Transport I/O error.
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The requested method is not supported.
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Invalid parameters for a method.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// The request names something that does not exist, such as an unknown
    /// resource URI.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The requested tool is not in the catalog.
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    /// A resource read failed on the remote side.
    #[error(transparent)]
    Remote(#[from] NotesError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl McpError {
    /// Convert to a JSON-RPC error object.
    pub fn to_rpc_error(&self) -> JsonRpcError {
        let code = match self {
            McpError::JsonParse(_) => error_codes::PARSE_ERROR,
            McpError::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            McpError::ToolNotFound(_) => error_codes::METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            McpError::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            _ => error_codes::INTERNAL_ERROR,
        };
        JsonRpcError {
            code,
            message: self.to_string(),
            data: None,
        }
    }
}
