//! Informational tools for the remote "ask" feature. Payloads are opaque and
//! passed through as pretty-printed JSON.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use notebridge_client::NotesApi;

use crate::tool::{pretty_json, Tool, ToolDefinition, ToolError, ToolResult};

fn no_arguments_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {}
    })
}

pub struct AskInfoTool {
    api: Arc<dyn NotesApi>,
}

impl AskInfoTool {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for AskInfoTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get-ask-info".to_string(),
            description: "Get information about the ask feature of the notes service.".to_string(),
            input_schema: no_arguments_schema(),
        }
    }

    async fn execute(&self, _input: Value) -> Result<ToolResult, ToolError> {
        debug!("fetching ask info");
        let info = self.api.get_ask_info().await?;
        Ok(ToolResult::text(pretty_json(&info)?))
    }
}

pub struct AskIndexTool {
    api: Arc<dyn NotesApi>,
}

impl AskIndexTool {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for AskIndexTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get-ask-index".to_string(),
            description: "Get the status of the index used by the ask feature.".to_string(),
            input_schema: no_arguments_schema(),
        }
    }

    async fn execute(&self, _input: Value) -> Result<ToolResult, ToolError> {
        debug!("fetching ask index");
        let index = self.api.get_ask_index().await?;
        Ok(ToolResult::text(pretty_json(&index)?))
    }
}
