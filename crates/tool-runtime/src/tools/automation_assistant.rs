use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use notebridge_client::NotesApi;

use crate::tool::{parse_args, pretty_json, Tool, ToolDefinition, ToolError, ToolResult};

/// Fetch the configuration of an automation assistant.
pub struct AutomationAssistantTool {
    api: Arc<dyn NotesApi>,
}

impl AutomationAssistantTool {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self { api }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssistantArgs {
    assistant_id: String,
}

#[async_trait]
impl Tool for AutomationAssistantTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get-automation-assistant".to_string(),
            description: "Get information about an automation assistant.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "assistantId": {
                        "type": "string",
                        "description": "Id of the automation assistant"
                    }
                },
                "required": ["assistantId"]
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolResult, ToolError> {
        let args: AssistantArgs = parse_args(input)?;
        debug!(assistant_id = %args.assistant_id, "fetching automation assistant");

        let assistant = self.api.get_automation_assistant(&args.assistant_id).await?;
        Ok(ToolResult::text(pretty_json(&assistant)?))
    }
}
