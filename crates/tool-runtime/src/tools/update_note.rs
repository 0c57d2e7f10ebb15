use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use notebridge_client::NotesApi;
use notebridge_core::NoteUpdate;

use crate::tool::{parse_args, Tool, ToolDefinition, ToolError, ToolResult};

/// Reply for an update that names no field to change.
pub const NO_UPDATE_FIELDS_MESSAGE: &str =
    "No updates provided. Specify at least one of: title, markdown, parentNoteId, attributes.";

/// Apply a partial update to an existing note.
pub struct UpdateNoteTool {
    api: Arc<dyn NotesApi>,
}

impl UpdateNoteTool {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self { api }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    note_id: String,
    #[serde(flatten)]
    update: NoteUpdate,
}

#[async_trait]
impl Tool for UpdateNoteTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "update-note".to_string(),
            description: "Update an existing note. At least one of title, markdown, parentNoteId or attributes must be given.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "noteId": {
                        "type": "string",
                        "description": "Id of the note to update"
                    },
                    "title": {
                        "type": "string",
                        "description": "New title"
                    },
                    "markdown": {
                        "type": "string",
                        "description": "New body in markdown"
                    },
                    "parentNoteId": {
                        "type": "string",
                        "description": "Id of the new parent note"
                    },
                    "attributes": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Replacement attributes or tags"
                    }
                },
                "required": ["noteId"]
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolResult, ToolError> {
        let args: UpdateArgs = parse_args(input)?;

        if args.update.is_empty() {
            debug!(note_id = %args.note_id, "update without fields, skipping remote call");
            return Ok(ToolResult::text(NO_UPDATE_FIELDS_MESSAGE));
        }

        debug!(note_id = %args.note_id, "updating note");

        let note = self.api.update_note(&args.note_id, &args.update).await?;
        Ok(ToolResult::text(format!(
            "Updated note \"{}\" (id: {})",
            note.title, note.id
        )))
    }
}
