use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use notebridge_client::NotesApi;
use notebridge_core::NewNote;

use crate::tool::{parse_args, Tool, ToolDefinition, ToolError, ToolResult};

/// Create a note from markdown, optionally under a parent or from a template.
pub struct CreateNoteTool {
    api: Arc<dyn NotesApi>,
}

impl CreateNoteTool {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self { api }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateArgs {
    title: String,
    markdown: String,
    #[serde(default)]
    parent_note_id: Option<String>,
    #[serde(default)]
    template_id: Option<String>,
    #[serde(default)]
    attributes: Option<Vec<String>>,
}

impl From<CreateArgs> for NewNote {
    fn from(args: CreateArgs) -> Self {
        Self {
            title: args.title,
            markdown: args.markdown,
            parent_note_id: args.parent_note_id,
            template_id: args.template_id,
            attributes: args.attributes,
        }
    }
}

#[async_trait]
impl Tool for CreateNoteTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "create-note".to_string(),
            description: "Create a new note with a title and markdown body.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Title of the new note"
                    },
                    "markdown": {
                        "type": "string",
                        "description": "Note body in markdown"
                    },
                    "parentNoteId": {
                        "type": "string",
                        "description": "Id of the note to nest the new note under"
                    },
                    "templateId": {
                        "type": "string",
                        "description": "Id of a template to create the note from"
                    },
                    "attributes": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Attributes or tags to attach to the note"
                    }
                },
                "required": ["title", "markdown"]
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolResult, ToolError> {
        let args: CreateArgs = parse_args(input)?;
        let new_note = NewNote::from(args);

        debug!(title = %new_note.title, "creating note");

        let note = self.api.create_note(&new_note).await?;
        Ok(ToolResult::text(format!(
            "Created note \"{}\" (id: {})",
            note.title, note.id
        )))
    }
}
