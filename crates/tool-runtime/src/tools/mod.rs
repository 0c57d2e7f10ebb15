//! The note tool catalog.
//!
//! Every tool holds a shared handle to the remote API and performs at most
//! one remote call per invocation.

pub mod ask;
pub mod automation_assistant;
pub mod create_note;
pub mod search_notes;
pub mod update_note;

use std::sync::Arc;

use notebridge_client::NotesApi;

use crate::registry::{RegistryError, ToolRegistry};

pub use ask::{AskIndexTool, AskInfoTool};
pub use automation_assistant::AutomationAssistantTool;
pub use create_note::CreateNoteTool;
pub use search_notes::SearchNotesTool;
pub use update_note::UpdateNoteTool;

/// Build the full catalog of note tools backed by `api`.
pub fn note_tools(api: Arc<dyn NotesApi>) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(SearchNotesTool::new(api.clone()))?;
    registry.register(CreateNoteTool::new(api.clone()))?;
    registry.register(UpdateNoteTool::new(api.clone()))?;
    registry.register(AskInfoTool::new(api.clone()))?;
    registry.register(AskIndexTool::new(api.clone()))?;
    registry.register(AutomationAssistantTool::new(api))?;
    Ok(registry)
}
