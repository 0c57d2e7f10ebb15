pub mod tool;
pub mod tools;
pub mod registry;

pub use tool::{Tool, ToolDefinition, ToolError, ToolResult};
pub use registry::{RegistryError, ToolRegistry};
pub use tools::{
    note_tools, AskIndexTool, AskInfoTool, AutomationAssistantTool, CreateNoteTool,
    SearchNotesTool, UpdateNoteTool,
};
