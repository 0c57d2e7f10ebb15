//! Full-text note search.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use notebridge_client::{NotesApi, DEFAULT_SEARCH_LIMIT};
use notebridge_core::SearchResult;

use crate::tool::{parse_args, Tool, ToolDefinition, ToolError, ToolResult};

pub struct SearchNotesTool {
    api: Arc<dyn NotesApi>,
}

impl SearchNotesTool {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self { api }
    }
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    limit: Option<u32>,
}

/// Render results as a bulleted list, one `- title: snippet (type)` line each.
/// Hits without a snippet render as `- title (type)`.
fn format_results(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("No notes found for \"{query}\".");
    }
    let lines: Vec<String> = results
        .iter()
        .map(|r| match r.snippet.as_deref() {
            Some(snippet) => format!("- {}: {} ({})", r.title, snippet, r.kind),
            None => format!("- {} ({})", r.title, r.kind),
        })
        .collect();
    format!(
        "Found {} result(s) for \"{query}\":\n{}",
        results.len(),
        lines.join("\n")
    )
}

#[async_trait]
impl Tool for SearchNotesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "search-notes".to_string(),
            description: "Search notes by text. Returns matching notes with a snippet of the matched content.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "default": DEFAULT_SEARCH_LIMIT,
                        "description": "Maximum number of results to return"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolResult, ToolError> {
        let args: SearchArgs = parse_args(input)?;
        let limit = args.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

        debug!(query = %args.query, limit, "searching notes");

        let results = self.api.search_notes(&args.query, limit).await?;
        Ok(ToolResult::text(format_results(&args.query, &results)))
    }
}
