//! Note resources.
//!
//! Two URI shapes are served: the `note://notes` collection and individual
//! notes at `note://notes/{id}`. The collection does not enumerate notes; it
//! reads as a fixed placeholder that points the host at `search-notes`.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::debug;

use notebridge_client::NotesApi;
use notebridge_core::NoteFormat;

use crate::error::McpError;
use crate::types::{
    ListResourceTemplatesResult, ListResourcesResult, ReadResourceResult, Resource,
    ResourceContents, ResourceTemplate,
};

pub const NOTES_COLLECTION_URI: &str = "note://notes";
pub const NOTE_URI_TEMPLATE: &str = "note://notes/{id}";

/// Text returned when reading the collection URI.
pub const COLLECTION_PLACEHOLDER: &str = "Listing all notes is not supported. \
Use the search-notes tool to find notes, then read note://notes/{id}.";

const MARKDOWN_MIME: &str = "text/markdown";
const JSON_MIME: &str = "application/json";

/// A parsed `note://` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteUri<'a> {
    Collection,
    /// Percent-decoded note id.
    Note(Cow<'a, str>),
}

impl<'a> NoteUri<'a> {
    /// Parse a resource URI. The id must be a single, non-empty path segment;
    /// it arrives percent-encoded and is decoded into the opaque remote id.
    pub fn parse(uri: &'a str) -> Result<Self, McpError> {
        let invalid = || McpError::InvalidRequest(format!("Unknown resource: {uri}"));

        let rest = uri.strip_prefix(NOTES_COLLECTION_URI).ok_or_else(invalid)?;
        if rest.is_empty() {
            return Ok(NoteUri::Collection);
        }

        let segment = rest.strip_prefix('/').ok_or_else(invalid)?;
        if segment.is_empty() || segment.contains(['/', '?', '#']) {
            return Err(invalid());
        }
        let id = urlencoding::decode(segment).map_err(|_| invalid())?;
        Ok(NoteUri::Note(id))
    }
}

/// Serves the note resources from the remote API.
pub struct NoteResources {
    api: Arc<dyn NotesApi>,
}

impl NoteResources {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self { api }
    }

    pub fn list(&self) -> ListResourcesResult {
        ListResourcesResult {
            resources: vec![Resource {
                uri: NOTES_COLLECTION_URI.to_string(),
                name: "All notes".to_string(),
                description: Some(
                    "Placeholder only: notes are not enumerated. Use search-notes instead."
                        .to_string(),
                ),
                mime_type: Some("text/plain".to_string()),
            }],
        }
    }

    pub fn templates(&self) -> ListResourceTemplatesResult {
        ListResourceTemplatesResult {
            resource_templates: vec![ResourceTemplate {
                uri_template: NOTE_URI_TEMPLATE.to_string(),
                name: "Note".to_string(),
                description: Some("A single note, read as its markdown body.".to_string()),
                mime_type: Some(MARKDOWN_MIME.to_string()),
            }],
        }
    }

    /// Read one resource. Malformed URIs fail before any remote call.
    pub async fn read(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        let contents = match NoteUri::parse(uri)? {
            NoteUri::Collection => ResourceContents {
                uri: uri.to_string(),
                name: None,
                mime_type: Some("text/plain".to_string()),
                text: COLLECTION_PLACEHOLDER.to_string(),
            },
            NoteUri::Note(id) => {
                debug!(note_id = %id, "reading note resource");
                let note = self.api.get_note(&id, NoteFormat::Markdown).await?;
                let (text, mime_type) = match note.body() {
                    Some(body) => (body.to_string(), MARKDOWN_MIME),
                    None => (
                        serde_json::to_string_pretty(&note)
                            .map_err(|e| McpError::Internal(e.to_string()))?,
                        JSON_MIME,
                    ),
                };
                ResourceContents {
                    uri: uri.to_string(),
                    name: Some(note.title),
                    mime_type: Some(mime_type.to_string()),
                    text,
                }
            }
        };
        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}
