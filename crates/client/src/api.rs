use async_trait::async_trait;
use serde_json::Value;

use notebridge_core::{NewNote, Note, NoteFormat, NoteUpdate, SearchResult};

use crate::error::NotesError;

/// Result count requested from the search endpoint when the caller gives none.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Operations offered by the remote note service.
///
/// Each method performs exactly one remote call and reports failure as the
/// operation's own [`NotesError`] variant.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Fetch a single note with its body in the requested format.
    async fn get_note(&self, id: &str, format: NoteFormat) -> Result<Note, NotesError>;

    /// Create a note and return it with its server-assigned id.
    async fn create_note(&self, note: &NewNote) -> Result<Note, NotesError>;

    /// Apply a partial update and return the updated note.
    async fn update_note(&self, id: &str, update: &NoteUpdate) -> Result<Note, NotesError>;

    /// Search notes. Results keep the order given by the remote service.
    async fn search_notes(&self, query: &str, limit: u32) -> Result<Vec<SearchResult>, NotesError>;

    async fn get_ask_info(&self) -> Result<Value, NotesError>;

    async fn get_ask_index(&self) -> Result<Value, NotesError>;

    async fn get_automation_assistant(&self, assistant_id: &str) -> Result<Value, NotesError>;
}
