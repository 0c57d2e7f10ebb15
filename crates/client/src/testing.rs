//! In-memory stand-in for the remote note service.
//!
//! Records every call so tests can assert how many remote calls a code path
//! issued, and with which arguments.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use notebridge_core::{NewNote, Note, NoteFormat, NoteUpdate, SearchResult};

use crate::api::NotesApi;
use crate::error::NotesError;

/// A call received by [`FakeNotesApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    GetNote { id: String, format: NoteFormat },
    CreateNote(NewNote),
    UpdateNote { id: String, update: NoteUpdate },
    SearchNotes { query: String, limit: u32 },
    GetAskInfo,
    GetAskIndex,
    GetAutomationAssistant { id: String },
}

#[derive(Default)]
pub struct FakeNotesApi {
    notes: Mutex<HashMap<String, Note>>,
    search_results: Vec<SearchResult>,
    payload: Value,
    failure: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeNotesApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_note(self, note: Note) -> Self {
        self.notes.lock().unwrap().insert(note.id.clone(), note);
        self
    }

    pub fn with_search_results(mut self, results: Vec<SearchResult>) -> Self {
        self.search_results = results;
        self
    }

    /// Payload returned by the informational endpoints.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    /// Make every operation fail with `cause`.
    pub fn failing(mut self, cause: impl Into<String>) -> Self {
        self.failure = Some(cause.into());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: RecordedCall) -> Result<(), String> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(cause) => Err(cause.clone()),
            None => Ok(()),
        }
    }
}

/// Note with the given id and title and no body.
pub fn note(id: &str, title: &str) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        markdown: None,
        parent_note_id: None,
        attributes: None,
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl NotesApi for FakeNotesApi {
    async fn get_note(&self, id: &str, format: NoteFormat) -> Result<Note, NotesError> {
        let fetch_err = |cause: String| NotesError::Fetch {
            id: id.to_string(),
            cause,
        };
        self.record(RecordedCall::GetNote {
            id: id.to_string(),
            format,
        })
        .map_err(fetch_err)?;
        self.notes
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| fetch_err("HTTP 404: note not found".to_string()))
    }

    async fn create_note(&self, new_note: &NewNote) -> Result<Note, NotesError> {
        self.record(RecordedCall::CreateNote(new_note.clone()))
            .map_err(|cause| NotesError::Create {
                title: new_note.title.clone(),
                cause,
            })?;
        let mut notes = self.notes.lock().unwrap();
        let created = Note {
            markdown: Some(new_note.markdown.clone()),
            parent_note_id: new_note.parent_note_id.clone(),
            attributes: new_note.attributes.clone(),
            ..note(&format!("note-{}", notes.len() + 1), &new_note.title)
        };
        notes.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_note(&self, id: &str, update: &NoteUpdate) -> Result<Note, NotesError> {
        let update_err = |cause: String| NotesError::Update {
            id: id.to_string(),
            cause,
        };
        self.record(RecordedCall::UpdateNote {
            id: id.to_string(),
            update: update.clone(),
        })
        .map_err(update_err)?;
        let mut notes = self.notes.lock().unwrap();
        let stored = notes
            .get_mut(id)
            .ok_or_else(|| update_err("HTTP 404: note not found".to_string()))?;
        if let Some(title) = &update.title {
            stored.title = title.clone();
        }
        if let Some(markdown) = &update.markdown {
            stored.markdown = Some(markdown.clone());
        }
        if let Some(parent) = &update.parent_note_id {
            stored.parent_note_id = Some(parent.clone());
        }
        if let Some(attributes) = &update.attributes {
            stored.attributes = Some(attributes.clone());
        }
        Ok(stored.clone())
    }

    async fn search_notes(&self, query: &str, limit: u32) -> Result<Vec<SearchResult>, NotesError> {
        self.record(RecordedCall::SearchNotes {
            query: query.to_string(),
            limit,
        })
        .map_err(|cause| NotesError::Search {
            query: query.to_string(),
            cause,
        })?;
        Ok(self.search_results.clone())
    }

    async fn get_ask_info(&self) -> Result<Value, NotesError> {
        self.record(RecordedCall::GetAskInfo)
            .map_err(|cause| NotesError::AskInfo { cause })?;
        Ok(self.payload.clone())
    }

    async fn get_ask_index(&self) -> Result<Value, NotesError> {
        self.record(RecordedCall::GetAskIndex)
            .map_err(|cause| NotesError::AskIndex { cause })?;
        Ok(self.payload.clone())
    }

    async fn get_automation_assistant(&self, assistant_id: &str) -> Result<Value, NotesError> {
        self.record(RecordedCall::GetAutomationAssistant {
            id: assistant_id.to_string(),
        })
        .map_err(|cause| NotesError::AutomationAssistant {
            id: assistant_id.to_string(),
            cause,
        })?;
        Ok(self.payload.clone())
    }
}
