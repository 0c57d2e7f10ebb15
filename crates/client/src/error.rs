//! Error types for remote note operations.
//!
//! Every public client operation fails with exactly one variant here. The
//! `cause` field holds the text of the underlying transport, status, or
//! decoding failure.

/// Failure of a single remote operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotesError {
    #[error("Failed to fetch note {id}: {cause}")]
    Fetch { id: String, cause: String },

    #[error("Failed to create note \"{title}\": {cause}")]
    Create { title: String, cause: String },

    #[error("Failed to update note {id}: {cause}")]
    Update { id: String, cause: String },

    #[error("Failed to search notes for \"{query}\": {cause}")]
    Search { query: String, cause: String },

    #[error("Failed to fetch ask info: {cause}")]
    AskInfo { cause: String },

    #[error("Failed to fetch ask index: {cause}")]
    AskIndex { cause: String },

    #[error("Failed to fetch automation assistant {id}: {cause}")]
    AutomationAssistant { id: String, cause: String },
}

/// Low-level failure of one HTTP exchange, before it is attributed to an
/// operation.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}
