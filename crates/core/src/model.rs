//! Value types exchanged with the remote note service.
//!
//! Everything here is request-scoped: a value lives for one call and is
//! never cached. Identifiers are opaque strings owned by the remote service.

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// A note as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(alias = "noteId")]
    pub id: String,
    pub title: String,
    /// Body text in the requested format (markdown unless asked otherwise).
    #[serde(default, alias = "content", skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_note_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Body text, if the note has any non-empty body.
    pub fn body(&self) -> Option<&str> {
        self.markdown.as_deref().filter(|b| !b.is_empty())
    }
}

/// Timestamps are owned by the remote service. RFC 3339 text and epoch
/// milliseconds are understood; any other shape reads as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Millis(i64),
        Other(IgnoredAny),
    }

    Ok(match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        RawTimestamp::Millis(ms) => DateTime::from_timestamp_millis(ms),
        RawTimestamp::Other(_) => None,
    })
}

/// One hit from a note search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(alias = "noteId")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// What kind of entity matched (e.g. "note").
    #[serde(rename = "type", default = "default_result_kind")]
    pub kind: String,
}

fn default_result_kind() -> String {
    "note".to_string()
}

/// Envelope of a search response. `results` may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Payload for creating a note. Absent optionals are omitted, never `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: String,
    pub markdown: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_note_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,
}

impl NewNote {
    pub fn new(title: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            markdown: markdown.into(),
            ..Default::default()
        }
    }
}

/// Partial update of a note's mutable fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_note_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,
}

impl NoteUpdate {
    /// True when no mutable field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.markdown.is_none()
            && self.parent_note_id.is_none()
            && self.attributes.is_none()
    }
}

/// Body representation requested when fetching a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteFormat {
    #[default]
    #[serde(rename = "md")]
    Markdown,
    Html,
}

impl NoteFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteFormat::Markdown => "md",
            NoteFormat::Html => "html",
        }
    }
}

impl std::fmt::Display for NoteFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
