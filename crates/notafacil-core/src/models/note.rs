//! The Note entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validation;

use super::stored_instant;

/// A titled, tagged, timestamped text record.
///
/// A `Note` is an immutable value: it is validated when built and every
/// mutator consumes it and hands back a new value, so an invalid note can
/// never be observed. Tags are identifiers of [`Tag`](super::Tag)s and are
/// not checked for existence here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "NoteRecord", try_from = "NoteRecord")]
pub struct Note {
    id: String,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tags: Vec<String>,
}

impl Note {
    /// Build a new note with a generated id, current timestamps and no tags.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::builder(title, content).build()
    }

    /// Start building a note, optionally supplying id, timestamps and tags.
    pub fn builder(title: impl Into<String>, content: impl Into<String>) -> NoteBuilder {
        NoteBuilder {
            id: None,
            title: title.into(),
            content: content.into(),
            created_at: None,
            updated_at: None,
            tags: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// True if the note carries the given tag id.
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t == tag_id)
    }

    /// True if the note carries any of the given tag ids.
    pub fn has_any_tag<S: AsRef<str>>(&self, tag_ids: &[S]) -> bool {
        tag_ids.iter().any(|id| self.has_tag(id.as_ref()))
    }

    /// Replace the title.
    pub fn update_title(self, title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into();
        validation::validate_note(&title, &self.content)?;
        Ok(Self { title, ..self }.touched())
    }

    /// Replace the content.
    pub fn update_content(self, content: impl Into<String>) -> Result<Self, ValidationError> {
        let content = content.into();
        validation::validate_note(&self.title, &content)?;
        Ok(Self { content, ..self }.touched())
    }

    /// Add a tag id. Adding one that is already present returns the note
    /// untouched, `updated_at` included.
    pub fn add_tag(mut self, tag_id: impl Into<String>) -> Self {
        let tag_id = tag_id.into();
        if self.has_tag(&tag_id) {
            return self;
        }
        self.tags.push(tag_id);
        self.touched()
    }

    /// Remove a tag id.
    ///
    /// `updated_at` is refreshed even when the tag was not present.
    pub fn remove_tag(mut self, tag_id: &str) -> Self {
        self.tags.retain(|t| t != tag_id);
        self.touched()
    }

    /// Plain record form, used for export and for HTTP responses.
    pub fn to_record(&self) -> NoteRecord {
        NoteRecord::from(self.clone())
    }

    fn touched(mut self) -> Self {
        self.updated_at = stored_instant(Utc::now());
        self
    }
}

/// Builder for [`Note`] with the optional constructor inputs.
#[derive(Debug, Clone)]
pub struct NoteBuilder {
    id: Option<String>,
    title: String,
    content: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    tags: Vec<String>,
}

impl NoteBuilder {
    /// Use an existing identifier instead of generating one.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Initial tag list, kept as given (no de-duplication).
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Validate and build the note.
    pub fn build(self) -> Result<Note, ValidationError> {
        validation::validate_note(&self.title, &self.content)?;
        let now = Utc::now();
        Ok(Note {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: self.title,
            content: self.content,
            created_at: stored_instant(self.created_at.unwrap_or(now)),
            updated_at: stored_instant(self.updated_at.unwrap_or(now)),
            tags: self.tags,
        })
    }
}

/// Portable note record: the export/import wire format and API response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl From<Note> for NoteRecord {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
            tags: note.tags,
        }
    }
}

impl TryFrom<NoteRecord> for Note {
    type Error = ValidationError;

    fn try_from(record: NoteRecord) -> Result<Self, Self::Error> {
        Note::builder(record.title, record.content)
            .id(record.id)
            .created_at(record.created_at)
            .updated_at(record.updated_at)
            .tags(record.tags)
            .build()
    }
}
