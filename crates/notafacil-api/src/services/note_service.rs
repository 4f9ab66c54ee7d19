//! Note creation, lookup, and deletion.

use std::sync::Arc;

use notafacil_core::{validation, Error, Note, NoteRepository, Result};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

/// Request body for creating a note.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    /// Omitted means empty, which fails validation
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Tag ids to attach; omitted or null means none
    #[serde(default)]
    pub tag_ids: Option<Vec<String>>,
}

/// Service for single-note operations.
#[derive(Clone)]
pub struct NoteService {
    notes: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// Validate and persist a new note, returning what storage returned.
    pub async fn create(&self, request: CreateNoteRequest) -> Result<Note> {
        validation::validate_note(&request.title, &request.content)?;

        let note = Note::builder(request.title, request.content)
            .tags(request.tag_ids.unwrap_or_default())
            .build()?;
        let stored = self.notes.create(note).await?;

        info!(
            subsystem = "api",
            component = "notes",
            op = "create",
            note_id = %stored.id(),
            tag_count = stored.tags().len(),
            "Note created"
        );
        Ok(stored)
    }

    /// Fetch a note, failing with `Error::NoteNotFound` when absent.
    pub async fn get(&self, id: &str) -> Result<Note> {
        self.notes
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))
    }

    /// Delete a note. Unknown ids succeed.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.notes.delete(id).await
    }
}
