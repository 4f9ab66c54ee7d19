//! In-memory repositories for deterministic testing and local development.
//!
//! Notes and tags are kept in insertion order, which is the "storage order"
//! these repositories report. Every call is recorded so tests can assert
//! which persistence primitives a use case reached.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use notafacil_core::mock::InMemoryNoteRepository;
//! use notafacil_core::Note;
//!
//! let repo = InMemoryNoteRepository::new()
//!     .with_notes(vec![Note::new("Groceries", "milk").unwrap()]);
//! assert_eq!(repo.len(), 1);
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{Note, Tag};
use crate::traits::{NoteRepository, TagRepository};

/// A recorded repository call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub operation: &'static str,
    pub input: String,
}

#[derive(Debug, Default)]
struct NoteState {
    notes: Vec<Note>,
    calls: Vec<MockCall>,
    failing_writes: bool,
}

/// In-memory [`NoteRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryNoteRepository {
    state: Arc<Mutex<NoteState>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with notes, in order.
    pub fn with_notes(self, notes: Vec<Note>) -> Self {
        self.lock().notes.extend(notes);
        self
    }

    /// Make `create` and `update` fail as if storage were unavailable.
    pub fn with_failing_writes(self) -> Self {
        self.lock().failing_writes = true;
        self
    }

    pub fn len(&self) -> usize {
        self.lock().notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of stored notes.
    pub fn notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    /// Recorded calls, oldest first.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    /// Number of recorded calls to the given operation.
    pub fn call_count(&self, operation: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, NoteState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(state: &mut NoteState, operation: &'static str, input: &str) {
        state.calls.push(MockCall {
            operation,
            input: input.to_string(),
        });
    }

    fn check_writable(state: &NoteState) -> Result<()> {
        if state.failing_writes {
            return Err(Error::Internal("storage unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Note>> {
        let mut state = self.lock();
        Self::record(&mut state, "find_by_id", id);
        Ok(state.notes.iter().find(|n| n.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Note>> {
        let mut state = self.lock();
        Self::record(&mut state, "find_all", "");
        Ok(state.notes.clone())
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Note>> {
        let mut state = self.lock();
        Self::record(&mut state, "find_by_title", title);
        let needle = title.to_lowercase();
        Ok(state
            .notes
            .iter()
            .filter(|n| n.title().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_tag(&self, tag_id: &str) -> Result<Vec<Note>> {
        let mut state = self.lock();
        Self::record(&mut state, "find_by_tag", tag_id);
        Ok(state
            .notes
            .iter()
            .filter(|n| n.has_tag(tag_id))
            .cloned()
            .collect())
    }

    async fn create(&self, note: Note) -> Result<Note> {
        let mut state = self.lock();
        Self::record(&mut state, "create", note.id());
        Self::check_writable(&state)?;
        if state.notes.iter().any(|n| n.id() == note.id()) {
            return Err(Error::Internal(format!(
                "Note {} already exists",
                note.id()
            )));
        }
        state.notes.push(note.clone());
        Ok(note)
    }

    async fn update(&self, note: Note) -> Result<Note> {
        let mut state = self.lock();
        Self::record(&mut state, "update", note.id());
        Self::check_writable(&state)?;
        let slot = state
            .notes
            .iter_mut()
            .find(|n| n.id() == note.id())
            .ok_or_else(|| Error::NoteNotFound(note.id().to_string()))?;
        *slot = note.clone();
        Ok(note)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut state = self.lock();
        Self::record(&mut state, "delete", id);
        state.notes.retain(|n| n.id() != id);
        Ok(())
    }
}

/// In-memory [`TagRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTagRepository {
    tags: Arc<Mutex<Vec<Tag>>>,
}

impl InMemoryTagRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(self, tags: Vec<Tag>) -> Self {
        self.lock().extend(tags);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Tag>> {
        self.tags.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Tag>> {
        Ok(self.lock().iter().find(|t| t.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Tag>> {
        Ok(self.lock().clone())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Tag>> {
        Ok(self
            .lock()
            .iter()
            .filter(|t| t.name() == name)
            .cloned()
            .collect())
    }

    async fn create(&self, tag: Tag) -> Result<Tag> {
        self.lock().push(tag.clone());
        Ok(tag)
    }

    async fn update(&self, tag: Tag) -> Result<Tag> {
        let mut tags = self.lock();
        let slot = tags
            .iter_mut()
            .find(|t| t.id() == tag.id())
            .ok_or_else(|| Error::NotFound(format!("Tag {} not found", tag.id())))?;
        *slot = tag.clone();
        Ok(tag)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.lock().retain(|t| t.id() != id);
        Ok(())
    }
}
