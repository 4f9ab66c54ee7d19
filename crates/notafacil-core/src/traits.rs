//! Core traits for notafacil abstractions.
//!
//! These traits define the persistence contracts the use cases depend on.
//! Concrete implementations live in `notafacil-db` (PostgreSQL) and, behind
//! the `mock` feature, in [`crate::mock`].

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Note, Tag};

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Repository for note persistence.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Fetch a note by id, `None` if unknown.
    async fn find_by_id(&self, id: &str) -> Result<Option<Note>>;

    /// All notes in storage order.
    async fn find_all(&self) -> Result<Vec<Note>>;

    /// Notes whose title relates to `title` (case-insensitive containment).
    async fn find_by_title(&self, title: &str) -> Result<Vec<Note>>;

    /// Notes carrying the given tag id.
    async fn find_by_tag(&self, tag_id: &str) -> Result<Vec<Note>>;

    /// Persist a new note and return the stored value.
    async fn create(&self, note: Note) -> Result<Note>;

    /// Replace a stored note. Fails with `Error::NoteNotFound` if the id is unknown.
    async fn update(&self, note: Note) -> Result<Note>;

    /// Delete a note. Unknown ids are not an error.
    async fn delete(&self, id: &str) -> Result<()>;
}

// =============================================================================
// TAG REPOSITORY TRAITS
// =============================================================================

/// Repository for tag persistence.
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Tag>>;

    async fn find_all(&self) -> Result<Vec<Tag>>;

    /// Tags with exactly this name.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Tag>>;

    async fn create(&self, tag: Tag) -> Result<Tag>;

    /// Replace a stored tag. Fails with `Error::NotFound` if the id is unknown.
    async fn update(&self, tag: Tag) -> Result<Tag>;

    /// Delete a tag. Unknown ids are not an error.
    async fn delete(&self, id: &str) -> Result<()>;
}
