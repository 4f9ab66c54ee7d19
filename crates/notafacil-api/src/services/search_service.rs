//! Note search by free text and tag ids.
//!
//! ## Matching
//!
//! - No text and no tags: every stored note, in storage order.
//! - Title scope asks the repository for title matches.
//! - Content scope scans every note for case-insensitive containment.
//! - Both scopes: title matches first, then content-only matches, one entry per id.
//! - A non-empty tag set keeps notes carrying at least one of the tags.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use notafacil_core::{Note, NoteRepository, Result, SearchNotesRequest};
use tracing::debug;

/// Service for searching notes.
#[derive(Clone)]
pub struct SearchService {
    notes: Arc<dyn NoteRepository>,
}

impl SearchService {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// Run a search.
    pub async fn execute(&self, request: &SearchNotesRequest) -> Result<Vec<Note>> {
        let start = Instant::now();

        if request.text.is_empty() && request.tag_ids.is_empty() {
            return self.notes.find_all().await;
        }

        let mut results = if request.text.is_empty() {
            self.notes.find_all().await?
        } else {
            self.match_text(request).await?
        };

        if !request.tag_ids.is_empty() {
            results.retain(|note| note.has_any_tag(&request.tag_ids));
        }

        debug!(
            subsystem = "api",
            component = "search",
            op = "execute",
            scope = %request.scope,
            tag_count = request.tag_ids.len(),
            result_count = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Search complete"
        );
        Ok(results)
    }

    async fn match_text(&self, request: &SearchNotesRequest) -> Result<Vec<Note>> {
        let text = request.text.as_str();

        let mut results = if request.scope.matches_title() {
            self.notes.find_by_title(text).await?
        } else {
            Vec::new()
        };

        if request.scope.matches_content() {
            let needle = text.to_lowercase();
            let mut seen: HashSet<String> = results.iter().map(|n| n.id().to_string()).collect();
            let content_matches = self
                .notes
                .find_all()
                .await?
                .into_iter()
                .filter(|note| note.content().to_lowercase().contains(&needle));

            for note in content_matches {
                if seen.insert(note.id().to_string()) {
                    results.push(note);
                }
            }
        }

        Ok(results)
    }
}
