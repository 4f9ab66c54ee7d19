//! Note export to the portable JSON record format.

use std::collections::HashSet;
use std::sync::Arc;

use notafacil_core::{NoteRecord, NoteRepository, Result};
use tracing::info;

/// Service for exporting notes.
#[derive(Clone)]
pub struct ExportService {
    notes: Arc<dyn NoteRepository>,
}

impl ExportService {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// Export notes as a pretty-printed JSON array of note records.
    ///
    /// An empty id list exports every note. Otherwise only notes whose id is
    /// listed are exported, in storage order; unknown ids are ignored.
    pub async fn execute(&self, ids: &[String]) -> Result<String> {
        let mut notes = self.notes.find_all().await?;
        if !ids.is_empty() {
            let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
            notes.retain(|note| wanted.contains(note.id()));
        }

        let records: Vec<NoteRecord> = notes.into_iter().map(NoteRecord::from).collect();
        let json = serde_json::to_string_pretty(&records)?;

        info!(
            subsystem = "api",
            component = "export",
            op = "execute",
            requested = ids.len(),
            exported = records.len(),
            "Notes exported"
        );
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notafacil_core::mock::InMemoryNoteRepository;
    use notafacil_core::Note;

    fn repo() -> InMemoryNoteRepository {
        let notes = ["1", "2", "3"]
            .iter()
            .map(|id| {
                Note::builder(format!("Nota {}", id), "contenido")
                    .id(*id)
                    .build()
                    .unwrap()
            })
            .collect();
        InMemoryNoteRepository::new().with_notes(notes)
    }

    fn exported_ids(json: &str) -> Vec<String> {
        let records: Vec<NoteRecord> = serde_json::from_str(json).unwrap();
        records.into_iter().map(|r| r.id).collect()
    }

    #[tokio::test]
    async fn test_export_all() {
        let service = ExportService::new(Arc::new(repo()));
        let json = service.execute(&[]).await.unwrap();
        assert_eq!(exported_ids(&json), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_export_subset_in_storage_order_ignoring_unknown() {
        let service = ExportService::new(Arc::new(repo()));
        let ids = vec!["3".to_string(), "missing".to_string(), "1".to_string()];
        let json = service.execute(&ids).await.unwrap();
        assert_eq!(exported_ids(&json), vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_export_is_indented_with_two_spaces() {
        let service = ExportService::new(Arc::new(repo()));
        let json = service.execute(&["2".to_string()]).await.unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": \"2\""));
    }

    #[tokio::test]
    async fn test_export_empty_store_is_empty_array() {
        let service = ExportService::new(Arc::new(InMemoryNoteRepository::new()));
        assert_eq!(service.execute(&[]).await.unwrap(), "[]");
    }
}
