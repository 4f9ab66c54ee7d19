//! Note import from the portable JSON record format.
//!
//! The payload is decoded in full before any record is touched, so a
//! malformed payload never reaches storage. Records are then applied one at
//! a time; the first failing record stops the import and records before it
//! stay applied.

use std::sync::Arc;
use std::time::Instant;

use notafacil_core::{Error, ImportMode, ImportRecord, ImportSummary, NoteRepository, Result};
use serde_json::Value;
use tracing::{info, warn};

/// What happened to one record.
enum Outcome {
    Imported,
    Updated,
    Skipped,
}

/// Service for importing notes.
#[derive(Clone)]
pub struct ImportService {
    notes: Arc<dyn NoteRepository>,
}

impl ImportService {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// Import a JSON array of note records.
    ///
    /// # Errors
    ///
    /// - `Error::MalformedJson` if `json` is not JSON at all
    /// - `Error::UnexpectedShape` if it is JSON but not an array
    /// - `Error::InvalidNoteData` for the first record that fails, wrapping the cause
    pub async fn execute(&self, json: &str, mode: ImportMode) -> Result<ImportSummary> {
        let start = Instant::now();
        let records = parse_payload(json)?;
        let mut summary = ImportSummary::default();

        for (index, value) in records.into_iter().enumerate() {
            let outcome = self.apply(value, mode).await.map_err(|source| {
                warn!(
                    subsystem = "api",
                    component = "import",
                    op = "apply",
                    index,
                    error = %source,
                    "Import stopped at invalid record"
                );
                Error::InvalidNoteData {
                    index,
                    source: Box::new(source),
                }
            })?;

            match outcome {
                Outcome::Imported => summary.imported += 1,
                Outcome::Updated => summary.updated += 1,
                Outcome::Skipped => summary.skipped += 1,
            }
        }

        info!(
            subsystem = "api",
            component = "import",
            op = "execute",
            mode = %mode,
            imported = summary.imported,
            updated = summary.updated,
            skipped = summary.skipped,
            duration_ms = start.elapsed().as_millis() as u64,
            "Notes imported"
        );
        Ok(summary)
    }

    async fn apply(&self, value: Value, mode: ImportMode) -> Result<Outcome> {
        let record: ImportRecord = serde_json::from_value(value)?;

        let existing = match record.id.as_deref() {
            Some(id) => self.notes.find_by_id(id).await?,
            None => None,
        };

        match (existing, mode) {
            (None, _) => {
                self.notes.create(record.into_note()?).await?;
                Ok(Outcome::Imported)
            }
            (Some(_), ImportMode::Update) => {
                self.notes.update(record.into_note()?).await?;
                Ok(Outcome::Updated)
            }
            (Some(_), ImportMode::Skip) => Ok(Outcome::Skipped),
        }
    }
}

/// Decode the payload into its records without interpreting them.
fn parse_payload(json: &str) -> Result<Vec<Value>> {
    let parsed: Value =
        serde_json::from_str(json).map_err(|e| Error::MalformedJson(e.to_string()))?;
    match parsed {
        Value::Array(records) => Ok(records),
        _ => Err(Error::UnexpectedShape(
            "expected an array of notes".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use notafacil_core::mock::InMemoryNoteRepository;
    use notafacil_core::{Note, ValidationError};
    use serde_json::json;

    fn stored(id: &str, title: &str) -> Note {
        Note::builder(title, "original")
            .id(id)
            .tags(vec!["old".to_string()])
            .build()
            .unwrap()
    }

    fn record(id: &str, title: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "content": "importado",
            "createdAt": "2025-01-01T10:00:00Z",
            "updatedAt": "2025-01-02T10:00:00Z",
            "tags": ["x", "y"]
        })
    }

    fn service(repo: &InMemoryNoteRepository) -> ImportService {
        ImportService::new(Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn test_new_record_is_imported_verbatim() {
        let repo = InMemoryNoteRepository::new();
        let payload = json!([record("n1", "Nueva")]).to_string();

        let summary = service(&repo)
            .execute(&payload, ImportMode::Skip)
            .await
            .unwrap();
        assert_eq!(summary, ImportSummary { imported: 1, updated: 0, skipped: 0 });

        let note = repo.find_by_id("n1").await.unwrap().unwrap();
        assert_eq!(note.title(), "Nueva");
        assert_eq!(note.content(), "importado");
        assert_eq!(note.tags(), ["x", "y"]);
        assert_eq!(
            note.created_at(),
            Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(
            note.updated_at(),
            Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_skip_mode_leaves_existing_note_alone() {
        let repo = InMemoryNoteRepository::new().with_notes(vec![stored("n1", "Original")]);
        let payload = json!([record("n1", "Cambiada")]).to_string();

        let summary = service(&repo)
            .execute(&payload, ImportMode::Skip)
            .await
            .unwrap();
        assert_eq!(summary, ImportSummary { imported: 0, updated: 0, skipped: 1 });

        let note = repo.find_by_id("n1").await.unwrap().unwrap();
        assert_eq!(note.title(), "Original");
        assert_eq!(note.content(), "original");
        assert_eq!(repo.call_count("update"), 0);
    }

    #[tokio::test]
    async fn test_update_mode_overwrites_existing_note() {
        let repo = InMemoryNoteRepository::new().with_notes(vec![stored("n1", "Original")]);
        let payload = json!([record("n1", "Cambiada"), record("n2", "Otra")]).to_string();

        let summary = service(&repo)
            .execute(&payload, ImportMode::Update)
            .await
            .unwrap();
        assert_eq!(summary, ImportSummary { imported: 1, updated: 1, skipped: 0 });

        let note = repo.find_by_id("n1").await.unwrap().unwrap();
        assert_eq!(note.title(), "Cambiada");
        assert_eq!(note.content(), "importado");
        assert_eq!(note.tags(), ["x", "y"]);
    }

    #[tokio::test]
    async fn test_malformed_json_never_reaches_storage() {
        let repo = InMemoryNoteRepository::new();

        let err = service(&repo)
            .execute("{not json", ImportMode::Skip)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedJson(_)));
        assert!(err.to_string().starts_with("Invalid JSON: "));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_array_payload_is_rejected_before_storage() {
        let repo = InMemoryNoteRepository::new();
        let payload = record("n1", "Sola").to_string();

        let err = service(&repo)
            .execute(&payload, ImportMode::Skip)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedShape(_)));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_records() {
        let repo = InMemoryNoteRepository::new();
        let payload = json!([
            record("n1", "Primera"),
            record("n2", ""),
            record("n3", "Tercera")
        ])
        .to_string();

        let err = service(&repo)
            .execute(&payload, ImportMode::Skip)
            .await
            .unwrap_err();
        match &err {
            Error::InvalidNoteData { index, source } => {
                assert_eq!(*index, 1);
                assert!(matches!(
                    **source,
                    Error::Validation(ValidationError::EmptyTitle)
                ));
            }
            other => panic!("expected invalid note data, got {:?}", other),
        }
        assert!(err.to_string().starts_with("Invalid note data: "));

        let ids: Vec<String> = repo.notes().iter().map(|n| n.id().to_string()).collect();
        assert_eq!(ids, vec!["n1"]);
    }

    #[tokio::test]
    async fn test_wrongly_typed_field_fails_that_record() {
        let repo = InMemoryNoteRepository::new();
        let payload = json!([{ "id": "n1", "title": 42 }]).to_string();

        let err = service(&repo)
            .execute(&payload, ImportMode::Skip)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidNoteData { index: 0, .. }));
        assert!(!err.is_infrastructure());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_record_without_id_or_timestamps_gets_defaults() {
        let repo = InMemoryNoteRepository::new();
        let payload = json!([{ "title": "Sin id" }]).to_string();

        let summary = service(&repo)
            .execute(&payload, ImportMode::Update)
            .await
            .unwrap();
        assert_eq!(summary.imported, 1);

        let notes = repo.notes();
        assert_eq!(notes[0].title(), "Sin id");
        assert_eq!(notes[0].content(), "");
        assert!(notes[0].tags().is_empty());
        assert!(!notes[0].id().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported_as_infrastructure() {
        let repo = InMemoryNoteRepository::new().with_failing_writes();
        let payload = json!([record("n1", "Nueva")]).to_string();

        let err = service(&repo)
            .execute(&payload, ImportMode::Skip)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidNoteData { index: 0, .. }));
        assert!(err.is_infrastructure());
    }

    #[tokio::test]
    async fn test_empty_array_imports_nothing() {
        let repo = InMemoryNoteRepository::new();
        let summary = service(&repo).execute("[]", ImportMode::Skip).await.unwrap();
        assert_eq!(summary.total(), 0);
    }

    #[tokio::test]
    async fn test_timestamps_keep_microsecond_precision() {
        let repo = InMemoryNoteRepository::new();
        let payload = json!([{
            "id": "n1",
            "title": "Precisa",
            "createdAt": "2025-01-01T10:00:00.123456789Z",
            "updatedAt": "2025-01-01T10:00:00.123456Z"
        }])
        .to_string();

        service(&repo)
            .execute(&payload, ImportMode::Skip)
            .await
            .unwrap();

        let note = repo.find_by_id("n1").await.unwrap().unwrap();
        let expected = "2025-01-01T10:00:00.123456Z".parse::<chrono::DateTime<Utc>>().unwrap();
        assert_eq!(note.created_at(), expected);
        assert_eq!(note.updated_at(), expected);
    }
}
