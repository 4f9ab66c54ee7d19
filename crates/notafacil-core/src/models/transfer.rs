//! Search and import/export request and result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::Note;
use crate::error::ValidationError;

/// Which note fields a text search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    #[default]
    TitleOnly,
    ContentOnly,
    Both,
}

impl SearchScope {
    pub fn matches_title(self) -> bool {
        matches!(self, Self::TitleOnly | Self::Both)
    }

    pub fn matches_content(self) -> bool {
        matches!(self, Self::ContentOnly | Self::Both)
    }
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" | "title_only" => Ok(Self::TitleOnly),
            "content" | "content_only" => Ok(Self::ContentOnly),
            "both" => Ok(Self::Both),
            other => Err(format!("Unknown search scope: {}", other)),
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleOnly => write!(f, "title_only"),
            Self::ContentOnly => write!(f, "content_only"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// Request for searching notes.
#[derive(Debug, Clone, Default)]
pub struct SearchNotesRequest {
    /// Free text; empty means no text criterion
    pub text: String,
    /// Tag ids; a note matches if it carries any of them
    pub tag_ids: Vec<String>,
    pub scope: SearchScope,
}

/// Conflict policy for import records whose id already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImportMode {
    /// Leave the stored note alone
    #[default]
    Skip,
    /// Overwrite the stored note with the record
    Update,
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SKIP" => Ok(Self::Skip),
            "UPDATE" => Ok(Self::Update),
            other => Err(format!("Unknown import mode: {}", other)),
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "SKIP"),
            Self::Update => write!(f, "UPDATE"),
        }
    }
}

/// Outcome counts of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    #[serde(rename = "importedCount")]
    pub imported: usize,
    #[serde(rename = "updatedCount")]
    pub updated: usize,
    #[serde(rename = "skippedCount")]
    pub skipped: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.imported + self.updated + self.skipped
    }
}

/// One element of an import payload.
///
/// Every field is optional at the decoding stage so a record with a bad
/// field fails as invalid note data instead of failing the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ImportRecord {
    /// Build the note this record describes, taking every supplied field
    /// verbatim. A missing title is an empty title.
    pub fn into_note(self) -> Result<Note, ValidationError> {
        let mut builder = Note::builder(
            self.title.unwrap_or_default(),
            self.content.unwrap_or_default(),
        );
        if let Some(id) = self.id {
            builder = builder.id(id);
        }
        if let Some(at) = self.created_at {
            builder = builder.created_at(at);
        }
        if let Some(at) = self.updated_at {
            builder = builder.updated_at(at);
        }
        if let Some(tags) = self.tags {
            builder = builder.tags(tags);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parsing() {
        assert_eq!("title".parse::<SearchScope>(), Ok(SearchScope::TitleOnly));
        assert_eq!("CONTENT".parse::<SearchScope>(), Ok(SearchScope::ContentOnly));
        assert_eq!("both".parse::<SearchScope>(), Ok(SearchScope::Both));
        assert_eq!("content_only".parse::<SearchScope>(), Ok(SearchScope::ContentOnly));
        assert!("everything".parse::<SearchScope>().is_err());
        assert_eq!(SearchScope::default(), SearchScope::TitleOnly);
    }

    #[test]
    fn test_scope_field_selection() {
        assert!(SearchScope::TitleOnly.matches_title());
        assert!(!SearchScope::TitleOnly.matches_content());
        assert!(!SearchScope::ContentOnly.matches_title());
        assert!(SearchScope::Both.matches_title() && SearchScope::Both.matches_content());
    }

    #[test]
    fn test_import_mode_parsing() {
        assert_eq!("update".parse::<ImportMode>(), Ok(ImportMode::Update));
        assert_eq!("SKIP".parse::<ImportMode>(), Ok(ImportMode::Skip));
        assert!("merge".parse::<ImportMode>().is_err());
        assert_eq!(ImportMode::default(), ImportMode::Skip);
    }

    #[test]
    fn test_summary_wire_names() {
        let summary = ImportSummary {
            imported: 1,
            updated: 2,
            skipped: 3,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["importedCount"], 1);
        assert_eq!(json["updatedCount"], 2);
        assert_eq!(json["skippedCount"], 3);
        assert_eq!(summary.total(), 6);
    }

    #[test]
    fn test_import_record_takes_fields_verbatim() {
        let record: ImportRecord = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "title": "T",
            "content": "C",
            "createdAt": "2023-05-01T10:00:00Z",
            "updatedAt": "2023-06-01T10:00:00Z",
            "tags": ["1", "2"]
        }))
        .unwrap();
        let note = record.into_note().unwrap();
        assert_eq!(note.id(), "abc");
        assert_eq!(note.created_at().to_rfc3339(), "2023-05-01T10:00:00+00:00");
        assert_eq!(note.updated_at().to_rfc3339(), "2023-06-01T10:00:00+00:00");
        assert_eq!(note.tags(), ["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_import_record_without_title_is_invalid() {
        let record = ImportRecord {
            id: Some("x".into()),
            ..Default::default()
        };
        assert_eq!(record.into_note(), Err(ValidationError::EmptyTitle));
    }
}
