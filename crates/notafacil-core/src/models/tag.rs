//! The Tag entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validation::{self, DEFAULT_TAG_COLOR};

use super::stored_instant;

/// A named, colored label referenced by id from notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TagRecord", try_from = "TagRecord")]
pub struct Tag {
    id: String,
    name: String,
    color: String,
    created_at: DateTime<Utc>,
}

impl Tag {
    /// Build a tag with a generated id. `None` selects the default color.
    pub fn new(name: impl Into<String>, color: Option<String>) -> Result<Self, ValidationError> {
        Self::restore(None, name, color, None)
    }

    /// Build a tag from stored or supplied parts.
    pub fn restore(
        id: Option<String>,
        name: impl Into<String>,
        color: Option<String>,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let color = color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string());
        validation::validate_tag(&name, &color)?;
        Ok(Self {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name,
            color,
            created_at: stored_instant(created_at.unwrap_or_else(Utc::now)),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn update_name(self, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validation::validate_tag(&name, &self.color)?;
        Ok(Self { name, ..self })
    }

    pub fn update_color(self, color: impl Into<String>) -> Result<Self, ValidationError> {
        let color = color.into();
        validation::validate_tag(&self.name, &color)?;
        Ok(Self { color, ..self })
    }

    pub fn to_record(&self) -> TagRecord {
        TagRecord::from(self.clone())
    }
}

/// Plain tag record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagRecord {
    pub id: String,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl From<Tag> for TagRecord {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color,
            created_at: tag.created_at,
        }
    }
}

impl TryFrom<TagRecord> for Tag {
    type Error = ValidationError;

    fn try_from(record: TagRecord) -> Result<Self, Self::Error> {
        Tag::restore(
            Some(record.id),
            record.name,
            Some(record.color),
            Some(record.created_at),
        )
    }
}
