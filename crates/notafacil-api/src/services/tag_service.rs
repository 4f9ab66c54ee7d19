//! Tag management.

use std::sync::Arc;

use notafacil_core::{Error, Result, Tag, TagRepository};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

/// Request body for creating a tag.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateTagRequest {
    pub name: String,
    /// Hex color (`#RGB` or `#RRGGBB`); omitted means the default color
    #[serde(default)]
    pub color: Option<String>,
}

/// Service for tag operations.
#[derive(Clone)]
pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    pub async fn list(&self) -> Result<Vec<Tag>> {
        self.tags.find_all().await
    }

    /// Validate and persist a new tag.
    pub async fn create(&self, request: CreateTagRequest) -> Result<Tag> {
        let tag = Tag::new(request.name, request.color)?;
        let stored = self.tags.create(tag).await?;
        info!(
            subsystem = "api",
            component = "tags",
            op = "create",
            tag_id = %stored.id(),
            "Tag created"
        );
        Ok(stored)
    }

    /// Fetch a tag, failing with `Error::NotFound` when absent.
    pub async fn get(&self, id: &str) -> Result<Tag> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Tag {} not found", id)))
    }

    /// Delete a tag. Unknown ids succeed.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.tags.delete(id).await
    }
}
