//! Tag repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use notafacil_core::{Error, Result, Tag, TagRepository};

/// PostgreSQL implementation of TagRepository.
#[derive(Clone)]
pub struct PgTagRepository {
    pool: Pool<Postgres>,
}

impl PgTagRepository {
    /// Create a new PgTagRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_row_to_tag(row: &PgRow) -> Result<Tag> {
    let created_at: DateTime<Utc> = row.get("created_at");
    Tag::restore(
        Some(row.get("id")),
        row.get::<String, _>("name"),
        Some(row.get("color")),
        Some(created_at),
    )
    .map_err(Error::from)
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Tag>> {
        let row = sqlx::query("SELECT id, name, color, created_at FROM tag WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;
        row.as_ref().map(map_row_to_tag).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Tag>> {
        let rows = sqlx::query(
            "SELECT id, name, color, created_at FROM tag ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;
        rows.iter().map(map_row_to_tag).collect()
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Tag>> {
        let rows = sqlx::query(
            "SELECT id, name, color, created_at FROM tag WHERE name = $1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;
        rows.iter().map(map_row_to_tag).collect()
    }

    async fn create(&self, tag: Tag) -> Result<Tag> {
        sqlx::query("INSERT INTO tag (id, name, color, created_at) VALUES ($1, $2, $3, $4)")
            .bind(tag.id())
            .bind(tag.name())
            .bind(tag.color())
            .bind(tag.created_at())
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(tag)
    }

    async fn update(&self, tag: Tag) -> Result<Tag> {
        let result = sqlx::query("UPDATE tag SET name = $1, color = $2 WHERE id = $3")
            .bind(tag.name())
            .bind(tag.color())
            .bind(tag.id())
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Tag {} not found", tag.id())));
        }
        Ok(tag)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        // Drop references first so no note keeps a dangling tag id
        sqlx::query("DELETE FROM note_tag WHERE tag_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        sqlx::query("DELETE FROM tag WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }
}
