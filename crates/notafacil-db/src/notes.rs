//! Note repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Pool, Postgres, Row, Transaction};
use tracing::debug;

use notafacil_core::{Error, Note, NoteRepository, Result};

use crate::escape_like;

/// Columns and tag aggregation shared by every note read.
///
/// Tags are aggregated in `position` order so the stored tag order survives
/// a round trip.
const SELECT_NOTES: &str = r#"
    SELECT n.id, n.title, n.content, n.created_at, n.updated_at,
           COALESCE(
               ARRAY_AGG(nt.tag_id ORDER BY nt.position) FILTER (WHERE nt.tag_id IS NOT NULL),
               '{}'::text[]
           ) AS tags
    FROM note n
    LEFT JOIN note_tag nt ON nt.note_id = n.id
"#;

/// Storage order for note listings.
const GROUP_AND_ORDER: &str = "GROUP BY n.id ORDER BY n.created_at ASC, n.id ASC";

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Map a database row to a Note.
///
/// Rows go back through entity validation, so a row edited by hand into an
/// invalid state surfaces as an error instead of an invalid note.
fn map_row_to_note(row: &PgRow) -> Result<Note> {
    let id: String = row.get("id");
    let created_at: DateTime<Utc> = row.get("created_at");
    let updated_at: DateTime<Utc> = row.get("updated_at");
    let tags: Vec<String> = row.get("tags");

    Note::builder(row.get::<String, _>("title"), row.get::<String, _>("content"))
        .id(id)
        .created_at(created_at)
        .updated_at(updated_at)
        .tags(tags)
        .build()
        .map_err(Error::from)
}

fn map_rows(rows: Vec<PgRow>) -> Result<Vec<Note>> {
    rows.iter().map(map_row_to_note).collect()
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Note>> {
        let sql = format!("{} WHERE n.id = $1 {}", SELECT_NOTES, GROUP_AND_ORDER);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;
        row.as_ref().map(map_row_to_note).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Note>> {
        let sql = format!("{} {}", SELECT_NOTES, GROUP_AND_ORDER);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        map_rows(rows)
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Note>> {
        let sql = format!(
            "{} WHERE n.title ILIKE '%' || $1 || '%' ESCAPE '\\' {}",
            SELECT_NOTES, GROUP_AND_ORDER
        );
        let rows = sqlx::query(&sql)
            .bind(escape_like(title))
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        debug!(
            subsystem = "database",
            component = "notes",
            op = "find_by_title",
            result_count = rows.len(),
            "Title lookup complete"
        );
        map_rows(rows)
    }

    async fn find_by_tag(&self, tag_id: &str) -> Result<Vec<Note>> {
        let sql = format!(
            "{} WHERE EXISTS (SELECT 1 FROM note_tag f WHERE f.note_id = n.id AND f.tag_id = $1) {}",
            SELECT_NOTES, GROUP_AND_ORDER
        );
        let rows = sqlx::query(&sql)
            .bind(tag_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        map_rows(rows)
    }

    async fn create(&self, note: Note) -> Result<Note> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let result = self.create_tx(&mut tx, &note).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(result)
    }

    async fn update(&self, note: Note) -> Result<Note> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let result = self.update_tx(&mut tx, &note).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(result)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        // note_tag rows go with the note via ON DELETE CASCADE
        sqlx::query("DELETE FROM note WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}

// =============================================================================
// TRANSACTION-AWARE VARIANTS
// =============================================================================

/// Transaction-aware variants.
///
/// A note and its tag rows are always written together; these methods let a
/// caller compose several writes inside one transaction.
impl PgNoteRepository {
    /// Insert a note and its tags within an existing transaction.
    pub async fn create_tx(&self, tx: &mut Transaction<'_, Postgres>, note: &Note) -> Result<Note> {
        sqlx::query(
            "INSERT INTO note (id, title, content, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(note.id())
        .bind(note.title())
        .bind(note.content())
        .bind(note.created_at())
        .bind(note.updated_at())
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;

        self.write_tags_tx(tx, note.id(), note.tags()).await?;
        self.fetch_tx(tx, note.id()).await
    }

    /// Replace a note and its tags within an existing transaction.
    pub async fn update_tx(&self, tx: &mut Transaction<'_, Postgres>, note: &Note) -> Result<Note> {
        let result = sqlx::query(
            "UPDATE note SET title = $1, content = $2, created_at = $3, updated_at = $4
             WHERE id = $5",
        )
        .bind(note.title())
        .bind(note.content())
        .bind(note.created_at())
        .bind(note.updated_at())
        .bind(note.id())
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(note.id().to_string()));
        }

        sqlx::query("DELETE FROM note_tag WHERE note_id = $1")
            .bind(note.id())
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;
        self.write_tags_tx(tx, note.id(), note.tags()).await?;
        self.fetch_tx(tx, note.id()).await
    }

    /// Fetch a note within an existing transaction.
    pub async fn fetch_tx(&self, tx: &mut Transaction<'_, Postgres>, id: &str) -> Result<Note> {
        let sql = format!("{} WHERE n.id = $1 {}", SELECT_NOTES, GROUP_AND_ORDER);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Error::Database)?
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;
        map_row_to_note(&row)
    }

    async fn write_tags_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        note_id: &str,
        tags: &[String],
    ) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let positions: Vec<i32> = (0..tags.len() as i32).collect();
        sqlx::query(
            "INSERT INTO note_tag (note_id, position, tag_id)
             SELECT $1, p, t FROM UNNEST($2::int4[], $3::text[]) AS u(p, t)",
        )
        .bind(note_id)
        .bind(&positions)
        .bind(tags)
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }
}
