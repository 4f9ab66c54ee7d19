//! Note HTTP handlers.
//!
//! Search, create, export and import are the note surface; single-note
//! lookup and delete round it out.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use notafacil_core::{ImportMode, ImportSummary, NoteRecord, SearchNotesRequest, SearchScope};
use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::services::CreateNoteRequest;
use crate::{ApiError, AppState};

/// Query parameters for searching notes.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchNotesQuery {
    /// Free text; empty means no text criterion
    pub search: Option<String>,
    /// Comma-separated tag ids; a note matches if it carries any of them
    pub tags: Option<String>,
    /// `title` (default), `content` or `both`
    pub scope: Option<String>,
}

/// Query parameters for exporting notes.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportNotesQuery {
    /// Comma-separated note ids; omitted exports everything
    pub ids: Option<String>,
}

/// Request body for importing notes.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportNotesRequest {
    /// JSON text holding an array of note records
    #[serde(default)]
    #[schema(value_type = String)]
    pub json_data: Option<Value>,
    /// `SKIP` (default) or `UPDATE`; anything else, including non-strings, means `SKIP`
    #[serde(default)]
    #[schema(value_type = String)]
    pub mode: Option<Value>,
}

/// Split a comma-separated list, dropping empty entries.
fn split_ids(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Resolve the requested import mode, falling back to SKIP.
fn import_mode(raw: Option<&Value>) -> ImportMode {
    raw.and_then(Value::as_str)
        .and_then(|m| m.parse().ok())
        .unwrap_or_default()
}

/// Search notes by text and tags.
#[utoipa::path(get, path = "/api/notes", tag = "Notes",
    params(SearchNotesQuery),
    responses((status = 200, description = "Matching notes", body = [NoteRecord])))]
pub async fn search_notes(
    State(state): State<AppState>,
    Query(query): Query<SearchNotesQuery>,
) -> Result<Json<Vec<NoteRecord>>, ApiError> {
    let request = SearchNotesRequest {
        text: query.search.unwrap_or_default(),
        tag_ids: split_ids(query.tags.as_deref()),
        // Unknown scopes fall back to title search
        scope: query
            .scope
            .as_deref()
            .and_then(|s| s.parse::<SearchScope>().ok())
            .unwrap_or_default(),
    };

    let notes = state.search.execute(&request).await?;
    Ok(Json(notes.into_iter().map(NoteRecord::from).collect()))
}

/// Create a note.
#[utoipa::path(post, path = "/api/notes", tag = "Notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Created", body = NoteRecord),
        (status = 400, description = "Validation failed")))]
pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NoteRecord>), ApiError> {
    let Json(request) = payload?;
    let note = state.notes.create(request).await?;
    Ok((StatusCode::CREATED, Json(note.to_record())))
}

/// Export notes as a JSON array of note records.
#[utoipa::path(get, path = "/api/notes/export", tag = "Notes",
    params(ExportNotesQuery),
    responses((status = 200, description = "Exported notes", body = [NoteRecord])))]
pub async fn export_notes(
    State(state): State<AppState>,
    Query(query): Query<ExportNotesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let ids = split_ids(query.ids.as_deref());
    let json = state.export.execute(&ids).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json))
}

/// Import notes from a JSON array of note records.
#[utoipa::path(post, path = "/api/notes/import", tag = "Notes",
    request_body = ImportNotesRequest,
    responses(
        (status = 200, description = "Import summary", body = ImportSummary),
        (status = 400, description = "Missing or invalid JSON data")))]
pub async fn import_notes(
    State(state): State<AppState>,
    payload: Result<Json<ImportNotesRequest>, JsonRejection>,
) -> Result<Json<ImportSummary>, ApiError> {
    let Json(request) = payload?;
    let json_data = match request.json_data {
        Some(Value::String(text)) if !text.is_empty() => text,
        _ => {
            return Err(ApiError::BadRequest(
                "jsonData field with JSON text is required".to_string(),
            ))
        }
    };
    let mode = import_mode(request.mode.as_ref());

    let summary = state.import.execute(&json_data, mode).await?;
    Ok(Json(summary))
}

/// Get a note by id.
#[utoipa::path(get, path = "/api/notes/{id}", tag = "Notes",
    params(("id" = String, Path, description = "Note id")),
    responses(
        (status = 200, description = "The note", body = NoteRecord),
        (status = 404, description = "Not found")))]
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NoteRecord>, ApiError> {
    let note = state.notes.get(&id).await?;
    Ok(Json(note.to_record()))
}

/// Delete a note.
#[utoipa::path(delete, path = "/api/notes/{id}", tag = "Notes",
    params(("id" = String, Path, description = "Note id")),
    responses((status = 204, description = "Deleted")))]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.notes.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ids_drops_empty_entries() {
        assert_eq!(split_ids(Some("a,,b, ,c")), vec!["a", "b", "c"]);
        assert!(split_ids(Some("")).is_empty());
        assert!(split_ids(None).is_empty());
    }

    #[test]
    fn test_import_mode_falls_back_to_skip() {
        use serde_json::json;

        assert_eq!(import_mode(Some(&json!("UPDATE"))), ImportMode::Update);
        assert_eq!(import_mode(Some(&json!("merge"))), ImportMode::Skip);
        assert_eq!(import_mode(Some(&json!(1))), ImportMode::Skip);
        assert_eq!(import_mode(Some(&Value::Null)), ImportMode::Skip);
        assert_eq!(import_mode(None), ImportMode::Skip);
    }
}
