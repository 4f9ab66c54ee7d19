//! Tag HTTP handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use notafacil_core::TagRecord;

use crate::services::CreateTagRequest;
use crate::{ApiError, AppState};

/// List all tags.
#[utoipa::path(get, path = "/api/tags", tag = "Tags",
    responses((status = 200, description = "All tags", body = [TagRecord])))]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagRecord>>, ApiError> {
    let tags = state.tags.list().await?;
    Ok(Json(tags.into_iter().map(TagRecord::from).collect()))
}

/// Create a tag.
#[utoipa::path(post, path = "/api/tags", tag = "Tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Created", body = TagRecord),
        (status = 400, description = "Validation failed")))]
pub async fn create_tag(
    State(state): State<AppState>,
    payload: Result<Json<CreateTagRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TagRecord>), ApiError> {
    let Json(request) = payload?;
    let tag = state.tags.create(request).await?;
    Ok((StatusCode::CREATED, Json(tag.to_record())))
}

/// Delete a tag.
#[utoipa::path(delete, path = "/api/tags/{id}", tag = "Tags",
    params(("id" = String, Path, description = "Tag id")),
    responses((status = 204, description = "Deleted")))]
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.tags.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
