//! File handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use futures::TryStreamExt;
use std::sync::Arc;

use super::AppState;
use crate::db::UserId;
use crate::file::{ChildQuery, CreateFileRequest, FileChanges, FileId, FileQuery, PublicFile};
use crate::web::dto::ListFilesQuery;
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// POST /files - Create a file, image or folder.
///
/// A body that is not a JSON object is treated as empty, so it reports the
/// first missing field.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<CreateFileRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicFile>), ApiError> {
    let request = body.map(|Json(req)| req).unwrap_or_default();

    let validated = state.validator.validate(&request).await?;
    let file = state
        .files
        .save(user_id, validated, &state.blob_root)
        .await?;

    Ok((StatusCode::CREATED, Json(file)))
}

/// GET /files/:id - One of the caller's entries.
pub async fn show(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<PublicFile>, ApiError> {
    let id: FileId = id.parse().map_err(|_| ApiError::not_found())?;

    let file = state
        .files
        .get(&FileQuery::new().id(id).user_id(user_id))
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(file))
}

/// GET /files - The caller's entries under `parentId`, one page at a time.
///
/// An unknown or malformed parent yields an empty list; a malformed page
/// is read as page 0.
pub async fn index(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<ListFilesQuery>, QueryRejection>,
) -> Result<Json<Vec<PublicFile>>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let Some(parent_id) = query.parent() else {
        return Ok(Json(Vec::new()));
    };

    let children = ChildQuery::new(user_id, parent_id).page(query.page_number());
    let files: Vec<PublicFile> = state.files.list_children(&children).try_collect().await?;

    Ok(Json(files))
}

/// PUT /files/:id/publish
pub async fn publish(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<PublicFile>, ApiError> {
    set_public(&state, user_id, &id, true).await
}

/// PUT /files/:id/unpublish
pub async fn unpublish(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<PublicFile>, ApiError> {
    set_public(&state, user_id, &id, false).await
}

async fn set_public(
    state: &AppState,
    user_id: UserId,
    id: &str,
    is_public: bool,
) -> Result<Json<PublicFile>, ApiError> {
    let id: FileId = id.parse().map_err(|_| ApiError::not_found())?;

    let file = state
        .files
        .update(
            &FileQuery::new().id(id).user_id(user_id),
            &FileChanges::new().is_public(is_public),
        )
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(file))
}
