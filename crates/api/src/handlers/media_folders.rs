//! Handlers for the `/admin/media-folders` resource.
//!
//! Deleting a folder removes its sub-folders; media inside is kept and
//! becomes unfiled.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use footlights_core::error::CoreError;
use footlights_core::types::DbId;
use footlights_db::models::media::{CreateMediaFolder, UpdateMediaFolder};
use footlights_db::repositories::MediaFolderRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, ValidJson};
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, Deleted};
use crate::state::AppState;

const ENTITY: &str = "MediaFolder";

/// GET /api/v1/admin/media-folders
pub async fn list(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
) -> AppResult<impl IntoResponse> {
    let folders = MediaFolderRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: folders }))
}

/// POST /api/v1/admin/media-folders
///
/// Sibling folders must have distinct names (409 otherwise).
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ValidJson(input): ValidJson<CreateMediaFolder>,
) -> AppResult<impl IntoResponse> {
    let folder = MediaFolderRepo::create(&state.pool, &input).await?;
    tracing::info!(folder_id = folder.id, user_id = editor.user_id, "Media folder created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: folder })))
}

/// PUT /api/v1/admin/media-folders/{id}
pub async fn rename(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateMediaFolder>,
) -> AppResult<impl IntoResponse> {
    let folder = MediaFolderRepo::rename(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    tracing::info!(folder_id = id, user_id = editor.user_id, "Media folder renamed");
    Ok(Json(DataResponse { data: folder }))
}

/// DELETE /api/v1/admin/media-folders/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !MediaFolderRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }
    tracing::info!(folder_id = id, user_id = editor.user_id, "Media folder deleted");
    Ok(Json(Deleted::new(id)))
}
