//! Handlers for a show's photo gallery, nested at `/admin/shows/{id}/gallery`.
//!
//! Each show orders its own photos; ids from another show's gallery are
//! treated as missing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use footlights_core::error::CoreError;
use footlights_core::ordering::ReorderRequest;
use footlights_core::types::DbId;
use footlights_db::models::gallery_photo::{CreateGalleryPhoto, UpdateGalleryPhoto};
use footlights_db::models::show::Show;
use footlights_db::repositories::{GalleryPhotoRepo, ShowRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, ValidJson};
use crate::handlers::revalidate;
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, Deleted};
use crate::revalidate::tags;
use crate::state::AppState;

const ENTITY: &str = "GalleryPhoto";

/// GET /api/v1/admin/shows/{id}/gallery
pub async fn list(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppPath(show_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_show(&state, show_id).await?;
    let photos = GalleryPhotoRepo::list_for_show(&state.pool, show_id).await?;
    Ok(Json(DataResponse { data: photos }))
}

/// POST /api/v1/admin/shows/{id}/gallery
///
/// Appends an existing media item to the end of the gallery.
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(show_id): AppPath<DbId>,
    ValidJson(input): ValidJson<CreateGalleryPhoto>,
) -> AppResult<impl IntoResponse> {
    let show = ensure_show(&state, show_id).await?;
    let photo = GalleryPhotoRepo::create(&state.pool, show_id, &input).await?;

    tracing::info!(
        gallery_photo_id = photo.id,
        show_id,
        media_id = photo.media_id,
        user_id = editor.user_id,
        "Gallery photo added",
    );
    revalidate(&state, [tags::show(&show.slug)]).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: photo })))
}

/// PUT /api/v1/admin/shows/{id}/gallery/{photo_id}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath((show_id, id)): AppPath<(DbId, DbId)>,
    ValidJson(input): ValidJson<UpdateGalleryPhoto>,
) -> AppResult<impl IntoResponse> {
    let show = ensure_show(&state, show_id).await?;
    let photo = GalleryPhotoRepo::update(&state.pool, show_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(gallery_photo_id = id, show_id, user_id = editor.user_id, "Gallery photo updated");
    revalidate(&state, [tags::show(&show.slug)]).await;

    Ok(Json(DataResponse { data: photo }))
}

/// PUT /api/v1/admin/shows/{id}/gallery/reorder
pub async fn reorder(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(show_id): AppPath<DbId>,
    AppJson(input): AppJson<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let show = ensure_show(&state, show_id).await?;
    let positions = GalleryPhotoRepo::reorder(&state.pool, show_id, &input.ids).await?;

    tracing::info!(show_id, count = positions.len(), user_id = editor.user_id, "Gallery reordered");
    revalidate(&state, [tags::show(&show.slug)]).await;

    Ok(Json(DataResponse { data: positions }))
}

/// DELETE /api/v1/admin/shows/{id}/gallery/{photo_id}
///
/// Removes the photo from the gallery; the media item itself is kept.
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath((show_id, id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let show = ensure_show(&state, show_id).await?;
    if !GalleryPhotoRepo::delete(&state.pool, show_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }

    tracing::info!(gallery_photo_id = id, show_id, user_id = editor.user_id, "Gallery photo removed");
    revalidate(&state, [tags::show(&show.slug)]).await;

    Ok(Json(Deleted::new(id)))
}

async fn ensure_show(state: &AppState, show_id: DbId) -> AppResult<Show> {
    ShowRepo::find_by_id(&state.pool, show_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Show",
            id: show_id,
        }))
}
