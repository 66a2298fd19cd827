//! Handlers for the `/admin/media` resource (media library).
//!
//! Files go to the configured [`MediaStore`](crate::media_store::MediaStore)
//! under a dated, collision-free key; the database row keeps the metadata.

use std::io::Cursor;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use footlights_core::error::CoreError;
use footlights_core::media::{
    is_raster_image, mime_from_file_name, sanitize_file_name, storage_key, validate_mime_type,
    validate_upload_size,
};
use footlights_core::types::DbId;
use footlights_core::validation::{normalize_optional, normalize_tags, tag_list};
use footlights_db::models::media::{CreateMedia, MediaListParams, UpdateMedia};
use footlights_db::repositories::MediaRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::extract::{AppMultipart, AppPath, AppQuery, ValidJson};
use crate::handlers::revalidate;
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, Deleted};
use crate::revalidate::tags;
use crate::state::AppState;

const ENTITY: &str = "Media";

/// Fields collected from an upload form.
#[derive(Default)]
struct UploadForm {
    file: Option<(String, Option<String>, Vec<u8>)>,
    folder_id: Option<DbId>,
    alt_text: Option<String>,
    tags: Vec<String>,
}

/// GET /api/v1/admin/media
///
/// Filterable by `?folder_id=`, `?tag=` and `?mime=` (prefix, e.g. `image/`).
pub async fn list(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppQuery(params): AppQuery<MediaListParams>,
) -> AppResult<impl IntoResponse> {
    let items = MediaRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/media/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = MediaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/admin/media
///
/// Multipart form with a required `file` field and optional `folder_id`,
/// `alt_text` and `tags` (comma separated). Raster images get their pixel
/// dimensions recorded.
pub async fn upload(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppMultipart(mut multipart): AppMultipart,
) -> AppResult<impl IntoResponse> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                form.file = Some((file_name, content_type, data.to_vec()));
            }
            "folder_id" => {
                let text = field_text(field).await?;
                if let Some(text) = normalize_optional(Some(&text)) {
                    let id = text
                        .parse::<DbId>()
                        .map_err(|_| AppError::BadRequest(format!("invalid folder_id '{text}'")))?;
                    form.folder_id = Some(id);
                }
            }
            "alt_text" => {
                form.alt_text = normalize_optional(Some(&field_text(field).await?));
            }
            "tags" => {
                let text = field_text(field).await?;
                form.tags = text.split(',').map(str::to_string).collect();
            }
            _ => {} // ignore unknown fields
        }
    }

    let (file_name, content_type, data) =
        form.file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let mime = resolve_mime(content_type.as_deref(), &file_name)?;
    validate_upload_size(data.len() as u64, state.config.media.max_upload_bytes)?;

    let tags = normalize_tags(&form.tags);
    tag_list(&tags).map_err(|e| {
        AppError::Core(CoreError::Validation(format!(
            "tags: {}",
            e.message.unwrap_or_default()
        )))
    })?;

    let (width, height) = if is_raster_image(&mime) {
        let (w, h) = image_dimensions(&data)?;
        (Some(w), Some(h))
    } else {
        (None, None)
    };

    let key = storage_key(Utc::now(), &Uuid::new_v4().simple().to_string(), &file_name);
    state.media_store.put(&key, &data).await?;

    let input = CreateMedia {
        folder_id: form.folder_id,
        file_name: sanitize_file_name(&file_name),
        storage_path: key.clone(),
        mime_type: mime,
        size_bytes: data.len() as i64,
        width,
        height,
        alt_text: form.alt_text,
        tags,
        uploaded_by: Some(editor.user_id),
    };

    let media = match MediaRepo::create(&state.pool, &input).await {
        Ok(media) => media,
        Err(e) => {
            // Do not leave an orphaned file behind a failed insert.
            if let Err(cleanup) = state.media_store.delete(&key).await {
                tracing::warn!(key = %key, error = %cleanup, "Failed to remove orphaned upload");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        media_id = media.id,
        size_bytes = media.size_bytes,
        mime = %media.mime_type,
        user_id = editor.user_id,
        "Media uploaded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: media })))
}

/// PUT /api/v1/admin/media/{id}
///
/// Updates folder, alt text and tags. Tags are trimmed, lowercased and
/// de-duplicated.
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateMedia>,
) -> AppResult<impl IntoResponse> {
    let media = MediaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(media_id = id, user_id = editor.user_id, "Media updated");

    Ok(Json(DataResponse { data: media }))
}

/// DELETE /api/v1/admin/media/{id}
///
/// Removes the row, then the stored file. References from shows, slides,
/// partners and team members are cleared; gallery photos using it are
/// removed.
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let media = MediaRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    if let Err(e) = state.media_store.delete(&media.storage_path).await {
        tracing::warn!(media_id = id, key = %media.storage_path, error = %e, "Stored file not removed");
    }

    tracing::info!(media_id = id, user_id = editor.user_id, "Media deleted");
    revalidate(
        &state,
        [
            tags::SHOWS,
            tags::HERO_SLIDES,
            tags::TEAM,
            tags::PARTNERS,
            tags::PRESS,
        ],
    )
    .await;

    Ok(Json(Deleted::new(id)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn field_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

/// Use the declared content type unless it is missing or generic, then fall
/// back to the file extension.
fn resolve_mime(content_type: Option<&str>, file_name: &str) -> AppResult<String> {
    let declared = content_type
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");

    let mime = match declared {
        Some(ct) => ct,
        None => mime_from_file_name(file_name)
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "Cannot determine the type of '{file_name}'"
                )))
            })?,
    };
    validate_mime_type(&mime)?;
    Ok(mime)
}

/// Read pixel dimensions from the image header without decoding the pixels.
fn image_dimensions(data: &[u8]) -> AppResult<(i32, i32)> {
    let invalid = || AppError::Core(CoreError::Validation("File is not a readable image".into()));

    let (width, height) = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|_| invalid())?
        .into_dimensions()
        .map_err(|_| invalid())?;

    Ok((
        i32::try_from(width).map_err(|_| invalid())?,
        i32::try_from(height).map_err(|_| invalid())?,
    ))
}
