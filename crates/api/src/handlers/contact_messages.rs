//! Handlers for the `/admin/contact-messages` inbox.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use footlights_core::error::CoreError;
use footlights_core::types::DbId;
use footlights_db::models::contact_message::ContactMessageListParams;
use footlights_db::repositories::ContactMessageRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, Deleted};
use crate::state::AppState;

const ENTITY: &str = "ContactMessage";

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

/// GET /api/v1/admin/contact-messages
///
/// Newest first; `?unread_only=true` limits to unread messages.
pub async fn list(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppQuery(params): AppQuery<ContactMessageListParams>,
) -> AppResult<impl IntoResponse> {
    let messages = ContactMessageRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// GET /api/v1/admin/contact-messages/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
) -> AppResult<impl IntoResponse> {
    let unread = ContactMessageRepo::count_unread(&state.pool).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { unread },
    }))
}

/// GET /api/v1/admin/contact-messages/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = ContactMessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse { data: message }))
}

/// POST /api/v1/admin/contact-messages/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    set_read(&state, editor.user_id, id, true).await
}

/// POST /api/v1/admin/contact-messages/{id}/unread
pub async fn mark_unread(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    set_read(&state, editor.user_id, id, false).await
}

/// DELETE /api/v1/admin/contact-messages/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ContactMessageRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }
    tracing::info!(message_id = id, user_id = editor.user_id, "Contact message deleted");
    Ok(Json(Deleted::new(id)))
}

async fn set_read(
    state: &AppState,
    user_id: DbId,
    id: DbId,
    is_read: bool,
) -> AppResult<impl IntoResponse> {
    let message = ContactMessageRepo::set_read(&state.pool, id, is_read)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    tracing::debug!(message_id = id, is_read, user_id, "Contact message marked");
    Ok(Json(DataResponse { data: message }))
}
