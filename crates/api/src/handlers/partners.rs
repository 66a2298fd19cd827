//! Handlers for the `/admin/partners` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use footlights_core::error::CoreError;
use footlights_core::ordering::ReorderRequest;
use footlights_core::types::DbId;
use footlights_db::models::partner::{CreatePartner, UpdatePartner};
use footlights_db::repositories::PartnerRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, ValidJson};
use crate::handlers::revalidate;
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, Deleted};
use crate::revalidate::tags;
use crate::state::AppState;

const ENTITY: &str = "Partner";

/// GET /api/v1/admin/partners
pub async fn list(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
) -> AppResult<impl IntoResponse> {
    let partners = PartnerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: partners }))
}

/// GET /api/v1/admin/partners/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let partner = PartnerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse { data: partner }))
}

/// POST /api/v1/admin/partners
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ValidJson(input): ValidJson<CreatePartner>,
) -> AppResult<impl IntoResponse> {
    let partner = PartnerRepo::create(&state.pool, &input).await?;

    tracing::info!(partner_id = partner.id, user_id = editor.user_id, "Partner created");
    revalidate(&state, [tags::PARTNERS]).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: partner })))
}

/// PUT /api/v1/admin/partners/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdatePartner>,
) -> AppResult<impl IntoResponse> {
    let partner = PartnerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(partner_id = id, user_id = editor.user_id, "Partner updated");
    revalidate(&state, [tags::PARTNERS]).await;

    Ok(Json(DataResponse { data: partner }))
}

/// PUT /api/v1/admin/partners/reorder
pub async fn reorder(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppJson(input): AppJson<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let positions = PartnerRepo::reorder(&state.pool, &input.ids).await?;

    tracing::info!(count = positions.len(), user_id = editor.user_id, "Partners reordered");
    revalidate(&state, [tags::PARTNERS]).await;

    Ok(Json(DataResponse { data: positions }))
}

/// DELETE /api/v1/admin/partners/{id}
///
/// Remaining partners close the gap.
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !PartnerRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }

    tracing::info!(partner_id = id, user_id = editor.user_id, "Partner deleted");
    revalidate(&state, [tags::PARTNERS]).await;

    Ok(Json(Deleted::new(id)))
}
