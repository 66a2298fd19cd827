//! Handlers for the `/admin/team-members` resource.
//!
//! Members are shown on the company page in `display_order`. A member must be
//! deactivated before an admin can delete it permanently.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use footlights_core::error::CoreError;
use footlights_core::ordering::ReorderRequest;
use footlights_core::types::DbId;
use footlights_db::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};
use footlights_db::repositories::TeamMemberRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, ValidJson};
use crate::handlers::revalidate;
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::{DataResponse, Deleted};
use crate::revalidate::tags;
use crate::state::AppState;

const ENTITY: &str = "TeamMember";

/// GET /api/v1/admin/team-members
///
/// Active and inactive members by display order.
pub async fn list(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
) -> AppResult<impl IntoResponse> {
    let members = TeamMemberRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/admin/team-members/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let member = TeamMemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse { data: member }))
}

/// POST /api/v1/admin/team-members
///
/// The new member is appended after the current last position.
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ValidJson(input): ValidJson<CreateTeamMember>,
) -> AppResult<impl IntoResponse> {
    let member = TeamMemberRepo::create(&state.pool, &input).await?;

    tracing::info!(
        team_member_id = member.id,
        display_order = member.display_order,
        user_id = editor.user_id,
        "Team member created",
    );
    revalidate(&state, [tags::TEAM]).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PUT /api/v1/admin/team-members/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateTeamMember>,
) -> AppResult<impl IntoResponse> {
    let member = TeamMemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(team_member_id = id, user_id = editor.user_id, "Team member updated");
    revalidate(&state, [tags::TEAM]).await;

    Ok(Json(DataResponse { data: member }))
}

/// POST /api/v1/admin/team-members/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    set_active(&state, editor.user_id, id, true).await
}

/// POST /api/v1/admin/team-members/{id}/deactivate
///
/// Hides the member from the public site; its position is kept.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    set_active(&state, editor.user_id, id, false).await
}

/// PUT /api/v1/admin/team-members/reorder
///
/// Body: `{ "ids": [...] }` listing every member exactly once in the new order.
pub async fn reorder(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppJson(input): AppJson<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let positions = TeamMemberRepo::reorder(&state.pool, &input.ids).await?;

    tracing::info!(count = positions.len(), user_id = editor.user_id, "Team members reordered");
    revalidate(&state, [tags::TEAM]).await;

    Ok(Json(DataResponse { data: positions }))
}

/// DELETE /api/v1/admin/team-members/{id}
///
/// Admin only. Active members are refused with 409.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    TeamMemberRepo::delete(&state.pool, id).await?;

    tracing::info!(team_member_id = id, user_id = admin.user_id, "Team member deleted");
    revalidate(&state, [tags::TEAM]).await;

    Ok(Json(Deleted::new(id)))
}

async fn set_active(
    state: &AppState,
    user_id: DbId,
    id: DbId,
    is_active: bool,
) -> AppResult<Json<DataResponse<TeamMember>>> {
    let member = TeamMemberRepo::set_active(&state.pool, id, is_active)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(team_member_id = id, is_active, user_id, "Team member activation changed");
    revalidate(state, [tags::TEAM]).await;

    Ok(Json(DataResponse { data: member }))
}
