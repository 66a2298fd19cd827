//! Handlers for the `/admin/users` resource. Admin only.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use footlights_core::error::CoreError;
use footlights_core::types::DbId;
use footlights_db::models::user::{ResetPasswordRequest, UpdateUser, UserResponse};
use footlights_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, ValidJson};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "User";

/// GET /api/v1/admin/users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let users: Vec<UserResponse> = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Profile fields, role and active flag. Admins cannot demote or deactivate
/// their own account.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    if id == admin.user_id {
        if input.is_active == Some(false) {
            return Err(self_lockout());
        }
        if input.role.as_deref().is_some_and(|r| r != admin.role) {
            return Err(self_lockout());
        }
    }

    // Leaving the account inactive also signs it out.
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(target_user_id = id, user_id = admin.user_id, "User updated");

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivates the account and revokes its sessions. Accounts are never
/// hard-deleted; the response carries the now inactive user.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if id == admin.user_id {
        return Err(self_lockout());
    }

    let user = UserRepo::deactivate(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(target_user_id = id, user_id = admin.user_id, "User deactivated");
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Sets a new password, clears any lockout and signs the user out everywhere.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<ResetPasswordRequest>,
) -> AppResult<impl IntoResponse> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::reset_password(&state.pool, id, &hashed)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(target_user_id = id, user_id = admin.user_id, "Password reset by admin");
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

fn self_lockout() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Admins cannot deactivate or demote their own account".into(),
    ))
}
