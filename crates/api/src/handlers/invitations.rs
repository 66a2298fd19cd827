//! Handlers for the `/admin/invitations` resource. Admin only.
//!
//! New back-office accounts only come into existence through an invitation.
//! The raw token is mailed to the invitee; when no mailer is configured, or
//! delivery fails, the accept link is returned to the inviting admin instead.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use footlights_core::error::CoreError;
use footlights_core::invitation::accept_url;
use footlights_core::types::DbId;
use footlights_db::models::invitation::{
    CreateInvitation, CreateInvitationRequest, InvitationResponse,
};
use footlights_db::repositories::{InvitationRepo, UserRepo};

use crate::auth::jwt::generate_opaque_token;
use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, ValidJson};
use crate::mailer::invitation_mail;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Invitation";

/// GET /api/v1/admin/invitations
///
/// Every invitation, newest first, with its current state.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let invitations: Vec<InvitationResponse> = InvitationRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|row| InvitationResponse::from_row(row, now))
        .collect();
    Ok(Json(DataResponse { data: invitations }))
}

/// POST /api/v1/admin/invitations
///
/// Refused with 409 when the email already belongs to an account or has a
/// pending invitation.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidJson(input): ValidJson<CreateInvitationRequest>,
) -> AppResult<impl IntoResponse> {
    let email = input.email;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "An account with email '{email}' already exists"
        ))));
    }
    if InvitationRepo::has_pending_for_email(&state.pool, &email).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A pending invitation for '{email}' already exists"
        ))));
    }

    let (token, token_hash) = generate_opaque_token();
    let expires_at = Utc::now() + Duration::hours(state.config.invitation_expiry_hours);

    let row = InvitationRepo::create(
        &state.pool,
        &CreateInvitation {
            email,
            role: input.role,
            token_hash,
            invited_by: Some(admin.user_id),
            expires_at,
        },
    )
    .await?;

    let link = accept_url(&state.config.site_url, &token);
    let mut response = InvitationResponse::from_row(row, Utc::now());

    let delivered = match &state.mailer {
        Some(mailer) => {
            let mail = invitation_mail(&response.email, &response.role, &link, expires_at);
            match mailer.send(&mail).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(invitation_id = response.id, error = %e, "Invitation mail not sent");
                    false
                }
            }
        }
        None => false,
    };
    if !delivered {
        response.accept_url = Some(link);
    }

    tracing::info!(
        invitation_id = response.id,
        role = %response.role,
        delivered,
        user_id = admin.user_id,
        "Invitation created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// DELETE /api/v1/admin/invitations/{id}
///
/// Revokes a pending invitation. Accepted or already revoked invitations
/// yield 409.
pub async fn revoke(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = InvitationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    if !InvitationRepo::revoke(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Invitation {id} is already {}",
            existing.state_at(Utc::now()).as_str()
        ))));
    }

    tracing::info!(invitation_id = id, user_id = admin.user_id, "Invitation revoked");

    let revoked = InvitationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse {
        data: InvitationResponse::from_row(revoked, Utc::now()),
    }))
}
