//! Invitation model and DTOs.
//!
//! Only the SHA-256 hash of the invitation token is stored; the raw token
//! leaves the server once, inside the accept link.

use footlights_core::invitation::InvitationState;
use footlights_core::types::{id_string, option_id_string, DbId, Timestamp};
use footlights_core::validation::{normalize_email, not_blank, role_name, trim_in_place, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An invitation row from the `invitations` table.
#[derive(Debug, Clone, FromRow)]
pub struct Invitation {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub token_hash: String,
    pub invited_by: Option<DbId>,
    pub expires_at: Timestamp,
    pub accepted_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Invitation {
    pub fn state_at(&self, now: Timestamp) -> InvitationState {
        InvitationState::at(now, self.expires_at, self.accepted_at, self.revoked_at)
    }
}

/// Invitation as shown to admins (no token hash).
#[derive(Debug, Clone, Serialize)]
pub struct InvitationResponse {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub email: String,
    pub role: String,
    #[serde(with = "option_id_string")]
    pub invited_by: Option<DbId>,
    pub state: &'static str,
    pub expires_at: Timestamp,
    pub accepted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    /// Present only when no mailer is configured and the link must be shared by hand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_url: Option<String>,
}

impl InvitationResponse {
    pub fn from_row(row: Invitation, now: Timestamp) -> Self {
        let state = row.state_at(now).as_str();
        Self {
            id: row.id,
            email: row.email,
            role: row.role,
            invited_by: row.invited_by,
            state,
            expires_at: row.expires_at,
            accepted_at: row.accepted_at,
            created_at: row.created_at,
            accept_url: None,
        }
    }
}

/// Request body for `POST /admin/invitations`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvitationRequest {
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "role_name"))]
    pub role: String,
}

/// DTO for inserting an invitation.
#[derive(Debug)]
pub struct CreateInvitation {
    pub email: String,
    pub role: String,
    pub token_hash: String,
    pub invited_by: Option<DbId>,
    pub expires_at: Timestamp,
}

/// Request body for `POST /auth/invitations/accept`.
#[derive(Debug, Deserialize, Validate)]
pub struct AcceptInvitationRequest {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub token: String,
    #[validate(length(min = 3, max = 50), custom(function = "not_blank"))]
    pub username: String,
    #[validate(length(min = 12, max = 256))]
    pub password: String,
}

impl Normalize for CreateInvitationRequest {
    fn normalize(&mut self) {
        normalize_email(&mut self.email);
        trim_in_place(&mut self.role);
    }
}

/// The password is taken verbatim.
impl Normalize for AcceptInvitationRequest {
    fn normalize(&mut self) {
        trim_in_place(&mut self.token);
        trim_in_place(&mut self.username);
    }
}
