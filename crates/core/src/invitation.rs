//! Admin invitation lifecycle rules.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default invitation lifetime in hours.
pub const DEFAULT_INVITATION_EXPIRY_HOURS: i64 = 72;

/// Where an invitation stands at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationState {
    Pending,
    Accepted,
    Revoked,
    Expired,
}

impl InvitationState {
    /// Classify an invitation. Acceptance and revocation win over expiry.
    pub fn at(
        now: Timestamp,
        expires_at: Timestamp,
        accepted_at: Option<Timestamp>,
        revoked_at: Option<Timestamp>,
    ) -> Self {
        if accepted_at.is_some() {
            InvitationState::Accepted
        } else if revoked_at.is_some() {
            InvitationState::Revoked
        } else if expires_at <= now {
            InvitationState::Expired
        } else {
            InvitationState::Pending
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InvitationState::Pending => "pending",
            InvitationState::Accepted => "accepted",
            InvitationState::Revoked => "revoked",
            InvitationState::Expired => "expired",
        }
    }

    /// Only pending invitations can be accepted.
    ///
    /// Every other state yields the same message so a token holder learns
    /// nothing about why the token stopped working.
    pub fn ensure_acceptable(self) -> Result<(), CoreError> {
        match self {
            InvitationState::Pending => Ok(()),
            _ => Err(CoreError::Unauthorized(
                "Invitation is invalid or has expired".to_string(),
            )),
        }
    }
}

/// Build the link emailed to the invitee.
pub fn accept_url(site_url: &str, token: &str) -> String {
    format!(
        "{}/admin/accept-invitation?token={token}",
        site_url.trim_end_matches('/')
    )
}
