//! Refresh-token sessions.
//!
//! Each login opens one session; a refresh consumes it and opens its
//! successor. Only the SHA-256 of the refresh token is stored.

use footlights_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Longest user-agent string kept on a session.
pub const MAX_USER_AGENT_LEN: usize = 255;

/// A row from `user_sessions`.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The refresh token a new session is keyed by, and where it came from.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub user_agent: Option<String>,
}

impl NewSession {
    pub fn new(
        refresh_token_hash: String,
        expires_at: Timestamp,
        user_agent: Option<&str>,
    ) -> Self {
        Self {
            refresh_token_hash,
            expires_at,
            user_agent: user_agent.map(clip_user_agent),
        }
    }
}

fn clip_user_agent(raw: &str) -> String {
    raw.trim().chars().take(MAX_USER_AGENT_LEN).collect()
}
