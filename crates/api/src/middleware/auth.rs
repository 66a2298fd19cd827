//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use footlights_core::roles::ALL_ROLES;
use footlights_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Every failure (missing header, wrong scheme, bad signature, expiry, unknown
/// role) produces the same 401 body; the reason is only logged.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (`"admin"` or `"editor"`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            tracing::debug!(path = %parts.uri.path(), "Missing or malformed bearer token");
            AppError::unauthenticated()
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Rejected access token");
            AppError::unauthenticated()
        })?;

        if !ALL_ROLES.contains(&claims.role.as_str()) {
            tracing::warn!(user_id = claims.sub, role = %claims.role, "Token carries unknown role");
            return Err(AppError::unauthenticated());
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
