//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role is not in
//! its permitted set. Handlers list the role extractor before any `Path`,
//! query or body extractor, so the check runs before the request is parsed
//! further or the database is touched, and a rejection looks the same whether
//! or not the target entity exists.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use footlights_core::roles::{is_permitted, ADMIN_ONLY, CONTENT_ROLES};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require(
    parts: &mut Parts,
    state: &AppState,
    permitted: &[&str],
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !is_permitted(&user.role, permitted) {
        tracing::warn!(
            user_id = user.user_id,
            role = %user.role,
            path = %parts.uri.path(),
            "Insufficient role"
        );
        return Err(AppError::forbidden());
    }
    Ok(user)
}

/// Requires the `admin` role. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, ADMIN_ONLY).await.map(RequireAdmin)
    }
}

/// Requires `editor` or `admin`. Rejects with 403 otherwise.
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, CONTENT_ROLES).await.map(RequireEditor)
    }
}

/// Requires any authenticated user.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::from_request_parts(parts, state).await.map(RequireAuth)
    }
}
