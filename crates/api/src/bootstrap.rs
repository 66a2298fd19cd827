//! First-run provisioning of the initial admin account.

use footlights_core::error::CoreError;
use footlights_core::roles::ROLE_ADMIN;
use footlights_db::models::user::{CreateUser, UserResponse};
use footlights_db::repositories::UserRepo;
use footlights_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured admin account if the user table is empty.
///
/// Returns the created user, or `None` when nothing was configured or users
/// already exist. Later restarts never touch an existing account.
pub async fn ensure_bootstrap_admin(
    pool: &DbPool,
    admin: Option<&BootstrapAdmin>,
) -> AppResult<Option<UserResponse>> {
    let Some(admin) = admin else {
        return Ok(None);
    };

    if UserRepo::count(pool).await? > 0 {
        tracing::debug!("Users exist, skipping bootstrap admin");
        return Ok(None);
    }

    validate_password_strength(&admin.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(Some(user.into()))
}
