//! User entity model and DTOs.

use footlights_core::types::{id_string, DbId, Timestamp};
use footlights_core::validation::{normalize_email, not_blank, role_name, trim_present, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a user. The password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// When repeated wrong passwords lock an account, and for how long.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    pub max_attempts: i32,
    pub lock_minutes: i32,
}

/// Counter state after a failed login.
#[derive(Debug, Clone, FromRow)]
pub struct LoginFailure {
    pub failed_login_count: i32,
    /// Set when this failure reached the policy threshold.
    pub locked_until: Option<Timestamp>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 3, max = 50), custom(function = "not_blank"))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "role_name"))]
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Admin-initiated password reset.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 12, max = 256))]
    pub new_password: String,
}

impl Normalize for UpdateUser {
    fn normalize(&mut self) {
        trim_present(&mut self.username);
        if let Some(email) = &mut self.email {
            normalize_email(email);
        }
    }
}

/// Passwords are taken verbatim.
impl Normalize for ResetPasswordRequest {
    fn normalize(&mut self) {}
}
