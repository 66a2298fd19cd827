//! Well-known role name constants and permission sets.
//!
//! These must match the `CHECK` constraint on `users.role` and
//! `invitations.role` in `20250101000001_create_users.sql`.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// All assignable roles.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

/// Roles allowed to manage users, invitations, site settings and hard deletes.
pub const ADMIN_ONLY: &[&str] = &[ROLE_ADMIN];

/// Roles allowed to manage site content.
pub const CONTENT_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

/// Whether `role` is a member of `permitted`.
pub fn is_permitted(role: &str, permitted: &[&str]) -> bool {
    permitted.contains(&role)
}

/// Validate that `role` names a known role.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if ALL_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown role '{role}'. Valid roles: {}",
            ALL_ROLES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_permitted_everywhere() {
        assert!(is_permitted(ROLE_ADMIN, ADMIN_ONLY));
        assert!(is_permitted(ROLE_ADMIN, CONTENT_ROLES));
    }

    #[test]
    fn editor_is_limited_to_content() {
        assert!(is_permitted(ROLE_EDITOR, CONTENT_ROLES));
        assert!(!is_permitted(ROLE_EDITOR, ADMIN_ONLY));
    }

    #[test]
    fn unknown_role_is_never_permitted() {
        assert!(!is_permitted("viewer", CONTENT_ROLES));
        assert!(!is_permitted("", ADMIN_ONLY));
        assert!(validate_role("viewer").is_err());
        assert!(validate_role(ROLE_EDITOR).is_ok());
    }
}
