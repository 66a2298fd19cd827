//! Team roster rules.

use crate::error::CoreError;
use crate::types::DbId;

/// Permanent deletion is only allowed for members that were deactivated first.
pub fn ensure_deletable(id: DbId, is_active: bool) -> Result<(), CoreError> {
    if is_active {
        return Err(CoreError::Conflict(format!(
            "Team member {id} is still active; deactivate it before deleting"
        )));
    }
    Ok(())
}
