use std::collections::BTreeMap;
use std::fmt;

use crate::types::DbId;

/// Field-level validation messages keyed by field name.
///
/// Ordered so that serialized error bodies are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one message against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into `Err(CoreError::InvalidFields)` if any message was recorded.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed: {0}")]
    InvalidFields(FieldErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_errors_are_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn field_errors_display_is_sorted_by_field() {
        let mut errors = FieldErrors::new();
        errors.add("title", "must not be empty");
        errors.add("capacity", "must be at least 1");
        errors.add("title", "too long");

        assert_eq!(
            errors.to_string(),
            "capacity: must be at least 1; title: must not be empty; title: too long"
        );
    }

    #[test]
    fn field_errors_convert_to_invalid_fields() {
        let mut errors = FieldErrors::new();
        errors.add("slug", "bad");
        let err = errors.into_result().unwrap_err();
        assert!(matches!(err, CoreError::InvalidFields(ref f) if f.0.contains_key("slug")));
        assert_eq!(err.to_string(), "Validation failed: slug: bad");
    }
}
