//! Bridge between declarative `validator` rules and [`CoreError`].
//!
//! Create/update DTOs derive [`Validate`] and implement [`Normalize`]; request
//! bodies are normalized, then checked with [`validate_input`] before anything
//! touches the database, so every rejected field is reported at once under its
//! own name. The custom rule functions here are referenced from
//! `#[validate(custom(function = "..."))]` attributes.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::{CoreError, FieldErrors};
use crate::roles::ALL_ROLES;
use crate::slug::is_valid_slug;

/// Maximum number of tags on one media item.
pub const MAX_TAGS: usize = 20;

/// Maximum length of a single tag.
pub const MAX_TAG_LENGTH: usize = 40;

/// Run the declarative rules on `input`, mapping failures to
/// [`CoreError::InvalidFields`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::InvalidFields(field_errors(&errors)))
}

/// Flatten `validator` errors into `field -> messages`, using dotted paths for
/// nested structs and `field[i]` for list items.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect("", errors, &mut out);
    out
}

fn collect(prefix: &str, errors: &ValidationErrors, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.add(path.clone(), describe(error));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

/// Human-readable message for one failed rule.
fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |name: &str| error.params.get(name).map(|v| v.to_string());
    match error.code.as_ref() {
        "length" => bounds_message(param("min"), param("max"), "characters"),
        "range" => bounds_message(param("min"), param("max"), ""),
        "email" => "must be a valid email address".to_string(),
        "url" => "must be a valid URL".to_string(),
        "required" => "is required".to_string(),
        other => format!("is invalid ({other})"),
    }
}

fn bounds_message(min: Option<String>, max: Option<String>, unit: &str) -> String {
    let unit = if unit.is_empty() {
        String::new()
    } else {
        format!(" {unit}")
    };
    match (min, max) {
        (Some(min), Some(max)) => format!("must be between {min} and {max}{unit}"),
        (Some(min), None) => format!("must be at least {min}{unit}"),
        (None, Some(max)) => format!("must be at most {max}{unit}"),
        (None, None) => "is out of range".to_string(),
    }
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Rejects strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_error("blank", "must not be blank"));
    }
    Ok(())
}

/// Slug format rule (see [`is_valid_slug`]).
pub fn slug_format(value: &str) -> Result<(), ValidationError> {
    if !is_valid_slug(value) {
        return Err(rule_error(
            "slug",
            "must contain only lowercase letters, digits and single hyphens",
        ));
    }
    Ok(())
}

/// Role name rule: one of [`ALL_ROLES`].
pub fn role_name(value: &str) -> Result<(), ValidationError> {
    if !ALL_ROLES.contains(&value) {
        return Err(rule_error("role", "must be one of: admin, editor"));
    }
    Ok(())
}

/// Media tag list rule: bounded count, each tag non-blank and bounded length.
pub fn tag_list(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(rule_error("tags", "must contain at most 20 tags"));
    }
    if tags.iter().any(|t| t.trim().is_empty()) {
        return Err(rule_error("tags", "must not contain blank tags"));
    }
    if tags.iter().any(|t| t.trim().chars().count() > MAX_TAG_LENGTH) {
        return Err(rule_error("tags", "each tag must be at most 40 characters"));
    }
    Ok(())
}

/// Lowercase, trim and de-duplicate tags, preserving first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Trim an optional string, turning blank values into `None`.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Cleanup applied to a request body before its rules run.
///
/// Implementations trim text fields and canonicalize values such as emails
/// and tags, so the rules see exactly what will be stored.
pub trait Normalize {
    fn normalize(&mut self);
}

/// Trim a required string in place.
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim a field that must not be blank when present. A blank value is kept
/// so `not_blank` still rejects it.
pub fn trim_present(value: &mut Option<String>) {
    if let Some(inner) = value {
        trim_in_place(inner);
    }
}

/// Trim a nullable field, dropping it entirely when blank.
pub fn clear_blank(value: &mut Option<String>) {
    *value = normalize_optional(value.as_deref());
}

/// Trim and lowercase an email address in place.
pub fn normalize_email(value: &mut String) {
    *value = value.trim().to_lowercase();
}
