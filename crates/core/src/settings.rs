//! Site settings: the key/value store behind the public "company" page.

use crate::error::CoreError;

pub const KEY_COMPANY: &str = "company";
pub const KEY_CONTACT: &str = "contact";
pub const KEY_SOCIAL_LINKS: &str = "social_links";
pub const KEY_SEO: &str = "seo";

/// Keys the admin may write. Each value must be a JSON object.
pub const KNOWN_KEYS: &[&str] = &[KEY_COMPANY, KEY_CONTACT, KEY_SOCIAL_LINKS, KEY_SEO];

/// Largest accepted serialized value, in bytes.
const MAX_VALUE_BYTES: usize = 64 * 1024;

pub fn validate_setting(key: &str, value: &serde_json::Value) -> Result<(), CoreError> {
    if !KNOWN_KEYS.contains(&key) {
        return Err(CoreError::Validation(format!(
            "Unknown setting '{key}'. Known settings: {}",
            KNOWN_KEYS.join(", ")
        )));
    }
    if !value.is_object() {
        return Err(CoreError::Validation(format!(
            "Setting '{key}' must be a JSON object"
        )));
    }
    if value.to_string().len() > MAX_VALUE_BYTES {
        return Err(CoreError::Validation(format!(
            "Setting '{key}' is larger than {MAX_VALUE_BYTES} bytes"
        )));
    }
    Ok(())
}
