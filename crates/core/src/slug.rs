//! URL slug generation and validation for shows and press releases.

use crate::error::CoreError;

/// Maximum slug length in characters.
pub const MAX_SLUG_LENGTH: usize = 120;

/// Generate a URL-safe slug from a title.
///
/// Lowercases, folds common Latin accents to ASCII, replaces everything else
/// that is not alphanumeric with hyphens, collapses runs of hyphens and trims
/// them from both ends. The result is truncated to [`MAX_SLUG_LENGTH`].
pub fn generate_slug(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut prev_hyphen = true;

    for c in title.chars().flat_map(char::to_lowercase) {
        let c = fold_accent(c);
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }

    let mut slug = result.trim_end_matches('-').to_string();
    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        slug = slug.trim_end_matches('-').to_string();
    }
    slug
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Whether `slug` is non-empty, at most [`MAX_SLUG_LENGTH`] long, made of
/// lowercase ASCII letters, digits and single inner hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LENGTH
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Use the caller's slug when given, otherwise derive one from `title`.
///
/// Fails when no usable slug can be produced (e.g. a title of only symbols).
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, CoreError> {
    let slug = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => generate_slug(title),
    };
    if is_valid_slug(&slug) {
        Ok(slug)
    } else {
        Err(CoreError::Validation(format!(
            "Cannot use '{slug}' as a slug: only lowercase letters, digits and single hyphens are allowed"
        )))
    }
}
