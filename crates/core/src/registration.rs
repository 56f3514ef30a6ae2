//! Input rules for player registration.
//!
//! The name doubles as the dedupe key of the `people` table and as half of
//! every canonical pair label, so it is trimmed before it is stored.

use crate::error::CoreError;
use crate::pairing::LABEL_SEPARATOR;

/// Longest accepted display name, in characters.
pub const MAX_NAME_CHARS: usize = 64;

/// Trim and validate a display name, returning the value to store.
pub fn normalize_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_CHARS} characters"
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(CoreError::Validation(
            "Name must not contain control characters".to_string(),
        ));
    }
    // Padding catches a standalone "x" at either edge, which would merge
    // with the separator once the name is joined into a label.
    if format!(" {name} ").contains(LABEL_SEPARATOR) {
        return Err(CoreError::Validation(
            "Name must not contain a standalone 'x' word".to_string(),
        ));
    }

    Ok(name.to_string())
}

/// Check that a photo reference is an absolute `http(s)` URL.
///
/// The generation API fetches the image itself, so anything it cannot
/// download is rejected up front.
pub fn validate_image_url(url: &str) -> Result<(), CoreError> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| CoreError::Validation("Image must be an http(s) URL".to_string()))?;

    if rest.is_empty() || rest.starts_with('/') || url.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!("Invalid image URL: {url}")));
    }

    Ok(())
}
