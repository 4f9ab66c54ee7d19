//! Domain rules shared by the entities and the use cases.
//!
//! These are pure functions: they never construct anything and never touch
//! storage, so both the entity constructors and the services can call them
//! without duplicating rule text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

/// Maximum note title length, in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum note content length, in characters.
pub const MAX_CONTENT_LEN: usize = 10_000;

/// Maximum tag name length, in characters.
pub const MAX_TAG_NAME_LEN: usize = 50;

/// Color assigned to tags created without one.
pub const DEFAULT_TAG_COLOR: &str = "#cccccc";

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#([0-9A-F]{3}){1,2}$").expect("static regex"));

/// Validate a note title.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong { max: MAX_TITLE_LEN });
    }
    Ok(())
}

/// Validate note content. Empty content is allowed.
pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(ValidationError::ContentTooLong {
            max: MAX_CONTENT_LEN,
        });
    }
    Ok(())
}

/// Validate every note field in rule order: title, then content.
pub fn validate_note(title: &str, content: &str) -> Result<(), ValidationError> {
    validate_title(title)?;
    validate_content(content)
}

/// Validate a tag name.
pub fn validate_tag_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyTagName);
    }
    if name.chars().count() > MAX_TAG_NAME_LEN {
        return Err(ValidationError::TagNameTooLong {
            max: MAX_TAG_NAME_LEN,
        });
    }
    Ok(())
}

/// Check a `#RGB` / `#RRGGBB` hex color, case-insensitively.
pub fn is_valid_color(color: &str) -> bool {
    HEX_COLOR.is_match(color)
}

/// Validate a tag color.
pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    if is_valid_color(color) {
        Ok(())
    } else {
        Err(ValidationError::InvalidColor)
    }
}

/// Validate every tag field in rule order: name, then color.
pub fn validate_tag(name: &str, color: &str) -> Result<(), ValidationError> {
    validate_tag_name(name)?;
    validate_color(color)
}
