//! Target class naming.

use crate::error::TransformError;
use std::path::Path;

/// Converts a component name to a class identifier.
///
/// Non-identifier characters separate words, each word is capitalized, and
/// leading digits are dropped: `my-counter` → `MyCounter`. Returns `None`
/// when nothing usable is left.
pub fn class_name(name: &str) -> Option<String> {
    let mut joined = String::with_capacity(name.len());
    for word in name
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .filter(|word| !word.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            joined.extend(first.to_uppercase());
            joined.push_str(chars.as_str());
        }
    }

    let trimmed = joined.trim_start_matches(|c: char| c.is_ascii_digit());
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// Resolves the class name from the `name` option, falling back to the
/// file stem.
pub fn resolve_class_name(
    declared: Option<&str>,
    filename: Option<&str>,
) -> Result<String, TransformError> {
    declared
        .and_then(class_name)
        .or_else(|| {
            filename
                .and_then(|filename| Path::new(filename).file_stem())
                .and_then(|stem| stem.to_str())
                .and_then(class_name)
        })
        .ok_or(TransformError::MissingComponentName)
}
