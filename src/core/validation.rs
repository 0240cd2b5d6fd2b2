//! Input validation for hutch operations.
//!
//! Turns caller-supplied strings into checked domain values.

use std::collections::BTreeMap;

use crate::core::domain::Platform;
use crate::error::{Result, ValidationError};

/// Parse a platform identifier.
///
/// # Errors
///
/// Returns `ValidationError::UnknownPlatform` for anything outside the
/// supported set.
pub fn parse_platform(id: &str) -> Result<Platform> {
    Ok(id.parse::<Platform>()?)
}

/// Convert a 1-based account number (as shown in listings) to an index.
///
/// # Errors
///
/// Returns `ValidationError::InvalidNumber` for 0, which no listing shows.
pub fn number_to_index(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| ValidationError::InvalidNumber(number).into())
}

/// Parse `name=value` pairs into a platform's optional fields.
///
/// Field names must belong to the platform. Empty values are dropped.
///
/// # Errors
///
/// Returns `ValidationError::UnsupportedField` for an unknown name or a
/// pair without `=`.
pub fn parse_fields(platform: Platform, pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut fields = BTreeMap::new();

    for pair in pairs {
        let (name, value) = pair.split_once('=').ok_or_else(|| ValidationError::UnsupportedField {
            platform,
            field: pair.clone(),
        })?;
        let name = name.trim();

        if platform.extra_field(name).is_none() {
            return Err(ValidationError::UnsupportedField {
                platform,
                field: name.to_string(),
            }
            .into());
        }

        let value = value.trim();
        if !value.is_empty() {
            fields.insert(name.to_string(), value.to_string());
        }
    }

    Ok(fields)
}

/// Check that a file is private to its owner (Unix only).
///
/// Returns the actual mode if it grants any group or other access.
#[cfg(unix)]
pub fn loose_permissions(path: &std::path::Path) -> Result<Option<u32>> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path)?.permissions().mode() & 0o777;
    Ok((mode & 0o077 != 0).then_some(mode))
}
