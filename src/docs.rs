//! Keeps the "Jellyfin <version> (or newer)" requirement in documentation in
//! sync with the current platform version.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use thiserror::Error;

static REQUIREMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Jellyfin.*\(or newer\)").expect("requirement pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StampError {
    #[error("Failed to get current version of Jellyfin.Model")]
    MissingCompatibilityVersion,
}

/// Result of stamping a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamped {
    pub content: String,
    pub changed: bool,
}

/// Rewrite the first "Jellyfin ... (or newer)" span in `content` to name
/// `version`. Later occurrences are left alone.
pub fn stamp(content: &str, version: Option<&str>) -> Result<Stamped, StampError> {
    let version = version.ok_or(StampError::MissingCompatibilityVersion)?;
    let replacement = format!("Jellyfin {version} (or newer)");

    let updated = REQUIREMENT_PATTERN.replace(content, NoExpand(&replacement));
    let changed = updated != content;

    Ok(Stamped {
        content: updated.into_owned(),
        changed,
    })
}
