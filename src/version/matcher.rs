//! Glob-style version pattern matching
//!
//! Patterns are dotted versions with a single `*` wildcard:
//! - `10.1.0` - literal version
//! - `10.*` - anything starting with `10.`
//! - `10.10.*-*` - the NuGet query used for Jellyfin.Model
//!
//! Matching is a substring match, so `11.1.*` also accepts `11.1.0-beta`.
//! The matcher does not order versions: it returns the last candidate that
//! matches, and callers pass candidates sorted ascending so that the last
//! match is the newest one.

use regex::Regex;

use crate::version::error::VersionError;

#[derive(Debug, Clone)]
pub struct VersionPattern {
    regex: Regex,
}

impl VersionPattern {
    /// Compile a pattern. Dots are literal; only the first `*` is a wildcard.
    pub fn new(pattern: &str) -> Result<Self, VersionError> {
        let source = pattern.replace('.', r"\.").replacen('*', ".*", 1);
        let regex = Regex::new(&source).map_err(|source| VersionError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self { regex })
    }

    pub fn is_match(&self, version: &str) -> bool {
        self.regex.is_match(version)
    }

    /// Last candidate (in input order) matching the pattern
    pub fn latest_match<'a, S: AsRef<str>>(&self, candidates: &'a [S]) -> Option<&'a str> {
        candidates
            .iter()
            .map(|candidate| candidate.as_ref())
            .rfind(|version| self.is_match(version))
    }
}

/// Convenience wrapper: compile `pattern` and pick the last matching candidate.
pub fn filter_versions<S: AsRef<str>>(
    candidates: &[S],
    pattern: &str,
) -> Result<Option<String>, VersionError> {
    let pattern = VersionPattern::new(pattern)?;
    Ok(pattern.latest_match(candidates).map(str::to_string))
}
