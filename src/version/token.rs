//! Dotted numeric version values ("10.9.11", "1.2.3.0")
//!
//! Unlike semver, a token may have any number of segments and carries no
//! pre-release or build metadata.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::version::error::VersionError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionToken {
    segments: Vec<u64>,
}

impl VersionToken {
    /// Parse a dotted version. Every segment must be a non-negative integer.
    ///
    /// Examples:
    /// - "10.9.11" -> [10, 9, 11]
    /// - "1" -> [1]
    /// - "1.x" -> Err(InvalidSegment)
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let segments = version
            .split('.')
            .map(|segment| {
                segment
                    .parse::<u64>()
                    .map_err(|_| VersionError::InvalidSegment {
                        version: version.to_string(),
                        segment: segment.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// Returns a token with the last segment bumped by one. No carry into
    /// preceding segments: 1.0.9 becomes 1.0.10.
    pub fn incremented(&self) -> Result<Self, VersionError> {
        let mut segments = self.segments.clone();
        // parse() never yields an empty token
        if let Some(last) = segments.last_mut() {
            *last = last
                .checked_add(1)
                .ok_or_else(|| VersionError::SegmentOverflow(self.to_string()))?;
        }
        Ok(Self { segments })
    }

    /// Ordering that puts the greater token first.
    ///
    /// Only the common prefix is compared; a shorter token is never padded with
    /// zeros, so "10.9" and "10.9.1" compare equal.
    pub fn compare_descending(&self, other: &Self) -> Ordering {
        self.segments
            .iter()
            .zip(&other.segments)
            .map(|(a, b)| b.cmp(a))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl FromStr for VersionToken {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = self.segments.iter();
        if let Some(first) = segments.next() {
            write!(f, "{first}")?;
        }
        for segment in segments {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

/// Increment the last segment of a dotted version string.
pub fn increment_version(version: &str) -> Result<String, VersionError> {
    Ok(VersionToken::parse(version)?.incremented()?.to_string())
}
