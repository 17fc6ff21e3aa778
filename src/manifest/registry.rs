//! Release registry: the in-memory manifest
//!
//! Pruning is a global policy. The distinct `targetAbi` values of every entry
//! in every record are ranked newest first and the top [`RETAINED_ABI_GROUPS`]
//! form an allowlist applied to each record. Pruning only filters; it never
//! reorders or edits the entries it keeps.

use std::collections::BTreeSet;

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::manifest::error::ManifestError;
use crate::manifest::types::{PluginRecord, ReleaseEntry};
use crate::version::token::VersionToken;

/// Number of ABI generations (current and previous) kept in the feed
pub const RETAINED_ABI_GROUPS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseRegistry {
    records: Vec<PluginRecord>,
}

impl ReleaseRegistry {
    pub fn new(records: Vec<PluginRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PluginRecord] {
        &self.records
    }

    pub fn record_mut(&mut self, plugin_name: &str) -> Result<&mut PluginRecord, ManifestError> {
        self.records
            .iter_mut()
            .find(|record| record.name == plugin_name)
            .ok_or_else(|| ManifestError::PluginNotFound(plugin_name.to_string()))
    }

    /// The newest distinct `targetAbi` values across all records, at most
    /// [`RETAINED_ABI_GROUPS`] of them, newest first.
    pub fn retention_groups(&self) -> Vec<String> {
        let distinct: BTreeSet<&str> = self
            .records
            .iter()
            .flat_map(|record| &record.versions)
            .map(|entry| entry.target_abi.as_str())
            .collect();

        let mut ranked: Vec<(VersionToken, &str)> = distinct
            .into_iter()
            .filter_map(|abi| match VersionToken::parse(abi) {
                Ok(token) => Some((token, abi)),
                Err(e) => {
                    warn!("Ignoring release group with unparseable targetAbi: {}", e);
                    None
                }
            })
            .collect();

        // Tokens sharing a prefix compare equal; the longer one goes first so
        // the sort stays a total order.
        ranked.sort_by(|(a, _), (b, _)| {
            a.compare_descending(b)
                .then_with(|| b.segments().len().cmp(&a.segments().len()))
        });

        ranked
            .into_iter()
            .take(RETAINED_ABI_GROUPS)
            .map(|(_, abi)| abi.to_string())
            .collect()
    }

    /// Returns a copy of the registry holding only releases of the retained
    /// ABI groups.
    pub fn prune(&self) -> Self {
        let groups = self.retention_groups();
        debug!("Retaining targetAbi groups: {:?}", groups);

        let records = self
            .records
            .iter()
            .map(|record| {
                let versions: Vec<ReleaseEntry> = record
                    .versions
                    .iter()
                    .filter(|entry| groups.contains(&entry.target_abi))
                    .cloned()
                    .collect();

                let removed = record.versions.len() - versions.len();
                if removed > 0 {
                    info!("Pruned {} old release(s) of {}", removed, record.name);
                }

                PluginRecord {
                    versions,
                    ..record.clone()
                }
            })
            .collect();

        Self { records }
    }
}

impl PluginRecord {
    /// Publishes `entry` as the newest release.
    pub fn insert(&mut self, entry: ReleaseEntry) {
        self.versions.insert(0, entry);
    }

    /// Checks that `entry` is well formed and not already published here.
    pub fn validate_entry(&self, entry: &ReleaseEntry) -> Result<(), ManifestError> {
        VersionToken::parse(&entry.version).map_err(|source| ManifestError::InvalidVersion {
            field: "version",
            source,
        })?;
        VersionToken::parse(&entry.target_abi).map_err(|source| {
            ManifestError::InvalidVersion {
                field: "targetAbi",
                source,
            }
        })?;

        if entry.checksum.len() != 32 || !entry.checksum.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ManifestError::InvalidChecksum(entry.checksum.clone()));
        }

        DateTime::parse_from_rfc3339(&entry.timestamp).map_err(|source| {
            ManifestError::InvalidTimestamp {
                value: entry.timestamp.clone(),
                source,
            }
        })?;

        if self.versions.iter().any(|v| v.version == entry.version) {
            return Err(ManifestError::DuplicateVersion {
                plugin: self.name.clone(),
                version: entry.version.clone(),
            });
        }

        Ok(())
    }
}
