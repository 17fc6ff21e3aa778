//! The `update-manifest` and `apply-release` tasks
//!
//! `update-manifest` runs in the plugin repository after a release build:
//!
//! ```text
//! NuGet index ──▶ compat version ──▶ payload ──▶ dispatch
//!                       │
//!                       └──▶ README / bug report form
//! ```
//!
//! `apply-release` runs in the manifest repository when the dispatch arrives:
//! validate, verify the checksum, insert, prune, save.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::config::{PLATFORM_PACKAGE, ReleaseConfig};
use crate::docs::stamp;
use crate::manifest::registry::ReleaseRegistry;
use crate::manifest::store;
use crate::manifest::types::ReleasePayload;
use crate::release::artifact::{ArtifactFetcher, md5_file};
use crate::release::dispatch::GitHubDispatcher;
use crate::release::error::ReleaseError;
use crate::version::matcher::filter_versions;
use crate::version::registry::Registry;

/// What `update_manifest` published and touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestUpdate {
    pub compatibility_version: String,
    pub payload: ReleasePayload,
    /// Documentation files that were rewritten
    pub updated_docs: Vec<PathBuf>,
}

/// Jellyfin version the release is stamped against.
///
/// Stable releases use the newest `Jellyfin.Model` on NuGet within the
/// configured major.minor; beta releases use `<main>.0`.
pub async fn resolve_compatibility_version(
    config: &ReleaseConfig,
    registry: &dyn Registry,
) -> Result<String, ReleaseError> {
    let main_version = config
        .main_version
        .as_deref()
        .ok_or(ReleaseError::MissingConfig("MAIN_VERSION"))?;

    if config.is_beta {
        return Ok(format!("{main_version}.0"));
    }

    let pattern = format!("{main_version}.*-*");
    let versions = registry.fetch_all_versions(PLATFORM_PACKAGE).await?;
    let latest = filter_versions(&versions.versions, &pattern)?.ok_or_else(|| {
        ReleaseError::NoMatchingVersion {
            package: PLATFORM_PACKAGE.to_string(),
            pattern: pattern.clone(),
        }
    })?;

    info!(
        "Latest version of {} matching {}: {}",
        PLATFORM_PACKAGE, pattern, latest
    );
    Ok(latest)
}

/// Announces the freshly built release and syncs the documentation.
///
/// All preconditions (configuration, documentation files, the release zip)
/// are checked before any network request is made.
pub async fn update_manifest(
    config: &ReleaseConfig,
    registry: &dyn Registry,
) -> Result<ManifestUpdate, ReleaseError> {
    let token = config
        .token
        .as_deref()
        .ok_or(ReleaseError::MissingConfig("GITHUB_PAT"))?;
    let repository = config
        .repository
        .as_deref()
        .ok_or(ReleaseError::MissingConfig("GITHUB_REPOSITORY"))?;
    let version = config
        .file_version
        .as_deref()
        .ok_or(ReleaseError::MissingConfig("NEW_FILE_VERSION"))?;
    let main_version = config
        .main_version
        .as_deref()
        .ok_or(ReleaseError::MissingConfig("MAIN_VERSION"))?;

    let docs = [
        config.resolve(&config.readme_path),
        config.resolve(&config.bug_report_path),
    ];
    if let Some(missing) = docs.iter().find(|path| !path.exists()) {
        return Err(ReleaseError::NotFound(missing.clone()));
    }

    let artifact_name = format!("{}-v{}.zip", config.artifact_prefix, version);
    let checksum = md5_file(&config.resolve(Path::new(&artifact_name)))?;

    let compatibility_version = resolve_compatibility_version(config, registry).await?;

    let payload = ReleasePayload {
        plugin_name: config.plugin_name.clone(),
        version: version.to_string(),
        changelog: format!(
            "- See the full changelog at [GitHub](https://github.com/{repository}/releases/tag/{main_version}/v{version})\n"
        ),
        target_abi: format!("{compatibility_version}.0"),
        source_url: format!(
            "https://github.com/{repository}/releases/download/{main_version}/v{version}/{artifact_name}"
        ),
        checksum,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };

    GitHubDispatcher::new(&config.github_api_base_url, token)
        .dispatch(&config.manifest_repository(), &payload)
        .await?;

    let mut updated_docs = Vec::new();
    for path in docs {
        if stamp_file(&path, &compatibility_version)? {
            info!("Updated {} with new Jellyfin version.", path.display());
            updated_docs.push(path);
        } else {
            info!("{} has already newest Jellyfin version.", path.display());
        }
    }

    info!("All operations completed successfully.");
    Ok(ManifestUpdate {
        compatibility_version,
        payload,
        updated_docs,
    })
}

fn stamp_file(path: &Path, version: &str) -> Result<bool, ReleaseError> {
    let io_error = |source| ReleaseError::Io {
        path: path.to_path_buf(),
        source,
    };

    let content = std::fs::read_to_string(path).map_err(io_error)?;
    let stamped = stamp(&content, Some(version))?;
    if stamped.changed {
        std::fs::write(path, stamped.content).map_err(io_error)?;
    }
    Ok(stamped.changed)
}

/// Adds the announced release to the manifest at `manifest_path` and prunes
/// outdated ABI groups. With a `fetcher`, the published zip is downloaded and
/// its checksum verified first; nothing is written if any step fails.
pub async fn apply_release(
    manifest_path: &Path,
    payload: &ReleasePayload,
    fetcher: Option<&ArtifactFetcher>,
) -> Result<ReleaseRegistry, ReleaseError> {
    let mut registry = store::load(manifest_path)?;
    let entry = payload.to_entry();

    let record = registry.record_mut(&payload.plugin_name)?;
    record.validate_entry(&entry)?;

    if let Some(fetcher) = fetcher {
        fetcher
            .verify_checksum(&entry.source_url, &entry.checksum)
            .await?;
    }

    record.insert(entry);
    info!(
        "Added {} v{} (targetAbi {})",
        payload.plugin_name, payload.version, payload.target_abi
    );

    let pruned = registry.prune();
    store::save(manifest_path, &pruned)?;
    Ok(pruned)
}
