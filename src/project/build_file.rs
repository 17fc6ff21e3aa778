//! JPRM build file support
//!
//! The Jellyfin Plugin Repository Manager reads plugin metadata from a YAML
//! build file. After a version bump its `version` field has to follow the new
//! file version.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::{info, warn};

use crate::project::error::ProjectError;

/// Locations probed for a build file, in order
pub const BUILD_FILE_CANDIDATES: &[&str] = &[
    "build.yaml",
    "build.yml",
    "jprm.yaml",
    "jprm.yml",
    ".jprm/build.yaml",
    ".jprm/build.yml",
];

/// Any one of these keys marks a YAML file as a JPRM build file
const JPRM_FIELDS: &[&str] = &["name", "version", "guid", "targetAbi"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFileUpdate {
    pub path: PathBuf,
    pub old_version: String,
    pub new_version: String,
}

/// Returns the first candidate under `root` that looks like a JPRM build file.
pub fn find_build_file(root: &Path) -> Option<PathBuf> {
    for candidate in BUILD_FILE_CANDIDATES {
        let path = root.join(candidate);
        if !path.exists() {
            continue;
        }

        info!("Auto-detected build file: {}", path.display());
        match load_mapping(&path) {
            Ok(mapping) if is_jprm_mapping(&mapping) => return Some(path),
            Ok(_) => warn!(
                "Found {} but it doesn't appear to be a valid JPRM build file",
                path.display()
            ),
            Err(e) => warn!("Error reading or parsing {}: {}", path.display(), e),
        }
    }

    info!("No JPRM build file found in common locations");
    None
}

/// A build file update that has been checked and rendered but not written yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBuildFile {
    update: BuildFileUpdate,
    yaml: String,
}

impl PendingBuildFile {
    pub fn update(&self) -> &BuildFileUpdate {
        &self.update
    }

    pub fn write(self) -> Result<BuildFileUpdate, ProjectError> {
        let path = &self.update.path;
        std::fs::write(path, self.yaml).map_err(|source| ProjectError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            "Updated version in {}: {} → {}",
            path.file_name().unwrap_or_default().to_string_lossy(),
            self.update.old_version,
            self.update.new_version
        );
        Ok(self.update)
    }
}

/// Loads the build file at `path` and renders it with `version` set to
/// `new_version`, keeping all other keys in order. Nothing is written.
pub fn prepare_build_file(
    path: &Path,
    new_version: &str,
) -> Result<PendingBuildFile, ProjectError> {
    let mut mapping = load_mapping(path)?;

    let old_version = mapping
        .get("version")
        .and_then(scalar_to_string)
        .ok_or_else(|| ProjectError::MissingVersionField(path.to_path_buf()))?;

    mapping.insert(
        Value::String("version".to_string()),
        Value::String(new_version.to_string()),
    );

    let yaml = serde_yaml::to_string(&Value::Mapping(mapping)).map_err(|source| {
        ProjectError::Yaml {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(PendingBuildFile {
        update: BuildFileUpdate {
            path: path.to_path_buf(),
            old_version,
            new_version: new_version.to_string(),
        },
        yaml,
    })
}

/// Sets `version` in the build file at `path`, keeping all other keys in order.
pub fn update_build_file(path: &Path, new_version: &str) -> Result<BuildFileUpdate, ProjectError> {
    info!("Updating version in JPRM build file: {}", path.display());
    prepare_build_file(path, new_version)?.write()
}

fn load_mapping(path: &Path) -> Result<Mapping, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Err(ProjectError::EmptyBuildFile(path.to_path_buf()));
    }

    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(mapping)) => Ok(mapping),
        Ok(_) => Err(ProjectError::NotAMapping(path.to_path_buf())),
        Err(source) => Err(ProjectError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn is_jprm_mapping(mapping: &Mapping) -> bool {
    JPRM_FIELDS
        .iter()
        .any(|field| mapping.get(*field).is_some_and(|value| !value.is_null()))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
