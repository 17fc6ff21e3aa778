//! Reading and writing `manifest.json`

use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;

use crate::manifest::error::ManifestError;
use crate::manifest::registry::ReleaseRegistry;

pub fn load(path: &Path) -> Result<ReleaseRegistry, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let registry: ReleaseRegistry = serde_json::from_str(&content)?;
    debug!(
        "Loaded {} plugin record(s) from {}",
        registry.records().len(),
        path.display()
    );
    Ok(registry)
}

/// Serializes the registry as a JSON array indented with four spaces.
pub fn to_json(registry: &ReleaseRegistry) -> Result<String, ManifestError> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    registry.serialize(&mut serializer)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn save(path: &Path, registry: &ReleaseRegistry) -> Result<(), ManifestError> {
    let json = to_json(registry)?;
    std::fs::write(path, json).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })
}
