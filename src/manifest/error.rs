use std::path::PathBuf;

use thiserror::Error;

use crate::version::error::VersionError;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest {path} could not be read or written: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Plugin {0:?} is not listed in the manifest")]
    PluginNotFound(String),

    #[error("Version {version} of {plugin} is already published")]
    DuplicateVersion { plugin: String, version: String },

    #[error("Invalid {field} in release entry: {source}")]
    InvalidVersion {
        field: &'static str,
        #[source]
        source: VersionError,
    },

    #[error("Invalid checksum {0:?}: expected 32 hex digits")]
    InvalidChecksum(String),

    #[error("Invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
