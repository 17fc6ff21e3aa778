use std::path::PathBuf;

use thiserror::Error;

use crate::version::error::VersionError;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("{0} file not found")]
    NotFound(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Build file is empty: {0}")]
    EmptyBuildFile(PathBuf),

    #[error("Failed to parse YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Build file {0} is not a YAML mapping")]
    NotAMapping(PathBuf),

    #[error("No version field found in {0}")]
    MissingVersionField(PathBuf),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("Failed to export workflow variable: {0}")]
    Export(#[source] std::io::Error),
}
