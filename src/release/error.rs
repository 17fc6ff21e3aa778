use std::path::PathBuf;

use thiserror::Error;

use crate::docs::StampError;
use crate::manifest::error::ManifestError;
use crate::version::error::{RegistryError, VersionError};

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("{0} environment variable is not set")]
    MissingConfig(&'static str),

    #[error("{0} file not found")]
    NotFound(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Too many redirects (limit {limit}) while fetching {url}")]
    TooManyRedirects { url: String, limit: usize },

    #[error("Unexpected status {status} from {url}: {body}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Checksum mismatch for {url}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("No versions of {package} match the pattern {pattern}")]
    NoMatchingVersion { package: String, pattern: String },

    #[error("Error fetching package information: {0}")]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Stamp(#[from] StampError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
