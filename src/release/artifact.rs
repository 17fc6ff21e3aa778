//! Release artifact checksums
//!
//! The manifest stores the lowercase hex MD5 of every release zip. The
//! publishing side hashes the zip it just built; the manifest side downloads
//! the published zip and checks it against the announced checksum.

use std::path::Path;
use std::time::Duration;

use md5::{Digest, Md5};
use reqwest::redirect::Policy;
use tracing::{debug, info};

use crate::config::{HTTP_TIMEOUT_SECS, MAX_DOWNLOAD_REDIRECTS, USER_AGENT};
use crate::release::error::ReleaseError;

pub fn md5_hex(bytes: &[u8]) -> String {
    format!("{:x}", Md5::digest(bytes))
}

pub fn md5_file(path: &Path) -> Result<String, ReleaseError> {
    if !path.exists() {
        return Err(ReleaseError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| ReleaseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(md5_hex(&bytes))
}

/// Downloads release artifacts, following at most `max_redirects` redirects
pub struct ArtifactFetcher {
    client: reqwest::Client,
    max_redirects: usize,
}

impl ArtifactFetcher {
    pub fn new(max_redirects: usize) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .redirect(Policy::limited(max_redirects))
                .build()
                .expect("Failed to create HTTP client"),
            max_redirects,
        }
    }

    pub async fn download(&self, url: &str) -> Result<Vec<u8>, ReleaseError> {
        debug!("Downloading {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_redirect() {
                ReleaseError::TooManyRedirects {
                    url: url.to_string(),
                    limit: self.max_redirects,
                }
            } else {
                ReleaseError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReleaseError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Downloads `url` and checks its MD5 against `expected` (case-insensitive).
    pub async fn verify_checksum(&self, url: &str, expected: &str) -> Result<(), ReleaseError> {
        let bytes = self.download(url).await?;
        let actual = md5_hex(&bytes);

        if !actual.eq_ignore_ascii_case(expected) {
            return Err(ReleaseError::ChecksumMismatch {
                url: url.to_string(),
                expected: expected.to_string(),
                actual,
            });
        }

        info!("Checksum verified for {}", url);
        Ok(())
    }
}

impl Default for ArtifactFetcher {
    fn default() -> Self {
        Self::new(MAX_DOWNLOAD_REDIRECTS)
    }
}
