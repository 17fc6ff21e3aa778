//! NuGet flat-container API implementation

use std::time::Duration;

use crate::config::{HTTP_TIMEOUT_SECS, NUGET_BASE_URL, USER_AGENT};
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;
use serde::Deserialize;
use tracing::{debug, warn};

/// Response from `{base}/{id}/index.json`
#[derive(Debug, Deserialize)]
struct NuGetIndexResponse {
    versions: Vec<String>,
}

/// Registry implementation for the NuGet v3 flat-container API
pub struct NuGetRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl NuGetRegistry {
    /// Creates a new NuGetRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for NuGetRegistry {
    fn default() -> Self {
        Self::new(NUGET_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for NuGetRegistry {
    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        // Package ids are case-insensitive but the flat container only serves lowercase
        let url = format!(
            "{}/{}/index.json",
            self.base_url,
            package_name.to_lowercase()
        );
        debug!("Fetching NuGet index: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("NuGet returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let index: NuGetIndexResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse NuGet index response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        // The flat container already lists versions ascending
        Ok(PackageVersions::new(index.versions))
    }
}
