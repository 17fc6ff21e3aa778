//! GitHub repository dispatch

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{DISPATCH_EVENT_TYPE, HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::manifest::types::ReleasePayload;
use crate::release::error::ReleaseError;

/// Body of `POST /repos/{owner}/{repo}/dispatches`
#[derive(Debug, Serialize)]
pub struct DispatchEvent<'a> {
    pub event_type: &'a str,
    pub client_payload: &'a ReleasePayload,
}

/// Sends `repository_dispatch` events through the GitHub REST API
pub struct GitHubDispatcher {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitHubDispatcher {
    /// Creates a new GitHubDispatcher with a custom base URL
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Announces `payload` to `repository` (`owner/name`).
    pub async fn dispatch(
        &self,
        repository: &str,
        payload: &ReleasePayload,
    ) -> Result<(), ReleaseError> {
        let url = format!("{}/repos/{}/dispatches", self.base_url, repository);
        let event = DispatchEvent {
            event_type: DISPATCH_EVENT_TYPE,
            client_payload: payload,
        };

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .bearer_auth(&self.token)
            .json(&event)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Failed to trigger dispatch event. Status: {}", status);
            return Err(ReleaseError::UnexpectedStatus {
                url,
                status: status.as_u16(),
                body,
            });
        }

        info!(
            "Successfully triggered dispatch event '{}'. Status: {}",
            DISPATCH_EVENT_TYPE, status
        );
        if status == reqwest::StatusCode::NO_CONTENT {
            info!("No content returned, which is expected for dispatches.");
        } else {
            let body = response.text().await.unwrap_or_default();
            info!("Response data: {}", body);
        }

        Ok(())
    }
}

impl fmt::Debug for GitHubDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubDispatcher")
            .field("base_url", &self.base_url)
            .field("token", &"***")
            .finish()
    }
}
