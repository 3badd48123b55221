// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP registry access with retries.

use super::{Registry, RegistryIndex, INDEX_FILE};
use crate::error::{RdsError, Result};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;

/// Maximum number of attempts per request
const MAX_RETRIES: u32 = 3;

/// Base delay in milliseconds for exponential backoff
const BASE_DELAY_MS: u64 = 500;

const USER_AGENT: &str = concat!("adms-rds-ui/", env!("CARGO_PKG_VERSION"));

/// Registry served over HTTP(S), e.g. raw files of a git hosting service.
#[derive(Debug, Clone)]
pub struct RemoteRegistry {
    base_url: String,
    client: Client,
}

/// Outcome of a single attempt.
enum Attempt {
    Done(String),
    /// Not worth retrying (4xx).
    Fatal(String),
    Retry(String),
}

impl RemoteRegistry {
    /// Creates a registry rooted at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// The base URL files are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL of a registry-relative path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn attempt(&self, url: &str) -> Attempt {
        let response = match self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(e.to_string()),
        };

        let status = response.status();
        if status.is_client_error() {
            return Attempt::Fatal(format!("HTTP {} for {}", status, url));
        }
        if !status.is_success() {
            return Attempt::Retry(format!("HTTP {} for {}", status, url));
        }

        match response.text().await {
            Ok(body) => Attempt::Done(body),
            Err(e) => Attempt::Retry(e.to_string()),
        }
    }

    /// GETs `url` as text, retrying transient failures with exponential backoff.
    async fn get_text(&self, url: &str) -> std::result::Result<String, String> {
        let mut retries = 0;

        loop {
            tracing::debug!("GET {}", url);
            match self.attempt(url).await {
                Attempt::Done(body) => return Ok(body),
                Attempt::Fatal(message) => return Err(message),
                Attempt::Retry(message) => {
                    retries += 1;
                    if retries >= MAX_RETRIES {
                        return Err(message);
                    }

                    let delay = BASE_DELAY_MS * 2_u64.pow(retries - 1);
                    tracing::warn!(
                        "Request failed ({}), retrying in {}ms ({}/{})",
                        message,
                        delay,
                        retries,
                        MAX_RETRIES
                    );
                    sleep(Duration::from_millis(delay)).await;
                }
            }
        }
    }
}

impl Registry for RemoteRegistry {
    async fn fetch_index(&self) -> Result<RegistryIndex> {
        let body = self
            .get_text(&self.url_for(INDEX_FILE))
            .await
            .map_err(RdsError::RegistryUnavailable)?;
        serde_json::from_str(&body)
            .map_err(|e| RdsError::RegistryUnavailable(format!("invalid index: {}", e)))
    }

    async fn fetch_file(&self, path: &str) -> Result<String> {
        self.get_text(&self.url_for(path))
            .await
            .map_err(|message| RdsError::FetchFailed {
                path: path.to_string(),
                message,
            })
    }
}
