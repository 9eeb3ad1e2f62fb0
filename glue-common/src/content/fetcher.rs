//! Remote fetcher: one outbound read per section
//!
//! [`HttpFetcher`] reads `GET {base_url}/api/sections/{name}` from the
//! backend-of-record through a [`ResponseCache`]. Timeouts are the transport's
//! job and surface as [`FetchError::Network`].

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::cache::{CacheDirective, ResponseCache};

const USER_AGENT: &str = concat!("glue-content/", env!("CARGO_PKG_VERSION"));

/// Remote read failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The call could not complete (connect, timeout, unreadable body)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("Backend returned status {0}")]
    NonSuccessStatus(u16),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network_error",
            FetchError::NonSuccessStatus(_) => "non_success_status",
        }
    }
}

/// Raw backend payload and the status it arrived with
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

/// Outbound read against the backend-of-record
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    async fn fetch(
        &self,
        section: &str,
        directive: &CacheDirective,
    ) -> Result<RawResponse, FetchError>;
}

/// reqwest-backed [`RemoteFetcher`]
pub struct HttpFetcher {
    http_client: reqwest::Client,
    base_url: String,
    cache: Arc<dyn ResponseCache>,
}

impl HttpFetcher {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        cache: Arc<dyn ResponseCache>,
    ) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
        })
    }

    pub fn section_url(&self, section: &str) -> String {
        format!("{}/api/sections/{}", self.base_url, section)
    }
}

#[async_trait]
impl RemoteFetcher for HttpFetcher {
    async fn fetch(
        &self,
        section: &str,
        directive: &CacheDirective,
    ) -> Result<RawResponse, FetchError> {
        let key = directive.cache_key(section);
        if let Some(cached) = self.cache.get(&key) {
            debug!(section = %section, "Serving section from response cache");
            return Ok(RawResponse {
                status: 200,
                body: (*cached).clone(),
            });
        }

        let url = self.section_url(section);
        debug!(section = %section, url = %url, "Fetching section from backend");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::NonSuccessStatus(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Network(format!("Unreadable body: {}", e)))?;

        self.cache.put(&key, body.clone(), directive);

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
