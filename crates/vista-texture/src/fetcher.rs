//! Network byte source.

use std::time::Duration;

use async_trait::async_trait;
use vista_common::AcquisitionError;

/// Fetches raw image bytes. Behind a trait so tests can substitute
/// hanging or counting fetchers.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AcquisitionError>;
}

/// `reqwest`-backed fetcher. Overall timeouts are applied by the strategies.
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("vista/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("HTTP client builder failed, using defaults: {e}");
                reqwest::Client::new()
            });
        Self { http }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AcquisitionError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AcquisitionError::Failure(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AcquisitionError::Failure(format!("HTTP {status} for {url}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AcquisitionError::Failure(format!("body read failed: {e}")))?;
        tracing::debug!(url, bytes = bytes.len(), "Fetched image bytes");
        Ok(bytes.to_vec())
    }
}
