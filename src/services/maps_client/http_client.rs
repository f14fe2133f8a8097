use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use super::types::maps_service_error::MapsServiceError;

#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 2,
            initial_backoff: Duration::from_millis(200),
        }
    }
}

#[derive(Clone)]
pub struct HttpClient {
    config: HttpClientConfig,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, MapsServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                MapsServiceError::NetworkFailure(format!("Failed to build client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// GETs `url` and decodes the body, logging and swallowing any failure.
    /// Lossy wrapper over [`try_fetch_json`](Self::try_fetch_json) for callers
    /// that only care whether data came back.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        match self.try_fetch_json(url).await {
            Ok(data) => Some(data),
            Err(e) => {
                error!("Request to {} failed: {}", redact(url), e);
                None
            }
        }
    }

    /// Like [`fetch_json`](Self::fetch_json) but reports why the request
    /// failed. Transient failures are retried with exponential backoff.
    pub async fn try_fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, MapsServiceError> {
        let mut attempt = 0;

        loop {
            match self.get_once(url).await {
                Ok(data) => return Ok(data),
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    let backoff = backoff_for(self.config.initial_backoff, attempt);
                    attempt += 1;
                    warn!(
                        "Attempt {} to {} failed ({}), retrying in {:?}",
                        attempt,
                        redact(url),
                        e,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, MapsServiceError> {
        debug!("GET {}", redact(url));

        // reqwest errors quote the full URL, key included.
        let resp = self.client.get(url).send().await.map_err(|e| {
            MapsServiceError::NetworkFailure(format!(
                "Failed to send request: {}",
                e.without_url()
            ))
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MapsServiceError::UnexpectedStatus(status));
        }

        let body = resp.bytes().await.map_err(|e| {
            MapsServiceError::NetworkFailure(format!(
                "Failed to get response body: {}",
                e.without_url()
            ))
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            MapsServiceError::MalformedResponse(format!("Failed to parse response body: {}", e))
        })
    }
}

fn backoff_for(initial: Duration, attempt: u32) -> Duration {
    initial.saturating_mul(2u32.saturating_pow(attempt))
}

// The query string carries the API key.
fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
