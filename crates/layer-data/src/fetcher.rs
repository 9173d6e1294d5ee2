//! HTTP client abstraction for fetching layer bodies.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use ogc_common::{OgcError, OgcResult};
use reqwest::Client;
use tracing::{debug, instrument};

/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Performs HTTP GET requests.
///
/// Implementations must report network failures, timeouts and non-success
/// statuses as [`OgcError::RemoteFetch`]. Tests substitute mock fetchers.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get(&self, url: &str) -> OgcResult<Bytes>;
}

/// [`HttpFetcher`] backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Client with the default 30 second timeout.
    pub fn new() -> OgcResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> OgcResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("geodash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(client_error)?;

        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    #[instrument(skip(self))]
    async fn get(&self, url: &str) -> OgcResult<Bytes> {
        debug!("Sending request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OgcError::remote_fetch(url, format!("HTTP {}", status)));
        }

        let body = response.bytes().await.map_err(|e| request_error(url, e))?;
        debug!(bytes = body.len(), "Received response");
        Ok(body)
    }
}

fn client_error(err: reqwest::Error) -> OgcError {
    OgcError::HttpClient(err.to_string())
}

fn request_error(url: &str, err: reqwest::Error) -> OgcError {
    if err.is_timeout() {
        OgcError::remote_fetch(url, "request timed out")
    } else {
        OgcError::remote_fetch(url, err.to_string())
    }
}
