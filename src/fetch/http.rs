//! HTTP fetcher.
//!
//! Resolves fragment URLs against a base URL the way a browser resolves
//! them against the page address, then issues a plain GET.

use async_trait::async_trait;
use url::Url;

use crate::fetch::{Body, FetchError, FetchResponse, Fetcher};

/// Fetches fragments over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher rooted at `base_url` (e.g. `http://localhost:8000/`).
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    /// Use a preconfigured client (proxy settings, pooling).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a fragment URL against the base.
    pub fn resolve(&self, url: &str) -> Result<Url, FetchError> {
        self.base_url.join(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let target = self.resolve(url)?;
        tracing::debug!(url = %target, "Fetching fragment");

        let response = self.client.get(target).send().await?;
        let status = response.status().as_u16();
        Ok(FetchResponse::with_body(status, Body::Http(response)))
    }
}
