//! Fragment fetching subsystem.
//!
//! # Data Flow
//! ```text
//! ViewLoader::load(url)
//!     → Fetcher::fetch(url)          (first suspension: status known)
//!     → FetchResponse::text()        (second suspension: body read)
//! ```
//!
//! # Design Decisions
//! - A non-2xx status is NOT an error here; the caller decides
//! - The body is read lazily so an error status never pays for its body
//! - No retries, no timeouts

pub mod file;
pub mod http;
pub mod memory;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileFetcher;
pub use http::HttpFetcher;
pub use memory::MemoryFetcher;

/// Errors that prevent a response from being produced or read.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid fragment URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to fetch: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fetcher could not reach the resource at all.
    #[error("Failed to fetch {0}")]
    Unreachable(String),
}

pub(crate) enum Body {
    Ready(String),
    Http(reqwest::Response),
    File(PathBuf),
}

/// A fetched response whose body has not been read yet.
pub struct FetchResponse {
    status: u16,
    body: Body,
}

impl std::fmt::Debug for FetchResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl FetchResponse {
    /// A response with an in-memory body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Body::Ready(body.into()),
        }
    }

    pub(crate) fn with_body(status: u16, body: Body) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// True for 2xx statuses.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Read the body as text.
    pub async fn text(self) -> Result<String, FetchError> {
        match self.body {
            Body::Ready(text) => Ok(text),
            Body::Http(response) => Ok(response.text().await?),
            Body::File(path) => tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| FetchError::Io { path, source }),
        }
    }
}

/// Performs GET requests for fragment URLs.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}
