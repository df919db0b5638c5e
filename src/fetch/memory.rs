//! In-memory fetcher with per-URL status, body, delay and failure.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::fetch::{FetchError, FetchResponse, Fetcher};

#[derive(Debug, Clone)]
enum Reply {
    Page { status: u16, body: String },
    Unreachable,
}

#[derive(Debug, Clone)]
struct Entry {
    reply: Reply,
    delay: Option<Duration>,
}

/// Serves registered fragments; everything else answers 404.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    entries: HashMap<String, Entry>,
    requests: Mutex<HashMap<String, usize>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200.
    pub fn with_page(self, url: &str, body: impl Into<String>) -> Self {
        self.with_status(url, 200, body)
    }

    pub fn with_status(mut self, url: &str, status: u16, body: impl Into<String>) -> Self {
        let delay = self.entries.get(url).and_then(|e| e.delay);
        self.entries.insert(
            url.to_string(),
            Entry {
                reply: Reply::Page {
                    status,
                    body: body.into(),
                },
                delay,
            },
        );
        self
    }

    /// Fail the request without a response, like a dropped connection.
    pub fn with_failure(mut self, url: &str) -> Self {
        let delay = self.entries.get(url).and_then(|e| e.delay);
        self.entries.insert(
            url.to_string(),
            Entry {
                reply: Reply::Unreachable,
                delay,
            },
        );
        self
    }

    /// Hold the response for `delay` before answering.
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        let entry = self.entries.entry(url.to_string()).or_insert(Entry {
            reply: Reply::Page {
                status: 404,
                body: "Not Found".to_string(),
            },
            delay: None,
        });
        entry.delay = Some(delay);
        self
    }

    /// How many times `url` was requested.
    pub fn requests(&self, url: &str) -> usize {
        self.requests.lock().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        *self.requests.lock().entry(url.to_string()).or_default() += 1;

        let Some(entry) = self.entries.get(url) else {
            return Ok(FetchResponse::new(404, "Not Found"));
        };
        if let Some(delay) = entry.delay {
            tokio::time::sleep(delay).await;
        }
        match &entry.reply {
            Reply::Page { status, body } => Ok(FetchResponse::new(*status, body.clone())),
            Reply::Unreachable => Err(FetchError::Unreachable(url.to_string())),
        }
    }
}
