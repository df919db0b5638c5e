//! Fragment loading.
//!
//! # Responsibilities
//! - Show loading, fetch, inject, set title, hide loading
//! - Turn every failure into the in-page error panel
//! - Drop results of superseded navigations under `StalePolicy::LatestWins`
//!
//! # Design Decisions
//! - `load` never returns an error; the caller only awaits completion
//! - Staleness is checked after the last suspension point, right before
//!   the document is touched

use std::sync::Arc;

use thiserror::Error;

use crate::dom::{Dom, DomError};
use crate::fetch::{FetchError, Fetcher};
use crate::navigation;
use crate::observability::metrics;
use crate::view::{inject, loading, panels};

/// Reasons a view could not be rendered.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to load page: {0}")]
    Status(u16),

    #[error(transparent)]
    Dom(#[from] DomError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Rendered,
    Stale,
}

/// Loads HTML fragments into the document container.
pub struct ViewLoader {
    dom: Arc<dyn Dom>,
    fetcher: Arc<dyn Fetcher>,
    site_name: String,
}

impl std::fmt::Debug for ViewLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewLoader")
            .field("site_name", &self.site_name)
            .finish_non_exhaustive()
    }
}

impl ViewLoader {
    pub fn new(dom: Arc<dyn Dom>, fetcher: Arc<dyn Fetcher>, site_name: impl Into<String>) -> Self {
        Self {
            dom,
            fetcher,
            site_name: site_name.into(),
        }
    }

    pub fn dom(&self) -> &Arc<dyn Dom> {
        &self.dom
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Fetch `url` and render it, titled `title` when given.
    pub async fn load(&self, url: &str, title: Option<&str>) {
        loading::show(&*self.dom);

        match self.try_load(url, title).await {
            Ok(Outcome::Rendered) => {
                tracing::debug!(url = %url, "View rendered");
                metrics::record_view_load("ok");
            }
            Ok(Outcome::Stale) => {
                tracing::debug!(url = %url, "Discarding view of superseded navigation");
                metrics::record_view_load("stale");
            }
            Err(e) if navigation::is_stale() => {
                tracing::debug!(url = %url, error = %e, "Discarding error of superseded navigation");
                metrics::record_view_load("stale");
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Error loading view");
                metrics::record_view_load("error");
                self.show_error(&e.to_string());
            }
        }
    }

    async fn try_load(&self, url: &str, title: Option<&str>) -> Result<Outcome, ViewError> {
        let response = self.fetcher.fetch(url).await?;
        if !response.ok() {
            return Err(ViewError::Status(response.status()));
        }
        let html = response.text().await?;

        if navigation::is_stale() {
            return Ok(Outcome::Stale);
        }

        inject::set_inner_html(&*self.dom, &html)?;
        self.dom.set_title(&panels::page_title(&self.site_name, title));
        loading::hide(&*self.dom);
        Ok(Outcome::Rendered)
    }

    /// Replace the container with the generic error panel.
    pub fn show_error(&self, message: &str) {
        panels::render_error(&*self.dom, &self.site_name, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, RecordingScriptHost};
    use crate::fetch::MemoryFetcher;

    fn setup(fetcher: MemoryFetcher) -> (Arc<MemoryDocument>, Arc<RecordingScriptHost>, ViewLoader) {
        let host = Arc::new(RecordingScriptHost::new());
        let doc = Arc::new(MemoryDocument::builder().script_host(host.clone()).build());
        let loader = ViewLoader::new(doc.clone(), Arc::new(fetcher), "LandonSoft");
        (doc, host, loader)
    }

    #[tokio::test]
    async fn test_load_renders_fragment_and_title() {
        let (doc, _, loader) = setup(MemoryFetcher::new().with_page("pages/about.html", "<h1>About</h1>"));

        loader.load("pages/about.html", Some("About Me")).await;

        let snapshot = doc.snapshot();
        assert_eq!(snapshot.content, "<h1>About</h1>");
        assert_eq!(snapshot.title, "About Me - LandonSoft");
        let indicator = snapshot.loading_indicator.unwrap();
        assert!(indicator.has_class("hidden"));
        assert_eq!(indicator.attribute("aria-busy"), Some("false"));
    }

    #[tokio::test]
    async fn test_script_runs_exactly_once() {
        let (_, host, loader) = setup(
            MemoryFetcher::new().with_page("pages/x.html", "<script>console.log('x')</script>"),
        );

        loader.load("pages/x.html", None).await;

        assert_eq!(host.count(), 1);
        assert_eq!(host.executed()[0].text(), "console.log('x')");
    }

    #[tokio::test]
    async fn test_error_status_renders_error_panel() {
        let (doc, host, loader) = setup(
            MemoryFetcher::new().with_status("pages/gone.html", 404, "<script>nope()</script>"),
        );

        loader.load("pages/gone.html", Some("Gone")).await;

        let snapshot = doc.snapshot();
        assert!(snapshot.content.contains("Oops! Something went wrong"));
        assert!(snapshot.content.contains("Failed to load page: 404"));
        assert!(!snapshot.content.contains("404 - Page Not Found"));
        assert_eq!(snapshot.title, "Error - LandonSoft");
        assert!(snapshot.loading_indicator.unwrap().has_class("hidden"));
        assert_eq!(host.count(), 0);
    }

    #[tokio::test]
    async fn test_network_failure_renders_error_panel() {
        let (doc, _, loader) = setup(MemoryFetcher::new().with_failure("pages/down.html"));

        loader.load("pages/down.html", None).await;

        let snapshot = doc.snapshot();
        assert!(snapshot.content.contains("Failed to fetch pages/down.html"));
        assert_eq!(snapshot.title, "Error - LandonSoft");
    }

    #[test]
    fn test_status_error_message() {
        assert_eq!(ViewError::Status(500).to_string(), "Failed to load page: 500");
    }
}
