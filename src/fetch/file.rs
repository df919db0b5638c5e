//! Filesystem fetcher.
//!
//! # Responsibilities
//! - Map a fragment URL onto a file below the site root
//! - Answer like a static file server: 200, 403 or 404
//!
//! # Design Decisions
//! - Query strings and fragments are ignored
//! - Any `..` component is refused with 403 before touching the disk
//! - Directories answer 404

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::fetch::{Body, FetchError, FetchResponse, Fetcher};

/// Serves fragments from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a URL onto a path under the root, or `None` if it escapes.
    fn locate(&self, url: &str) -> Option<PathBuf> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let relative = Path::new(path.trim_start_matches('/'));

        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(resolved)
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let Some(path) = self.locate(url) else {
            tracing::warn!(url = %url, "Refusing fragment path outside site root");
            return Ok(FetchResponse::new(403, "Forbidden"));
        };

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {
                tracing::debug!(path = ?path, "Reading fragment");
                Ok(FetchResponse::with_body(200, Body::File(path)))
            }
            Ok(_) => Ok(FetchResponse::new(404, "Not Found")),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(FetchResponse::new(404, "Not Found"))
            }
            Err(source) => Err(FetchError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_strips_query_and_leading_slash() {
        let fetcher = FileFetcher::new("/srv/site");
        assert_eq!(
            fetcher.locate("/pages/home.html?v=2#top"),
            Some(PathBuf::from("/srv/site/pages/home.html"))
        );
        assert_eq!(
            fetcher.locate("./pages/about.html"),
            Some(PathBuf::from("/srv/site/pages/about.html"))
        );
    }

    #[test]
    fn test_locate_refuses_parent_components() {
        let fetcher = FileFetcher::new("/srv/site");
        assert_eq!(fetcher.locate("../secret.html"), None);
        assert_eq!(fetcher.locate("pages/../../secret.html"), None);
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FileFetcher::new(dir.path());

        let response = fetcher.fetch("pages/missing.html").await.unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_reads_file_body() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("pages")).unwrap();
        std::fs::write(dir.path().join("pages/home.html"), "<h1>Home</h1>").unwrap();
        let fetcher = FileFetcher::new(dir.path());

        let response = fetcher.fetch("pages/home.html").await.unwrap();
        assert!(response.ok());
        assert_eq!(response.text().await.unwrap(), "<h1>Home</h1>");
    }

    #[tokio::test]
    async fn test_directory_is_404() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("pages")).unwrap();
        let fetcher = FileFetcher::new(dir.path());

        assert_eq!(fetcher.fetch("pages").await.unwrap().status(), 404);
    }
}
