//! Config files and on-disk site roots.

use std::fs;
use std::sync::Arc;

use hash_router::config::{load_config, ConfigError, ValidationError};
use hash_router::fetch::FileFetcher;
use hash_router::{Dom, Router, StalePolicy};

mod common;

const CONFIG: &str = r#"
[site]
name = "Example"

[navigation]
stale_policy = "latest_wins"

[[templates]]
name = "home"
url = "pages/home.html"

[[templates]]
name = "secret"
url = "../outside.html"
title = "Secret"

[[routes]]
path = "/"
template = "home"

[[routes]]
path = "/secret"
template = "secret"

[[routes]]
path = "/later"
template = "defined-later"

[[templates]]
name = "defined-later"
url = "pages/home.html"
"#;

#[tokio::test]
async fn test_config_and_file_root() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("pages")).unwrap();
    fs::write(dir.path().join("pages/home.html"), "<h1>Example</h1>").unwrap();
    fs::write(dir.path().join("site.toml"), CONFIG).unwrap();

    let config = load_config(&dir.path().join("site.toml")).unwrap();
    assert_eq!(config.navigation.stale_policy, StalePolicy::LatestWins);

    let page = common::page(Arc::new(FileFetcher::new(dir.path())));
    let router = Router::from_config(&config, page.loader.clone());
    assert_eq!(router.stale_policy(), StalePolicy::LatestWins);

    router.navigate("").await;
    assert_eq!(page.document.inner_html(), "<h1>Example</h1>");
    // The router takes its site name from the loader.
    assert_eq!(page.document.title(), "LandonSoft");

    router.navigate("#/secret").await;
    assert!(page.document.inner_html().contains("Failed to load page: 403"));

    // Templates are registered before routes regardless of file order.
    assert!(router.resolve("/later").is_some());
}

#[test]
fn test_invalid_config_file_lists_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.toml");
    fs::write(
        &path,
        r#"
[[templates]]
name = "home"
url = "pages/home.html"

[[templates]]
name = "home"
url = "pages/other.html"

[[routes]]
path = "home"
template = "home"
"#,
    )
    .unwrap();

    match load_config(&path) {
        Err(ConfigError::Validation(errors)) => assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateTemplate("home".into()),
                ValidationError::RelativeRoutePath("home".into()),
            ]
        ),
        other => panic!("expected validation errors, got {other:?}"),
    }
}
