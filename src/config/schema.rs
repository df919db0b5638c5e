//! Configuration schema definitions.
//!
//! This module defines the complete site configuration: document attachment
//! points, fragment source, navigation policy and the template/route tables.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::navigation::StalePolicy;

/// Root configuration for a routed site.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SiteConfig {
    /// Site name and DOM attachment points.
    #[serde(default)]
    pub site: SiteSection,

    /// Where fragments are fetched from.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Overlapping navigation behaviour.
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Observability settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Named view templates, registered before any route.
    #[serde(default)]
    pub templates: Vec<TemplateConfig>,

    /// Routes binding paths to template names.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// Site identity and DOM attachment points.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteSection {
    /// Appended to every page title.
    pub name: String,

    /// Id of the content container.
    pub container_id: String,

    /// Class of the loading indicator inside the container.
    pub loading_class: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "LandonSoft".to_string(),
            container_id: "main-content".to_string(),
            loading_class: "loading".to_string(),
        }
    }
}

/// Fragment source. At most one of the two may be set.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FetchConfig {
    /// Page URL fragments resolve against (e.g. "http://localhost:8000/").
    pub base_url: Option<String>,

    /// Site root directory on disk.
    pub root_dir: Option<PathBuf>,
}

/// Navigation settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NavigationConfig {
    pub stale_policy: StalePolicy,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// A named view: fragment URL plus optional page title.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TemplateConfig {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// A route path bound to a template name.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Literal path, starting with '/'.
    pub path: String,
    /// Template name, resolved at registration.
    pub template: String,
}

impl SiteConfig {
    /// The portfolio site's built-in pages.
    pub fn portfolio() -> Self {
        const PAGES: &[(&str, &str, &str, Option<&str>)] = &[
            ("/", "home", "pages/home.html", None),
            ("/projects", "projects", "pages/projects.html", Some("Projects")),
            ("/youtube", "youtube", "pages/youtube.html", Some("Videos")),
            ("/about", "about", "pages/about.html", Some("About Me")),
            ("/socialmedia", "socialmedia", "pages/socialmedia.html", Some("Social Media")),
            (
                "/projects/neko-chronicles",
                "projects-neko-chronicles",
                "pages/projects/neko-chronicles.html",
                Some("Neko Chronicles"),
            ),
            (
                "/projects/arm9-editor",
                "projects-arm9-editor",
                "pages/projects/arm9-editor.html",
                Some("MKDS ARM9 Editor"),
            ),
            (
                "/projects/disgaea-ds-manager",
                "projects-disgaea-ds-manager",
                "pages/projects/disgaea-ds-manager.html",
                Some("Disgaea DS Manager"),
            ),
            (
                "/projects/mysims-kart-ds",
                "projects-mysims-kart-ds",
                "pages/projects/mysims-kart-ds.html",
                Some("MySims Kart DS"),
            ),
        ];

        Self {
            templates: PAGES
                .iter()
                .map(|(_, name, url, title)| TemplateConfig {
                    name: name.to_string(),
                    url: url.to_string(),
                    title: title.map(str::to_string),
                })
                .collect(),
            routes: PAGES
                .iter()
                .map(|(path, name, _, _)| RouteConfig {
                    path: path.to_string(),
                    template: name.to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_pages() {
        let config = SiteConfig::portfolio();
        assert_eq!(config.templates.len(), 9);
        assert_eq!(config.routes.len(), 9);
        assert_eq!(config.site.name, "LandonSoft");

        let home = &config.templates[0];
        assert_eq!(home.url, "pages/home.html");
        assert_eq!(home.title, None);
        assert!(config
            .routes
            .iter()
            .any(|r| r.path == "/projects/arm9-editor" && r.template == "projects-arm9-editor"));
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.site.container_id, "main-content");
        assert_eq!(config.navigation.stale_policy, StalePolicy::LastFinishWins);
        assert!(config.templates.is_empty());
        assert!(config.routes.is_empty());
    }
}
