//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check names and URLs are non-empty
//! - Check route paths are literal absolute paths
//! - Detect duplicate templates and routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Routes naming unknown templates are accepted: they stay unbound at
//!   registration, which is how the router treats them

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::SiteConfig;

/// A single semantic problem in a site config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("site name must not be empty")]
    EmptySiteName,

    #[error("template #{index} has an empty name")]
    EmptyTemplateName { index: usize },

    #[error("template '{0}' has an empty url")]
    EmptyTemplateUrl(String),

    #[error("template '{0}' is defined more than once")]
    DuplicateTemplate(String),

    #[error("route path '{0}' must start with '/'")]
    RelativeRoutePath(String),

    #[error("route '{0}' is defined more than once")]
    DuplicateRoute(String),

    #[error("fetch.base_url and fetch.root_dir are mutually exclusive")]
    ConflictingFetchSources,
}

/// Validate a site config, collecting every problem.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.site.name.trim().is_empty() {
        errors.push(ValidationError::EmptySiteName);
    }

    if config.fetch.base_url.is_some() && config.fetch.root_dir.is_some() {
        errors.push(ValidationError::ConflictingFetchSources);
    }

    let mut templates = HashSet::new();
    for (index, template) in config.templates.iter().enumerate() {
        if template.name.is_empty() {
            errors.push(ValidationError::EmptyTemplateName { index });
            continue;
        }
        if template.url.trim().is_empty() {
            errors.push(ValidationError::EmptyTemplateUrl(template.name.clone()));
        }
        if !templates.insert(template.name.as_str()) {
            errors.push(ValidationError::DuplicateTemplate(template.name.clone()));
        }
    }

    let mut paths = HashSet::new();
    for route in &config.routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativeRoutePath(route.path.clone()));
        }
        if !paths.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.path.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
