//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! site.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//!     → Router::from_config / MemoryDocument builder
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; route tables never change afterwards
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    FetchConfig, NavigationConfig, ObservabilityConfig, RouteConfig, SiteConfig, SiteSection,
    TemplateConfig,
};
pub use validation::{validate_config, ValidationError};
