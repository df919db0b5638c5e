//! Hash-driven fragment router.
//!
//! Maps URL hash fragments to named templates that fetch an HTML fragment
//! and inject it into the page container, re-running embedded scripts and
//! maintaining loading, error and 404 states.

pub mod config;
pub mod dom;
pub mod fetch;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod view;

pub use config::SiteConfig;
pub use dom::{Dom, MemoryDocument};
pub use fetch::Fetcher;
pub use navigation::StalePolicy;
pub use routing::{Handler, NavigationEvent, Router};
pub use view::ViewLoader;
