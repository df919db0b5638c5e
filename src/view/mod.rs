//! View rendering subsystem.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → loader.rs (show loading, fetch, check status)
//!     → inject.rs (set markup, materialize scripts)
//!     → panels.rs (title; error / 404 panels on failure)
//!     → loading.rs (hide indicator)
//! ```

pub mod inject;
pub mod loader;
pub mod loading;
pub mod panels;

pub use loader::{ViewError, ViewLoader};
pub use panels::page_title;
