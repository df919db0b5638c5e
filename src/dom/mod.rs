//! Document subsystem.
//!
//! # Data Flow
//! ```text
//! fragment markup
//!     → markup.rs (split into markup runs + inert <script> elements)
//!     → memory.rs (container content, title, loading indicator)
//!     → script.rs (fresh elements handed to the ScriptHost)
//! ```
//!
//! # Design Decisions
//! - The engine only talks to the `Dom` trait; `MemoryDocument` is the
//!   bundled implementation
//! - Every operation is a short synchronous step; suspension never happens
//!   inside the document

pub mod markup;
pub mod memory;
pub mod script;

use thiserror::Error;

pub use memory::{DocumentBuilder, DocumentSnapshot, Indicator, MemoryDocument};
pub use script::{Attribute, LoggingScriptHost, RecordingScriptHost, ScriptElement, ScriptHost};

/// Errors raised by document mutation.
#[derive(Debug, Error)]
pub enum DomError {
    /// The container no longer holds a script at this position.
    #[error("no script element at index {index}")]
    NoSuchScript { index: usize },
}

/// The page surface the router renders into.
///
/// One content container, an optional loading indicator and the title.
pub trait Dom: Send + Sync {
    /// Replace the container markup. Scripts inside it do not run.
    fn set_inner_html(&self, html: &str);

    fn inner_html(&self) -> String;

    /// Script elements currently in the container, in document order.
    fn scripts(&self) -> Vec<ScriptElement>;

    /// Swap the `index`-th script for `script`. A fresh (not parser-inserted)
    /// element runs once when connected.
    fn replace_script(&self, index: usize, script: ScriptElement) -> Result<(), DomError>;

    fn title(&self) -> String;

    fn set_title(&self, title: &str);

    fn has_loading_indicator(&self) -> bool;

    /// Add or remove a class on the loading indicator; no-op without one.
    fn set_indicator_class(&self, class: &str, present: bool);

    /// Set an attribute on the loading indicator; no-op without one.
    fn set_indicator_attribute(&self, name: &str, value: &str);
}
