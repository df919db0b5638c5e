//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! router / view loader / document produce:
//!     → logging.rs (structured log events, navigation spans)
//!     → metrics.rs (navigation, view load and script counters)
//! ```
//!
//! # Design Decisions
//! - Structured logging via `tracing`; every navigation gets an id
//! - Metrics are plain `metrics` counters; installing a recorder is left
//!   to the embedding application

pub mod logging;
pub mod metrics;
