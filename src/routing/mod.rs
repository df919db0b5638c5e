//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! NavigationEvent (load / hashchange)
//!     → events.rs
//!     → router.rs (listen → navigate)
//!     → hash.rs (hash → path, empty → "/")
//!     → route table lookup
//!     → handler.rs (Handler runs, usually ViewLoader::load)
//!       or 404 panel
//!
//! Setup:
//!     templates registered (name → Handler)
//!     → routes registered (path → Handler | template name)
//!     → template names resolved immediately
//!     → tables frozen behind Arc<Router>
//! ```
//!
//! # Design Decisions
//! - Exact path lookup only; no parameters, nesting or query parsing
//! - Tables are written through `&mut Router` and read through `&Router`

pub mod events;
pub mod handler;
pub mod hash;
pub mod router;

pub use events::NavigationEvent;
pub use handler::{Handler, RouteTarget};
pub use hash::path_from_hash;
pub use router::{NavigationOutcome, Router};
