//! Navigation tickets and the stale-result policy.
//!
//! Every navigation may carry a [`Ticket`] drawn from a shared
//! [`NavigationClock`]. The ticket lives in a task-local for as long as the
//! route handler runs, so the view loader can ask whether a newer navigation
//! has started without the handler passing anything along.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

tokio::task_local! {
    static CURRENT: Ticket;
}

/// Which result survives when navigations overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Whatever finishes last is displayed.
    #[default]
    LastFinishWins,
    /// Only the most recently started navigation may touch the document.
    LatestWins,
}

/// Generation number of one navigation.
#[derive(Debug, Clone)]
pub struct Ticket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl Ticket {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True once a newer ticket has been issued.
    pub fn is_superseded(&self) -> bool {
        self.latest.load(Ordering::Acquire) != self.id
    }
}

/// Issues monotonically increasing tickets.
#[derive(Debug, Default)]
pub struct NavigationClock {
    latest: Arc<AtomicU64>,
}

impl NavigationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        let id = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        Ticket {
            id,
            latest: self.latest.clone(),
        }
    }
}

/// Run `fut` with `ticket` as the current navigation, if any.
pub async fn scope<F: Future>(ticket: Option<Ticket>, fut: F) -> F::Output {
    match ticket {
        Some(ticket) => CURRENT.scope(ticket, fut).await,
        None => fut.await,
    }
}

/// Whether the navigation running on this task has been superseded.
/// Work outside any ticketed navigation is never stale.
pub fn is_stale() -> bool {
    CURRENT.try_with(Ticket::is_superseded).unwrap_or(false)
}
