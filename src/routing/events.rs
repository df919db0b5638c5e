//! Navigation events fed to [`Router::listen`](crate::routing::Router::listen).

/// A page event that triggers route resolution. Both kinds resolve the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Initial document load, with the hash the page was opened at.
    Load { hash: String },
    /// The URL hash changed.
    HashChange { hash: String },
}

impl NavigationEvent {
    pub fn load(hash: impl Into<String>) -> Self {
        NavigationEvent::Load { hash: hash.into() }
    }

    pub fn hash_change(hash: impl Into<String>) -> Self {
        NavigationEvent::HashChange { hash: hash.into() }
    }

    pub fn hash(&self) -> &str {
        match self {
            NavigationEvent::Load { hash } | NavigationEvent::HashChange { hash } => hash,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            NavigationEvent::Load { .. } => "load",
            NavigationEvent::HashChange { .. } => "hashchange",
        }
    }
}
