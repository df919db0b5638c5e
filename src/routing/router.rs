//! Route table and navigation.
//!
//! # Responsibilities
//! - Store templates and routes (written during setup only)
//! - Resolve a hash to a handler, or render the 404 panel
//! - Turn a stream of navigation events into overlapping navigations
//!
//! # Design Decisions
//! - Template references are resolved at registration; a route naming a
//!   template that does not exist yet binds nothing
//! - The router never fetches; handlers do
//! - No cancellation: every event runs to completion

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::SiteConfig;
use crate::dom::Dom;
use crate::navigation::{self, NavigationClock, StalePolicy, Ticket};
use crate::observability::metrics;
use crate::routing::events::NavigationEvent;
use crate::routing::handler::{Handler, RouteTarget};
use crate::routing::hash::path_from_hash;
use crate::view::{panels, ViewLoader};

/// Result of resolving one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// A handler was found and ran to completion.
    Dispatched,
    /// No route matched; the 404 panel is shown.
    NotFound,
}

/// Hash router owning the template and route tables.
pub struct Router {
    routes: HashMap<String, Handler>,
    templates: HashMap<String, Handler>,
    dom: Arc<dyn Dom>,
    site_name: String,
    policy: StalePolicy,
    clock: NavigationClock,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.route_paths())
            .field("templates", &self.templates.len())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Create an empty router rendering its 404 panel into `dom`.
    pub fn new(dom: Arc<dyn Dom>, site_name: impl Into<String>) -> Self {
        Self {
            routes: HashMap::new(),
            templates: HashMap::new(),
            dom,
            site_name: site_name.into(),
            policy: StalePolicy::default(),
            clock: NavigationClock::new(),
        }
    }

    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build a router from a site config: every template becomes a view
    /// handler on `loader`, then routes bind to templates, in file order.
    pub fn from_config(config: &SiteConfig, loader: Arc<ViewLoader>) -> Self {
        let mut router = Router::new(loader.dom().clone(), loader.site_name())
            .with_stale_policy(config.navigation.stale_policy);

        for template in &config.templates {
            router.register_template(
                &template.name,
                Handler::view(loader.clone(), &template.url, template.title.as_deref()),
            );
        }
        for route in &config.routes {
            router.register_route(&route.path, route.template.as_str());
        }

        tracing::info!(
            templates = router.templates.len(),
            routes = router.routes.len(),
            policy = ?router.policy,
            "Routes configured"
        );
        router
    }

    /// Store `handler` under `name`, replacing any previous template.
    pub fn register_template(&mut self, name: impl Into<String>, handler: Handler) -> &mut Self {
        self.templates.insert(name.into(), handler);
        self
    }

    /// Bind `path` to a handler, or to the handler a template holds right now.
    pub fn register_route(&mut self, path: impl Into<String>, target: impl Into<RouteTarget>) -> &mut Self {
        let path = path.into();
        match target.into() {
            RouteTarget::Handler(handler) => {
                self.routes.insert(path, handler);
            }
            RouteTarget::Template(name) => match self.templates.get(&name) {
                Some(handler) => {
                    self.routes.insert(path, handler.clone());
                }
                None => {
                    tracing::debug!(path = %path, template = %name, "Template not registered; route left unbound");
                }
            },
        }
        self
    }

    pub fn resolve(&self, path: &str) -> Option<&Handler> {
        self.routes.get(path)
    }

    pub fn template(&self, name: &str) -> Option<&Handler> {
        self.templates.get(name)
    }

    /// Registered route paths, sorted.
    pub fn route_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn stale_policy(&self) -> StalePolicy {
        self.policy
    }

    /// Resolve `hash` and run its handler, or show the 404 panel.
    pub async fn navigate(&self, hash: &str) -> NavigationOutcome {
        let ticket = self.issue_ticket();
        self.dispatch(hash, ticket).await
    }

    /// Draw the next ticket when stale results are discarded.
    fn issue_ticket(&self) -> Option<Ticket> {
        match self.policy {
            StalePolicy::LatestWins => Some(self.clock.issue()),
            StalePolicy::LastFinishWins => None,
        }
    }

    async fn dispatch(&self, hash: &str, ticket: Option<Ticket>) -> NavigationOutcome {
        let path = path_from_hash(hash);
        let navigation_id = Uuid::new_v4();

        tracing::info!(navigation_id = %navigation_id, path = %path, "Navigating");

        match self.routes.get(path) {
            Some(handler) => {
                let span = tracing::info_span!("navigation", id = %navigation_id, path = %path);
                navigation::scope(ticket, handler.call()).instrument(span).await;
                metrics::record_navigation("dispatched");
                NavigationOutcome::Dispatched
            }
            None => {
                tracing::warn!(navigation_id = %navigation_id, path = %path, "No route matched");
                self.show_not_found();
                metrics::record_navigation("not_found");
                NavigationOutcome::NotFound
            }
        }
    }

    /// Replace the container with the 404 panel.
    pub fn show_not_found(&self) {
        panels::render_not_found(&*self.dom, &self.site_name);
    }

    /// Navigate on every event until the channel closes, then wait for
    /// navigations still in flight.
    pub async fn listen(self: Arc<Self>, mut events: mpsc::UnboundedReceiver<NavigationEvent>) {
        let mut in_flight = JoinSet::new();
        tracing::info!("Router initialized");

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    tracing::debug!(kind = event.kind(), hash = %event.hash(), "Navigation event");
                    // Tickets follow event order, not task start order.
                    let ticket = self.issue_ticket();
                    let router = self.clone();
                    in_flight.spawn(async move { router.dispatch(event.hash(), ticket).await });
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    log_join(joined);
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            log_join(joined);
        }
        tracing::info!("Navigation events closed");
    }
}

fn log_join(joined: Result<NavigationOutcome, tokio::task::JoinError>) {
    if let Err(e) = joined {
        tracing::error!(error = %e, "Navigation task failed");
    }
}
