//! Route handlers and registration targets.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::view::ViewLoader;

type HandlerFn = dyn Fn() -> BoxFuture<'static, ()> + Send + Sync;

/// A zero-argument async action that renders a view.
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self(Arc::new(move || f().boxed()))
    }

    /// Handler that loads `url` through `loader`, titled `title`.
    pub fn view(loader: Arc<ViewLoader>, url: impl Into<String>, title: Option<&str>) -> Self {
        let url: Arc<str> = url.into().into();
        let title: Option<Arc<str>> = title.map(Arc::from);
        Self::new(move || {
            let loader = loader.clone();
            let url = url.clone();
            let title = title.clone();
            async move { loader.load(&url, title.as_deref()).await }
        })
    }

    /// Start the action.
    pub fn call(&self) -> BoxFuture<'static, ()> {
        (self.0)()
    }

    /// True when both handles point at the same action.
    pub fn same_as(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// What a route is bound to at registration.
#[derive(Debug, Clone)]
pub enum RouteTarget {
    Handler(Handler),
    /// Name of a template registered earlier.
    Template(String),
}

impl From<Handler> for RouteTarget {
    fn from(handler: Handler) -> Self {
        RouteTarget::Handler(handler)
    }
}

impl From<&str> for RouteTarget {
    fn from(name: &str) -> Self {
        RouteTarget::Template(name.to_string())
    }
}

impl From<String> for RouteTarget {
    fn from(name: String) -> Self {
        RouteTarget::Template(name)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_handler_runs_on_each_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handler = Handler::new(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        handler.call().await;
        handler.clone().call().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clones_share_identity() {
        let handler = Handler::new(|| async {});
        let other = Handler::new(|| async {});

        assert!(handler.same_as(&handler.clone()));
        assert!(!handler.same_as(&other));
    }

    #[test]
    fn test_target_conversions() {
        assert!(matches!(RouteTarget::from("home"), RouteTarget::Template(n) if n == "home"));
        assert!(matches!(
            RouteTarget::from(Handler::new(|| async {})),
            RouteTarget::Handler(_)
        ));
    }
}
