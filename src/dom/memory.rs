//! In-memory document.
//!
//! Holds the content container, an optional loading indicator and the
//! document title. Script elements connected through [`Dom::replace_script`]
//! are handed to the configured [`ScriptHost`] after the document lock is
//! released, so a script may call back into the document.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::config::SiteSection;
use crate::dom::markup::{self, Node};
use crate::dom::script::{Attribute, LoggingScriptHost, ScriptElement, ScriptHost};
use crate::dom::{Dom, DomError};
use crate::observability::metrics;

/// Loading indicator element state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub classes: Vec<String>,
    pub attributes: Vec<Attribute>,
}

impl Indicator {
    fn new(class: &str) -> Self {
        Self {
            classes: vec![class.to_string()],
            attributes: vec![Attribute {
                name: "aria-busy".to_string(),
                value: "true".to_string(),
            }],
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// Point-in-time copy of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSnapshot {
    pub title: String,
    pub container_id: String,
    pub content: String,
    pub loading_indicator: Option<Indicator>,
}

struct State {
    title: String,
    nodes: Vec<Node>,
    indicator: Option<Indicator>,
}

/// A [`Dom`] kept entirely in memory.
pub struct MemoryDocument {
    container_id: String,
    state: Mutex<State>,
    host: Arc<dyn ScriptHost>,
}

impl std::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("container_id", &self.container_id)
            .finish_non_exhaustive()
    }
}

impl MemoryDocument {
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Copy the current title, container markup and indicator state.
    pub fn snapshot(&self) -> DocumentSnapshot {
        let state = self.state.lock();
        DocumentSnapshot {
            title: state.title.clone(),
            container_id: self.container_id.clone(),
            content: markup::serialize(&state.nodes),
            loading_indicator: state.indicator.clone(),
        }
    }

    pub fn loading_indicator(&self) -> Option<Indicator> {
        self.state.lock().indicator.clone()
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }
}

impl Dom for MemoryDocument {
    fn set_inner_html(&self, html: &str) {
        self.state.lock().nodes = markup::parse_fragment(html);
    }

    fn inner_html(&self) -> String {
        markup::serialize(&self.state.lock().nodes)
    }

    fn scripts(&self) -> Vec<ScriptElement> {
        self.state
            .lock()
            .nodes
            .iter()
            .filter_map(|node| match node {
                Node::Script(script) => Some(script.clone()),
                Node::Markup(_) => None,
            })
            .collect()
    }

    fn replace_script(&self, index: usize, script: ScriptElement) -> Result<(), DomError> {
        {
            let mut state = self.state.lock();
            let slot = state
                .nodes
                .iter_mut()
                .filter_map(|node| match node {
                    Node::Script(existing) => Some(existing),
                    Node::Markup(_) => None,
                })
                .nth(index)
                .ok_or(DomError::NoSuchScript { index })?;
            *slot = script.clone();
        }

        if !script.is_parser_inserted() {
            metrics::record_script_executed();
            self.host.execute(&script);
        }
        Ok(())
    }

    fn title(&self) -> String {
        self.state.lock().title.clone()
    }

    fn set_title(&self, title: &str) {
        self.state.lock().title = title.to_string();
    }

    fn has_loading_indicator(&self) -> bool {
        self.state.lock().indicator.is_some()
    }

    fn set_indicator_class(&self, class: &str, present: bool) {
        let mut state = self.state.lock();
        let Some(indicator) = state.indicator.as_mut() else {
            return;
        };
        let has = indicator.has_class(class);
        if present && !has {
            indicator.classes.push(class.to_string());
        } else if !present && has {
            indicator.classes.retain(|c| c != class);
        }
    }

    fn set_indicator_attribute(&self, name: &str, value: &str) {
        let mut state = self.state.lock();
        let Some(indicator) = state.indicator.as_mut() else {
            return;
        };
        match indicator.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => indicator.attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Builder for [`MemoryDocument`].
pub struct DocumentBuilder {
    container_id: String,
    loading_class: Option<String>,
    title: String,
    content: String,
    host: Arc<dyn ScriptHost>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self {
            container_id: "main-content".to_string(),
            loading_class: Some("loading".to_string()),
            title: String::new(),
            content: String::new(),
            host: Arc::new(LoggingScriptHost),
        }
    }
}

impl DocumentBuilder {
    /// Take container id and indicator class from the site section.
    pub fn site(mut self, site: &SiteSection) -> Self {
        self.container_id = site.container_id.clone();
        self.loading_class = Some(site.loading_class.clone());
        self.title = site.name.clone();
        self
    }

    pub fn container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    /// Attach a loading indicator carrying `class`. It starts visible and busy.
    pub fn loading_indicator(mut self, class: impl Into<String>) -> Self {
        self.loading_class = Some(class.into());
        self
    }

    pub fn without_loading_indicator(mut self) -> Self {
        self.loading_class = None;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial container markup. Scripts in it stay inert.
    pub fn content(mut self, html: impl Into<String>) -> Self {
        self.content = html.into();
        self
    }

    pub fn script_host(mut self, host: Arc<dyn ScriptHost>) -> Self {
        self.host = host;
        self
    }

    pub fn build(self) -> MemoryDocument {
        MemoryDocument {
            container_id: self.container_id,
            state: Mutex::new(State {
                title: self.title,
                nodes: markup::parse_fragment(&self.content),
                indicator: self.loading_class.as_deref().map(Indicator::new),
            }),
            host: self.host,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::script::RecordingScriptHost;

    fn document(host: Arc<RecordingScriptHost>) -> MemoryDocument {
        MemoryDocument::builder().script_host(host).build()
    }

    #[test]
    fn test_parsed_scripts_do_not_run() {
        let host = Arc::new(RecordingScriptHost::new());
        let doc = document(host.clone());

        doc.set_inner_html("<script>run()</script>");

        assert_eq!(doc.scripts().len(), 1);
        assert_eq!(host.count(), 0);
    }

    #[test]
    fn test_replacing_with_fresh_script_runs_it_once() {
        let host = Arc::new(RecordingScriptHost::new());
        let doc = document(host.clone());
        doc.set_inner_html("<p>a</p><script>run()</script>");

        let mut fresh = ScriptElement::new();
        fresh.set_text("run()");
        doc.replace_script(0, fresh).unwrap();

        assert_eq!(host.count(), 1);
        assert_eq!(doc.inner_html(), "<p>a</p><script>run()</script>");
    }

    #[test]
    fn test_replacing_missing_index_fails() {
        let doc = document(Arc::new(RecordingScriptHost::new()));
        doc.set_inner_html("<p>no scripts</p>");

        let err = doc.replace_script(0, ScriptElement::new()).unwrap_err();
        assert!(matches!(err, DomError::NoSuchScript { index: 0 }));
    }

    #[test]
    fn test_indicator_starts_visible_and_busy() {
        let doc = MemoryDocument::builder().loading_indicator("loading").build();
        let indicator = doc.loading_indicator().unwrap();

        assert!(indicator.has_class("loading"));
        assert!(!indicator.has_class("hidden"));
        assert_eq!(indicator.attribute("aria-busy"), Some("true"));
    }

    #[test]
    fn test_indicator_class_toggle_is_idempotent() {
        let doc = MemoryDocument::builder().build();
        doc.set_indicator_class("hidden", true);
        doc.set_indicator_class("hidden", true);

        let indicator = doc.loading_indicator().unwrap();
        assert_eq!(indicator.classes, vec!["loading", "hidden"]);

        doc.set_indicator_class("hidden", false);
        assert!(!doc.loading_indicator().unwrap().has_class("hidden"));
    }

    #[test]
    fn test_builder_container_and_initial_content() {
        let host = Arc::new(RecordingScriptHost::new());
        let doc = MemoryDocument::builder()
            .container_id("app")
            .content("<p>boot</p><script>init()</script>")
            .script_host(host.clone())
            .build();

        let snapshot = doc.snapshot();
        assert_eq!(doc.container_id(), "app");
        assert_eq!(snapshot.container_id, "app");
        assert_eq!(snapshot.content, "<p>boot</p><script>init()</script>");
        assert_eq!(doc.scripts().len(), 1);
        assert_eq!(host.count(), 0);
    }

    #[test]
    fn test_missing_indicator_is_ignored() {
        let doc = MemoryDocument::builder().without_loading_indicator().build();
        doc.set_indicator_class("hidden", true);
        doc.set_indicator_attribute("aria-busy", "false");

        assert!(!doc.has_loading_indicator());
        assert!(doc.snapshot().loading_indicator.is_none());
    }
}
