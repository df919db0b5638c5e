//! Script elements and the host that runs them.
//!
//! # Design Decisions
//! - Elements produced by markup parsing are flagged `parser_inserted` and
//!   never run, mirroring how browsers treat scripts set through `innerHTML`
//! - Only a freshly created element that gets connected to the document runs
//! - Execution is delegated to a [`ScriptHost`]; the document never interprets
//!   script text itself

use parking_lot::Mutex;
use serde::Serialize;

use crate::dom::markup::escape_attribute;

/// A single attribute, kept in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A `<script>` element held by the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptElement {
    attributes: Vec<Attribute>,
    text: String,
    parser_inserted: bool,
}

impl ScriptElement {
    /// Create a fresh, empty script element (the `createElement("script")` case).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an element the way the markup parser does: inert.
    pub(crate) fn parsed(attributes: Vec<Attribute>, text: String) -> Self {
        Self {
            attributes,
            text,
            parser_inserted: true,
        }
    }

    /// Set an attribute, replacing any existing value for the same name.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name,
                value: value.to_string(),
            }),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// True for elements that came from markup parsing and will not run.
    pub fn is_parser_inserted(&self) -> bool {
        self.parser_inserted
    }

    /// Serialize back to markup. Script text is raw and never escaped.
    pub fn to_markup(&self) -> String {
        let mut out = String::from("<script");
        for attr in &self.attributes {
            out.push(' ');
            out.push_str(&attr.name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(&attr.value));
            out.push('"');
        }
        out.push('>');
        out.push_str(&self.text);
        out.push_str("</script>");
        out
    }
}

/// Runs scripts that get connected to the document.
pub trait ScriptHost: Send + Sync {
    fn execute(&self, script: &ScriptElement);
}

/// Keeps every executed script, in execution order.
#[derive(Debug, Default)]
pub struct RecordingScriptHost {
    executed: Mutex<Vec<ScriptElement>>,
}

impl RecordingScriptHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts executed so far.
    pub fn executed(&self) -> Vec<ScriptElement> {
        self.executed.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.executed.lock().len()
    }
}

impl ScriptHost for RecordingScriptHost {
    fn execute(&self, script: &ScriptElement) {
        self.executed.lock().push(script.clone());
    }
}

/// Reports each script through `tracing` instead of running it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingScriptHost;

impl ScriptHost for LoggingScriptHost {
    fn execute(&self, script: &ScriptElement) {
        tracing::info!(
            src = script.attribute("src").unwrap_or("inline"),
            kind = script.attribute("type").unwrap_or("text/javascript"),
            bytes = script.text().len(),
            "Executing script"
        );
    }
}
