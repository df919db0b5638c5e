//! Fragment markup scanning.
//!
//! # Responsibilities
//! - Split an HTML fragment into opaque markup runs and `<script>` elements
//! - Keep comments opaque so commented-out scripts never run
//! - Parse script attributes
//! - Serialize the node list back to markup
//!
//! # Design Decisions
//! - Only script elements are structured; everything else stays verbatim
//! - An unterminated `<script>` swallows the rest of the fragment as its text,
//!   the same way an HTML parser treats raw text elements
//! - Attribute names are lowercased, first occurrence wins on duplicates

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::script::{Attribute, ScriptElement};

// A comment (opaque, possibly unterminated) or a script start tag. The tag
// name must end at whitespace, `/` or `>`, and quoted values may hold `>`.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)(?P<comment><!--.*?(?:-->|\z))|<script(?P<attrs>(?:\s+[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'=<>`]+))?|\s*/)*)\s*>"#,
    )
    .expect("valid markup token regex")
});

static SCRIPT_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</script\s*>").expect("valid script close regex"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("valid attribute regex")
});

/// A top-level piece of container content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Markup(String),
    Script(ScriptElement),
}

/// Split a fragment into markup runs and (inert) script elements.
///
/// Comments stay part of the surrounding markup, including any script tags
/// written inside them.
pub fn parse_fragment(html: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut markup_start = 0;
    let mut cursor = 0;

    while let Some(token) = TOKEN.captures_at(html, cursor) {
        let Some(tag) = token.get(0) else { break };
        if token.name("comment").is_some() {
            cursor = tag.end();
            continue;
        }

        if tag.start() > markup_start {
            nodes.push(Node::Markup(html[markup_start..tag.start()].to_string()));
        }

        let attributes = parse_attributes(token.name("attrs").map_or("", |m| m.as_str()));
        let body = &html[tag.end()..];
        let (text, end) = match SCRIPT_CLOSE.find(body) {
            Some(close) => (&body[..close.start()], tag.end() + close.end()),
            None => (body, html.len()),
        };

        nodes.push(Node::Script(ScriptElement::parsed(attributes, text.to_string())));
        markup_start = end;
        cursor = end;
    }

    if markup_start < html.len() {
        nodes.push(Node::Markup(html[markup_start..].to_string()));
    }
    nodes
}

/// Serialize nodes back into a markup string.
pub fn serialize(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| match node {
            Node::Markup(markup) => markup.clone(),
            Node::Script(script) => script.to_markup(),
        })
        .collect()
}

fn parse_attributes(source: &str) -> Vec<Attribute> {
    let mut attributes: Vec<Attribute> = Vec::new();
    for caps in ATTRIBUTE.captures_iter(source) {
        let Some(name) = caps.get(1) else { continue };
        let name = name.as_str().to_ascii_lowercase();
        if attributes.iter().any(|a| a.name == name) {
            continue;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| unescape_attribute(m.as_str()))
            .unwrap_or_default();
        attributes.push(Attribute { name, value });
    }
    attributes
}

/// Escape text for use inside a double-quoted attribute value.
pub fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Escape text for use as element content.
pub fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape_attribute(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
