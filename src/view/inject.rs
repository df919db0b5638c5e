//! Safe injection: set container markup, then materialize its scripts.
//!
//! Markup set through the container never runs its scripts. Each script is
//! rebuilt as a fresh element (attributes and text copied verbatim) and
//! swapped in, which makes the document run it exactly once, in document
//! order.

use crate::dom::{Dom, DomError, ScriptElement};

/// Inject `html` and run its scripts. Returns how many scripts ran.
pub fn set_inner_html(dom: &dyn Dom, html: &str) -> Result<usize, DomError> {
    dom.set_inner_html(html);
    materialize_scripts(dom)
}

/// Replace every script in the container with a fresh copy.
pub fn materialize_scripts(dom: &dyn Dom) -> Result<usize, DomError> {
    let scripts = dom.scripts();
    for (index, old) in scripts.iter().enumerate() {
        let mut fresh = ScriptElement::new();
        for attr in old.attributes() {
            fresh.set_attribute(&attr.name, &attr.value);
        }
        fresh.set_text(old.text());
        dom.replace_script(index, fresh)?;
    }
    Ok(scripts.len())
}
