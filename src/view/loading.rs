//! Loading indicator state.

use crate::dom::Dom;

pub const HIDDEN_CLASS: &str = "hidden";

/// Show the indicator and mark it busy.
pub fn show(dom: &dyn Dom) {
    dom.set_indicator_class(HIDDEN_CLASS, false);
    dom.set_indicator_attribute("aria-busy", "true");
}

/// Hide the indicator and clear busy.
pub fn hide(dom: &dyn Dom) {
    dom.set_indicator_class(HIDDEN_CLASS, true);
    dom.set_indicator_attribute("aria-busy", "false");
}
