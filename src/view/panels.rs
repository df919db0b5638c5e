//! Titles and the built-in error and 404 panels.

use crate::dom::markup::escape_text;
use crate::dom::Dom;
use crate::view::{inject, loading};

pub const ERROR_TITLE: &str = "Error";
pub const NOT_FOUND_TITLE: &str = "Page Not Found";

/// `"<title> - <site>"`, or the bare site name without a page title.
pub fn page_title(site_name: &str, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("{title} - {site_name}"),
        None => site_name.to_string(),
    }
}

pub fn error_panel(message: &str) -> String {
    format!(
        r##"<div class="container single-column">
    <div class="content-center">
        <h1>Oops! Something went wrong</h1>
        <p>{}</p>
        <p><a href="#/">Return to home</a></p>
    </div>
</div>"##,
        escape_text(message)
    )
}

pub fn not_found_panel() -> String {
    r##"<div class="container single-column">
    <div class="content-center">
        <h1>404 - Page Not Found</h1>
        <p>The page you're looking for doesn't exist.</p>
        <p><a href="#/">Return to home</a></p>
    </div>
</div>"##
        .to_string()
}

/// Replace the container with `markup`, set the title, leave loading.
pub(crate) fn render(dom: &dyn Dom, site_name: &str, markup: &str, title: &str) {
    if let Err(e) = inject::set_inner_html(dom, markup) {
        tracing::error!(error = %e, "Failed to materialize panel scripts");
    }
    dom.set_title(&page_title(site_name, Some(title)));
    loading::hide(dom);
}

pub fn render_error(dom: &dyn Dom, site_name: &str, message: &str) {
    render(dom, site_name, &error_panel(message), ERROR_TITLE);
}

pub fn render_not_found(dom: &dyn Dom, site_name: &str) {
    render(dom, site_name, &not_found_panel(), NOT_FOUND_TITLE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_title() {
        assert_eq!(page_title("LandonSoft", Some("About Me")), "About Me - LandonSoft");
        assert_eq!(page_title("LandonSoft", None), "LandonSoft");
    }

    #[test]
    fn test_error_panel_escapes_message() {
        let panel = error_panel("<b>boom</b>");
        assert!(panel.contains("Oops! Something went wrong"));
        assert!(panel.contains("&lt;b&gt;boom&lt;/b&gt;"));
        assert!(panel.contains(r##"<a href="#/">"##));
    }

    #[test]
    fn test_not_found_panel_links_home() {
        let panel = not_found_panel();
        assert!(panel.contains("404 - Page Not Found"));
        assert!(panel.contains(r##"<a href="#/">Return to home</a>"##));
    }
}
