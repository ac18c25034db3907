//! Previous/Home/next page footer.
//!
//! Rendered once per page from the navigation neighbors. The Home link is
//! constant; the previous and next columns appear only when the reading
//! order has an entry on that side.

use fieldnotes_pages::Neighbors;

use crate::renderer::escape_html;

/// Render the page footer for the given navigation neighbors.
///
/// Produces a `<footer>` with up to three columns: a link to the previous
/// page, the constant Home link, and a link to the next page. Each
/// neighbor link shows the entry's name and its description (falling back
/// to "Previous page" / "Next page").
#[must_use]
pub fn render_footer(neighbors: Neighbors<'_>) -> String {
    let mut columns = Vec::with_capacity(3);

    if let Some(previous) = neighbors.previous {
        columns.push(link_column(
            "footer-prev",
            &previous.url,
            &previous.name,
            previous.description.as_deref().unwrap_or("Previous page"),
        ));
    }
    columns.push(link_column("footer-home", "/", "Home", "Back to the start"));
    if let Some(next) = neighbors.next {
        columns.push(link_column(
            "footer-next",
            &next.url,
            &next.name,
            next.description.as_deref().unwrap_or("Next page"),
        ));
    }

    format!(
        "<footer class=\"page-footer columns-{}\">{}</footer>",
        columns.len(),
        columns.concat()
    )
}

fn link_column(class: &str, url: &str, name: &str, description: &str) -> String {
    format!(
        "<div class=\"{class}\"><a href=\"{}\"><span class=\"name\">{}</span><span class=\"description\">{}</span></a></div>",
        escape_html(url),
        escape_html(name),
        escape_html(description),
    )
}

#[cfg(test)]
mod tests {
    use fieldnotes_pages::NavEntry;
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(url: &str, name: &str, description: Option<&str>) -> NavEntry {
        NavEntry {
            url: url.to_owned(),
            name: name.to_owned(),
            description: description.map(str::to_owned),
        }
    }

    #[test]
    fn test_footer_with_both_neighbors_has_three_columns() {
        let previous = entry("/guide", "Guide", Some("Getting around"));
        let next = entry("/guide/setup", "Setup", None);

        let html = render_footer(Neighbors {
            previous: Some(&previous),
            next: Some(&next),
        });

        assert!(html.starts_with("<footer class=\"page-footer columns-3\">"));
        assert!(html.contains(r#"<a href="/guide">"#));
        assert!(html.contains("Getting around"));
        assert!(html.contains(r#"<a href="/guide/setup">"#));
    }

    #[test]
    fn test_footer_without_neighbors_is_home_only() {
        let html = render_footer(Neighbors::default());

        assert_eq!(
            html,
            "<footer class=\"page-footer columns-1\">\
             <div class=\"footer-home\"><a href=\"/\"><span class=\"name\">Home</span>\
             <span class=\"description\">Back to the start</span></a></div></footer>"
        );
    }

    #[test]
    fn test_footer_first_page_has_no_previous_column() {
        let next = entry("/b", "B", None);

        let html = render_footer(Neighbors {
            previous: None,
            next: Some(&next),
        });

        assert!(html.contains("columns-2"));
        assert!(!html.contains("footer-prev"));
        assert!(html.contains("footer-next"));
    }

    #[test]
    fn test_footer_default_descriptions() {
        let previous = entry("/a", "A", None);
        let next = entry("/b", "B", None);

        let html = render_footer(Neighbors {
            previous: Some(&previous),
            next: Some(&next),
        });

        assert!(html.contains("Previous page"));
        assert!(html.contains("Next page"));
    }

    #[test]
    fn test_footer_escapes_names() {
        let previous = entry("/a", "Tips & Tricks", Some("<em>not html</em>"));

        let html = render_footer(Neighbors {
            previous: Some(&previous),
            next: None,
        });

        assert!(html.contains("Tips &amp; Tricks"));
        assert!(html.contains("&lt;em&gt;not html&lt;/em&gt;"));
    }
}
