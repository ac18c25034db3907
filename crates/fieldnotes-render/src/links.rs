//! Relative link resolution.
//!
//! Links inside note bodies are written against the source layout
//! (`./sibling.md`, `../other/page.md`). Rendered pages live at URL paths,
//! so destinations are rebased onto the current page's location with the
//! `.md` suffix stripped.

/// Resolve a markdown link destination against a page's base path.
///
/// `base` is the URL path of the directory the current page lives in,
/// without leading slash (empty for root-level pages). Absolute URLs,
/// site-absolute paths, fragments and mailto links pass through unchanged.
///
/// # Examples
///
/// Relative destinations resolve under the base and lose the `.md` suffix:
///
/// ```
/// use fieldnotes_render::resolve_link;
///
/// assert_eq!(resolve_link("./ts.md", Some("typescript")), "/typescript/ts");
/// assert_eq!(resolve_link("../colophon.md", Some("typescript")), "/colophon");
/// assert_eq!(resolve_link("https://example.com", Some("typescript")), "https://example.com");
/// ```
#[must_use]
pub fn resolve_link(dest: &str, base: Option<&str>) -> String {
    if dest.is_empty()
        || dest.starts_with('#')
        || dest.starts_with('/')
        || dest.starts_with("mailto:")
        || dest.contains("://")
    {
        return dest.to_owned();
    }

    let (path, fragment) = match dest.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (dest, None),
    };

    let mut segments: Vec<&str> = base
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    // Map source file names onto URL paths: `page.md` -> `page`,
    // `dir/index.md` -> `dir`.
    if let Some(&last) = segments.last() {
        let stripped = last.strip_suffix(".md").unwrap_or(last);
        segments.pop();
        if stripped != "index" {
            segments.push(stripped);
        }
    }

    let mut url = if segments.is_empty() {
        "/".to_owned()
    } else {
        format!("/{}", segments.join("/"))
    };
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}
