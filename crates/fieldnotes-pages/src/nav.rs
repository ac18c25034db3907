//! Previous/next navigation sequencing.
//!
//! Operates on the tree's flattened reading-order entry list. Matching and
//! sequencing are pure functions over already-resident data; nothing here
//! suspends or allocates beyond the returned references.

use serde::Serialize;

/// Entry in the flattened navigation list.
///
/// Derived from the page tree in depth-first reading order, one entry per
/// navigable page. Never mutated independently of the tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// URL path with leading slash (e.g., "/guide/setup").
    pub url: String,
    /// Display name.
    pub name: String,
    /// Optional description shown alongside prev/next links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Previous and next entries for the active URL.
///
/// Both are `None` when the active URL is not present in the list — the
/// page may be the homepage or a page outside the nav list, which is not
/// an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbors<'a> {
    /// Entry immediately before the active one in reading order.
    pub previous: Option<&'a NavEntry>,
    /// Entry immediately after the active one in reading order.
    pub next: Option<&'a NavEntry>,
}

/// Active-URL predicate used for nav matching.
///
/// In exact mode (`nested == false`) only URL equality matches. In nested
/// mode the entry is also active when the active path extends the entry URL
/// across a `/` boundary: `/guide` is active for `/guide/setup` but not for
/// `/guidebook`. Substring matching is never used.
#[must_use]
pub fn is_active(url: &str, active_path: &str, nested: bool) -> bool {
    if url == active_path {
        return true;
    }
    if !nested {
        return false;
    }
    // Root matches every path in nested mode; avoid the double-slash prefix.
    if url == "/" {
        return true;
    }
    active_path.strip_prefix(url).is_some_and(|rest| rest.starts_with('/'))
}

/// Compute previous/next entries for the active URL.
///
/// Linear scan for the first active entry in reading order; with duplicate
/// or overlapping URLs the first matching index deterministically wins.
/// O(n) in the number of entries, which is the intended tradeoff at
/// documentation-site sizes.
#[must_use]
pub fn neighbors<'a>(active_url: &str, entries: &'a [NavEntry], nested: bool) -> Neighbors<'a> {
    let Some(i) = entries
        .iter()
        .position(|entry| is_active(&entry.url, active_url, nested))
    else {
        return Neighbors::default();
    };

    Neighbors {
        previous: i.checked_sub(1).map(|p| &entries[p]),
        next: entries.get(i + 1),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(url: &str) -> NavEntry {
        NavEntry {
            url: url.to_owned(),
            name: url.trim_start_matches('/').to_owned(),
            description: None,
        }
    }

    fn abc() -> Vec<NavEntry> {
        vec![entry("/a"), entry("/b"), entry("/c")]
    }

    #[test]
    fn test_is_active_exact_match() {
        assert!(is_active("/guide", "/guide", false));
        assert!(!is_active("/guide", "/guide/setup", false));
        assert!(!is_active("/guide", "/other", false));
    }

    #[test]
    fn test_is_active_nested_matches_subpaths() {
        assert!(is_active("/guide", "/guide/setup", true));
        assert!(is_active("/guide", "/guide", true));
        assert!(is_active("/", "/guide", true));
    }

    #[test]
    fn test_is_active_nested_requires_path_boundary() {
        assert!(!is_active("/guide", "/guidebook", true));
    }

    #[test]
    fn test_neighbors_middle_entry() {
        let entries = abc();

        let result = neighbors("/b", &entries, false);

        assert_eq!(result.previous.unwrap().url, "/a");
        assert_eq!(result.next.unwrap().url, "/c");
    }

    #[test]
    fn test_neighbors_first_entry_has_no_previous() {
        let entries = abc();

        let result = neighbors("/a", &entries, false);

        assert!(result.previous.is_none());
        assert_eq!(result.next.unwrap().url, "/b");
    }

    #[test]
    fn test_neighbors_last_entry_has_no_next() {
        let entries = abc();

        let result = neighbors("/c", &entries, false);

        assert_eq!(result.previous.unwrap().url, "/b");
        assert!(result.next.is_none());
    }

    #[test]
    fn test_neighbors_absent_url_yields_neither() {
        let entries = vec![entry("/a"), entry("/b")];

        let result = neighbors("/z", &entries, false);

        assert_eq!(result, Neighbors::default());
    }

    #[test]
    fn test_neighbors_empty_list() {
        let result = neighbors("/a", &[], false);

        assert!(result.previous.is_none());
        assert!(result.next.is_none());
    }

    #[test]
    fn test_neighbors_single_entry() {
        let entries = vec![entry("/only")];

        let result = neighbors("/only", &entries, false);

        assert!(result.previous.is_none());
        assert!(result.next.is_none());
    }

    #[test]
    fn test_neighbors_first_match_wins_on_duplicates() {
        let entries = vec![entry("/a"), entry("/dup"), entry("/b"), entry("/dup")];

        let result = neighbors("/dup", &entries, false);

        assert_eq!(result.previous.unwrap().url, "/a");
        assert_eq!(result.next.unwrap().url, "/b");
    }

    #[test]
    fn test_neighbors_nested_prefix_first_match_wins() {
        // Both /guide and /guide/setup are active for /guide/setup/deep in
        // nested mode; the earlier entry in reading order must win.
        let entries = vec![entry("/intro"), entry("/guide"), entry("/guide/setup")];

        let result = neighbors("/guide/setup/deep", &entries, true);

        assert_eq!(result.previous.unwrap().url, "/intro");
        assert_eq!(result.next.unwrap().url, "/guide/setup");
    }

    #[test]
    fn test_neighbors_is_idempotent() {
        let entries = abc();

        let first = neighbors("/b", &entries, false);
        let second = neighbors("/b", &entries, false);

        assert_eq!(first, second);
    }

    #[test]
    fn test_nav_entry_serialization_skips_missing_description() {
        let json = serde_json::to_value(entry("/guide")).unwrap();

        assert_eq!(json["url"], "/guide");
        assert_eq!(json["name"], "guide");
        assert!(json.get("description").is_none());
    }
}
