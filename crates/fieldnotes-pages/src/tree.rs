//! Page tree structure and slug resolution.
//!
//! Pages are stored in a flat `Vec<PageNode>` with child relationships
//! tracked by indices, plus the list of depth-1 entry points in reading
//! order. The flattened navigation list is derived once at build time and
//! never mutated afterwards.

use std::collections::HashMap;

use crate::content::{ContentPayload, LoadError, NodeBody, NodeContent};
use crate::nav::NavEntry;
use crate::slug::Slug;

/// A node in the page tree.
///
/// A node with a body is renderable: a leaf, or a category whose index page
/// holds the body. A category without an index body is an ancestor only and
/// does not resolve.
#[derive(Debug)]
pub struct PageNode {
    slug: Slug,
    name: String,
    description: Option<String>,
    content: Option<NodeContent>,
}

impl PageNode {
    /// Slug identifying this page.
    #[must_use]
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// True if the node carries a renderable body (inline or deferred).
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.content.is_some()
    }

    /// Materialize the node's content payload.
    ///
    /// Waits for the deferred loader on first access; later calls return
    /// the memoized payload.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the node has no body or the loader fails.
    /// Callers surface either case as the not-found outcome.
    pub async fn materialize(&self) -> Result<&ContentPayload, LoadError> {
        match &self.content {
            Some(content) => content.materialize().await,
            None => Err(LoadError::NotFound(format!(
                "page {} has no renderable body",
                self.slug
            ))),
        }
    }
}

/// Error returned when a slug does not resolve to a renderable page.
///
/// Terminal: the caller must produce the not-found response. Never retried.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No tree node matches the slug, or the matched node has no body.
    #[error("page not found: {0}")]
    NotFound(String),
}

/// Error returned while constructing a page tree.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A slug was added twice. Slugs are unique across the tree.
    #[error("duplicate slug in page tree: {0}")]
    DuplicateSlug(String),
    /// Parent index does not refer to an existing node.
    #[error("invalid parent index: {0}")]
    InvalidParent(usize),
    /// Slug does not extend the parent slug by exactly one segment.
    #[error("slug {slug} does not belong under parent {parent}")]
    SlugMismatch {
        /// Slug being added.
        slug: String,
        /// Slug of the requested parent.
        parent: String,
    },
}

/// Ordered, hierarchical structure of documentation pages.
///
/// Immutable after [`PageTreeBuilder::build`]; share it behind an `Arc`.
/// Traversal order is stable and defines the site's reading order.
#[derive(Debug)]
pub struct PageTree {
    nodes: Vec<PageNode>,
    children: Vec<Vec<usize>>,
    /// Depth-1 entry points in reading order.
    top: Vec<usize>,
    /// Root index page (empty slug), if the site has one.
    root: Option<usize>,
    /// Flattened navigation list, derived at build time.
    nav: Vec<NavEntry>,
}

impl PageTree {
    /// Resolve a slug to its page node.
    ///
    /// Walks from the root consuming one segment per level, matching on
    /// exact case-sensitive segment equality. Pure function of the tree
    /// and the slug; performs no I/O.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] when a segment has no matching
    /// child, or when the walk ends at a node without a renderable body
    /// (a category with no index page).
    pub fn resolve(&self, slug: &Slug) -> Result<&PageNode, ResolveError> {
        let not_found = || ResolveError::NotFound(slug.url_path());

        if slug.is_root() {
            let node = self.root.map(|i| &self.nodes[i]).ok_or_else(not_found)?;
            return if node.has_body() { Ok(node) } else { Err(not_found()) };
        }

        let mut candidates: &[usize] = &self.top;
        let mut matched = None;
        for segment in slug.segments() {
            let Some(&idx) = candidates
                .iter()
                .find(|&&i| self.nodes[i].slug.last_segment() == Some(segment))
            else {
                return Err(not_found());
            };
            matched = Some(idx);
            candidates = &self.children[idx];
        }

        // Non-root slugs always consume at least one segment.
        let node = matched.map(|i| &self.nodes[i]).ok_or_else(not_found)?;
        if node.has_body() { Ok(node) } else { Err(not_found()) }
    }

    /// Enumerate every resolvable slug, in reading order.
    ///
    /// Build-time route enumeration: every returned slug is guaranteed to
    /// resolve. Pure and synchronous.
    #[must_use]
    pub fn routes(&self) -> Vec<Slug> {
        let mut routes = Vec::new();
        if let Some(root) = self.root
            && self.nodes[root].has_body()
        {
            routes.push(self.nodes[root].slug.clone());
        }
        self.visit_reading_order(&mut |node| {
            if node.has_body() {
                routes.push(node.slug.clone());
            }
        });
        routes
    }

    /// The flattened navigation list in depth-first reading order.
    ///
    /// One entry per renderable page; the root index page is excluded
    /// (the footer links to it with the constant Home link instead).
    #[must_use]
    pub fn nav_entries(&self) -> &[NavEntry] {
        &self.nav
    }

    /// Number of nodes in the tree, including bodyless categories.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth-first pre-order walk over depth-1 nodes and below.
    fn visit_reading_order(&self, visit: &mut impl FnMut(&PageNode)) {
        fn dfs(
            idx: usize,
            nodes: &[PageNode],
            children: &[Vec<usize>],
            visit: &mut impl FnMut(&PageNode),
        ) {
            visit(&nodes[idx]);
            for &child in &children[idx] {
                dfs(child, nodes, children, visit);
            }
        }

        for &idx in &self.top {
            dfs(idx, &self.nodes, &self.children, visit);
        }
    }
}

/// Builder for [`PageTree`] instances.
///
/// Insertion order of siblings defines reading order.
#[derive(Debug, Default)]
pub struct PageTreeBuilder {
    nodes: Vec<PageNode>,
    children: Vec<Vec<usize>>,
    top: Vec<usize>,
    root: Option<usize>,
    slug_index: HashMap<Slug, usize>,
}

impl PageTreeBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page to the tree.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `slug` - Unique page slug; must extend the parent slug by exactly
    ///   one segment (the empty slug adds the root index page)
    /// * `description` - Optional description
    /// * `body` - Renderable body; `None` for a category without an index
    /// * `parent` - Index of the parent node, `None` for root-level pages
    ///
    /// # Returns
    ///
    /// Index of the added node, usable as a later `parent` argument.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError`] on duplicate slugs, out-of-range parent
    /// indices, or a slug that does not belong under the parent.
    pub fn add_page(
        &mut self,
        name: String,
        slug: Slug,
        description: Option<String>,
        body: Option<NodeBody>,
        parent: Option<usize>,
    ) -> Result<usize, TreeError> {
        if self.slug_index.contains_key(&slug) {
            return Err(TreeError::DuplicateSlug(slug.url_path()));
        }

        let parent_slug = match parent {
            Some(p) => Some(
                self.nodes
                    .get(p)
                    .map(|node| node.slug.clone())
                    .ok_or(TreeError::InvalidParent(p))?,
            ),
            None => None,
        };

        let expected_parent = slug.parent();
        match (&expected_parent, &parent_slug) {
            // Root index page attaches directly to the virtual root.
            (None, None) => {}
            // Depth-1 pages may omit the parent or name the root index page.
            (Some(expected), None) if expected.is_root() => {}
            (Some(expected), Some(actual)) if expected == actual => {}
            _ => {
                return Err(TreeError::SlugMismatch {
                    slug: slug.url_path(),
                    parent: parent_slug.map_or_else(|| "/".to_owned(), |s| s.url_path()),
                });
            }
        }

        let idx = self.nodes.len();
        self.slug_index.insert(slug.clone(), idx);
        self.nodes.push(PageNode {
            slug,
            name,
            description,
            content: body.map(NodeContent::new),
        });
        self.children.push(Vec::new());

        let node = &self.nodes[idx];
        if node.slug.is_root() {
            self.root = Some(idx);
        } else if node.slug.depth() == 1 {
            self.top.push(idx);
        } else if let Some(p) = parent {
            self.children[p].push(idx);
        }

        Ok(idx)
    }

    /// Build the immutable tree and derive its flattened navigation list.
    #[must_use]
    pub fn build(self) -> PageTree {
        let mut tree = PageTree {
            nodes: self.nodes,
            children: self.children,
            top: self.top,
            root: self.root,
            nav: Vec::new(),
        };

        let mut nav = Vec::new();
        tree.visit_reading_order(&mut |node| {
            if node.has_body() {
                nav.push(NavEntry {
                    url: node.slug.url_path(),
                    name: node.name.clone(),
                    description: node.description.clone(),
                });
            }
        });
        tree.nav = nav;
        tree
    }
}

#[cfg(test)]
mod tests {
    // A built tree is shared across request handlers via Arc.
    static_assertions::assert_impl_all!(super::PageTree: Send, Sync);

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::content::TocEntry;
    use crate::nav::neighbors;

    fn inline(html: &str) -> NodeBody {
        NodeBody::Inline(ContentPayload {
            title: None,
            description: None,
            html: html.to_owned(),
            toc: Vec::new(),
        })
    }

    /// Tree shaped like the notes site: a root index, a category with an
    /// index page and two leaves, and a standalone leaf.
    fn notes_tree() -> PageTree {
        let mut builder = PageTreeBuilder::new();
        builder
            .add_page("Home".into(), Slug::root(), None, Some(inline("<p>home</p>")), None)
            .unwrap();
        let ts = builder
            .add_page(
                "TypeScript".into(),
                Slug::new(["typescript"]),
                Some("Notes on TypeScript".into()),
                Some(inline("<p>ts index</p>")),
                None,
            )
            .unwrap();
        builder
            .add_page(
                "The Language".into(),
                Slug::new(["typescript", "ts"]),
                Some("Core language notes".into()),
                Some(inline("<p>ts</p>")),
                Some(ts),
            )
            .unwrap();
        builder
            .add_page(
                "Tooling".into(),
                Slug::new(["typescript", "tooling"]),
                None,
                Some(inline("<p>tooling</p>")),
                Some(ts),
            )
            .unwrap();
        builder
            .add_page(
                "Colophon".into(),
                Slug::new(["colophon"]),
                None,
                Some(inline("<p>colophon</p>")),
                None,
            )
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_resolve_leaf() {
        let tree = notes_tree();

        let node = tree.resolve(&Slug::new(["typescript", "ts"])).unwrap();

        assert_eq!(node.name(), "The Language");
        assert_eq!(node.slug().url_path(), "/typescript/ts");
    }

    #[test]
    fn test_resolve_category_with_index() {
        let tree = notes_tree();

        let node = tree.resolve(&Slug::new(["typescript"])).unwrap();

        assert_eq!(node.name(), "TypeScript");
    }

    #[test]
    fn test_resolve_root_index() {
        let tree = notes_tree();

        let node = tree.resolve(&Slug::root()).unwrap();

        assert_eq!(node.name(), "Home");
    }

    #[test]
    fn test_resolve_missing_segment_is_not_found() {
        let tree = notes_tree();

        let result = tree.resolve(&Slug::new(["typescript", "does-not-exist"]));

        assert_eq!(
            result.unwrap_err(),
            ResolveError::NotFound("/typescript/does-not-exist".to_owned())
        );
    }

    #[test]
    fn test_resolve_unknown_top_level_is_not_found() {
        let tree = notes_tree();

        assert!(tree.resolve(&Slug::new(["rust"])).is_err());
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let tree = notes_tree();

        assert!(tree.resolve(&Slug::new(["TypeScript"])).is_err());
    }

    #[test]
    fn test_resolve_category_without_index_is_not_found() {
        let mut builder = PageTreeBuilder::new();
        let cat = builder
            .add_page("Drafts".into(), Slug::new(["drafts"]), None, None, None)
            .unwrap();
        builder
            .add_page(
                "One".into(),
                Slug::new(["drafts", "one"]),
                None,
                Some(inline("<p>one</p>")),
                Some(cat),
            )
            .unwrap();
        let tree = builder.build();

        assert!(tree.resolve(&Slug::new(["drafts"])).is_err());
        assert!(tree.resolve(&Slug::new(["drafts", "one"])).is_ok());
    }

    #[test]
    fn test_resolve_root_without_index_is_not_found() {
        let mut builder = PageTreeBuilder::new();
        builder
            .add_page("Guide".into(), Slug::new(["guide"]), None, Some(inline("<p>g</p>")), None)
            .unwrap();
        let tree = builder.build();

        assert!(tree.resolve(&Slug::root()).is_err());
    }

    #[test]
    fn test_routes_agree_with_resolution() {
        let tree = notes_tree();

        let routes = tree.routes();

        assert_eq!(routes.len(), 5);
        for slug in &routes {
            assert!(tree.resolve(slug).is_ok(), "route {slug} must resolve");
        }
    }

    #[test]
    fn test_routes_exclude_bodyless_categories() {
        let mut builder = PageTreeBuilder::new();
        let cat = builder
            .add_page("Drafts".into(), Slug::new(["drafts"]), None, None, None)
            .unwrap();
        builder
            .add_page(
                "One".into(),
                Slug::new(["drafts", "one"]),
                None,
                Some(inline("<p>one</p>")),
                Some(cat),
            )
            .unwrap();
        let tree = builder.build();

        let routes = tree.routes();

        assert_eq!(routes, vec![Slug::new(["drafts", "one"])]);
    }

    #[test]
    fn test_nav_entries_follow_reading_order() {
        let tree = notes_tree();

        let urls: Vec<_> = tree.nav_entries().iter().map(|e| e.url.as_str()).collect();

        assert_eq!(
            urls,
            ["/typescript", "/typescript/ts", "/typescript/tooling", "/colophon"]
        );
    }

    #[test]
    fn test_nav_entries_exclude_root_index() {
        let tree = notes_tree();

        assert!(tree.nav_entries().iter().all(|e| e.url != "/"));
    }

    #[test]
    fn test_nav_entries_carry_descriptions() {
        let tree = notes_tree();

        let ts = &tree.nav_entries()[1];

        assert_eq!(ts.name, "The Language");
        assert_eq!(ts.description.as_deref(), Some("Core language notes"));
    }

    #[test]
    fn test_nav_entries_drive_neighbors() {
        let tree = notes_tree();

        let result = neighbors("/typescript/ts", tree.nav_entries(), false);

        assert_eq!(result.previous.unwrap().url, "/typescript");
        assert_eq!(result.next.unwrap().url, "/typescript/tooling");
    }

    #[test]
    fn test_duplicate_slug_is_rejected() {
        let mut builder = PageTreeBuilder::new();
        builder
            .add_page("A".into(), Slug::new(["a"]), None, Some(inline("")), None)
            .unwrap();

        let result = builder.add_page("A again".into(), Slug::new(["a"]), None, None, None);

        assert_eq!(result.unwrap_err(), TreeError::DuplicateSlug("/a".to_owned()));
    }

    #[test]
    fn test_invalid_parent_is_rejected() {
        let mut builder = PageTreeBuilder::new();

        let result =
            builder.add_page("Child".into(), Slug::new(["a", "b"]), None, None, Some(7));

        assert_eq!(result.unwrap_err(), TreeError::InvalidParent(7));
    }

    #[test]
    fn test_slug_must_extend_parent() {
        let mut builder = PageTreeBuilder::new();
        let a = builder
            .add_page("A".into(), Slug::new(["a"]), None, None, None)
            .unwrap();

        let result =
            builder.add_page("Stray".into(), Slug::new(["b", "c"]), None, None, Some(a));

        assert!(matches!(result, Err(TreeError::SlugMismatch { .. })));
    }

    #[test]
    fn test_deep_slug_requires_parent() {
        let mut builder = PageTreeBuilder::new();

        let result = builder.add_page("Deep".into(), Slug::new(["a", "b"]), None, None, None);

        assert!(matches!(result, Err(TreeError::SlugMismatch { .. })));
    }

    #[test]
    fn test_empty_tree_resolves_nothing() {
        let tree = PageTreeBuilder::new().build();

        assert!(tree.resolve(&Slug::root()).is_err());
        assert!(tree.resolve(&Slug::new(["anything"])).is_err());
        assert!(tree.nav_entries().is_empty());
        assert!(tree.routes().is_empty());
        assert_eq!(tree.node_count(), 0);
    }

    #[tokio::test]
    async fn test_materialize_inline_payload() {
        let tree = notes_tree();
        let node = tree.resolve(&Slug::new(["colophon"])).unwrap();

        let payload = node.materialize().await.unwrap();

        assert_eq!(payload.html, "<p>colophon</p>");
    }

    #[tokio::test]
    async fn test_materialize_bodyless_node_fails() {
        let mut builder = PageTreeBuilder::new();
        builder
            .add_page("Drafts".into(), Slug::new(["drafts"]), None, None, None)
            .unwrap();
        let tree = builder.build();

        // Not reachable through resolve, which already reports NotFound.
        let node = &tree.nodes[0];
        assert!(node.materialize().await.is_err());
    }

    #[test]
    fn test_toc_entry_serialization() {
        let entry = TocEntry {
            level: 2,
            title: "Setup".to_owned(),
            id: "setup".to_owned(),
        };

        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["level"], 2);
        assert_eq!(json["title"], "Setup");
        assert_eq!(json["id"], "setup");
    }
}
