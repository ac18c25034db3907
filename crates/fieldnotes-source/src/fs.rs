//! Directory scanner and deferred markdown loader.
//!
//! Layout conventions:
//!
//! - `index.md` at the content root becomes the root index page.
//! - A subdirectory becomes a category; its `index.md` (when present)
//!   becomes the category's own body.
//! - Every other `*.md` file becomes a leaf page named after its stem.
//! - Entries whose names start with `.` or `_` are skipped.
//! - Siblings are ordered lexicographically by file name, so reading order
//!   is controlled with numeric prefixes in file names if desired.

use std::io;
use std::path::{Path, PathBuf};

use fieldnotes_pages::{
    ContentLoader, ContentPayload, LoadError, LoadFuture, NodeBody, PageTree, PageTreeBuilder,
    Slug, TreeError,
};
use fieldnotes_render::MarkdownRenderer;
use tracing::{debug, warn};

use crate::frontmatter::split_front_matter;

/// Error produced while scanning the content directory.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Filesystem failure while scanning.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The scanned layout produced an inconsistent tree.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl SourceError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Content source backed by a directory of markdown files.
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at the given content directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Content directory this source scans.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the content directory into a page tree.
    ///
    /// Page names and descriptions are read from front matter during the
    /// scan (falling back to the first H1, then to the title-cased file
    /// stem); page bodies are attached as deferred loaders and rendered on
    /// first request. A missing content directory yields an empty tree.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when a directory cannot be read or the
    /// layout produces duplicate slugs.
    pub fn build_tree(&self) -> Result<PageTree, SourceError> {
        let mut builder = PageTreeBuilder::new();

        if !self.root.is_dir() {
            warn!(path = %self.root.display(), "content directory not found, serving empty tree");
            return Ok(builder.build());
        }

        let root_index = self.root.join("index.md");
        if root_index.is_file() {
            let meta = PageMeta::read(&root_index, "Home");
            builder.add_page(
                meta.name,
                Slug::root(),
                meta.description,
                Some(NodeBody::deferred(MarkdownLoader::new(root_index, None))),
                None,
            )?;
        }

        self.scan_dir(&self.root, &Slug::root(), None, &mut builder)?;

        let tree = builder.build();
        debug!(pages = tree.node_count(), "scanned content directory");
        Ok(tree)
    }

    fn scan_dir(
        &self,
        dir: &Path,
        slug: &Slug,
        parent: Option<usize>,
        builder: &mut PageTreeBuilder,
    ) -> Result<(), SourceError> {
        let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|err| SourceError::io(dir, err))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| SourceError::io(dir, err))?
            .into_iter()
            .map(|entry| entry.path())
            .collect();
        entries.sort();

        for path in entries {
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if file_name.starts_with('.') || file_name.starts_with('_') {
                continue;
            }

            if path.is_dir() {
                self.scan_category(&path, file_name, slug, parent, builder)?;
            } else if let Some(stem) = file_name.strip_suffix(".md")
                && stem != "index"
            {
                let meta = PageMeta::read(&path, stem);
                let base = base_path(slug);
                builder.add_page(
                    meta.name,
                    slug.child(stem),
                    meta.description,
                    Some(NodeBody::deferred(MarkdownLoader::new(path, base))),
                    parent,
                )?;
            }
        }

        Ok(())
    }

    fn scan_category(
        &self,
        dir: &Path,
        name: &str,
        parent_slug: &Slug,
        parent: Option<usize>,
        builder: &mut PageTreeBuilder,
    ) -> Result<(), SourceError> {
        let slug = parent_slug.child(name);
        let index = dir.join("index.md");

        let (meta, body) = if index.is_file() {
            let meta = PageMeta::read(&index, name);
            let base = base_path(&slug);
            (meta, Some(NodeBody::deferred(MarkdownLoader::new(index, base))))
        } else {
            (PageMeta::fallback(name), None)
        };

        let idx = builder.add_page(meta.name, slug.clone(), meta.description, body, parent)?;
        self.scan_dir(dir, &slug, Some(idx), builder)
    }
}

/// Link resolution base for pages inside `slug`'s directory.
fn base_path(slug: &Slug) -> Option<String> {
    if slug.is_root() {
        None
    } else {
        Some(slug.segments().join("/"))
    }
}

/// Scan-time page metadata.
struct PageMeta {
    name: String,
    description: Option<String>,
}

impl PageMeta {
    /// Read a page's name and description without rendering it.
    ///
    /// Front matter wins; otherwise the first H1 is used, and failing that
    /// the title-cased stem. Read failures degrade to the fallback so a
    /// transiently unreadable file still appears in navigation.
    fn read(path: &Path, stem: &str) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read page metadata");
                return Self::fallback(stem);
            }
        };

        match split_front_matter(&text) {
            Ok((front, body)) => Self {
                name: front
                    .title
                    .or_else(|| first_heading(body))
                    .unwrap_or_else(|| title_case(stem)),
                description: front.description,
            },
            Err(err) => {
                warn!(path = %path.display(), error = %err, "invalid front matter");
                Self::fallback(stem)
            }
        }
    }

    fn fallback(stem: &str) -> Self {
        Self {
            name: title_case(stem),
            description: None,
        }
    }
}

/// First ATX H1 in the body, if any.
fn first_heading(body: &str) -> Option<String> {
    body.lines().find_map(|line| {
        line.strip_prefix("# ")
            .map(|rest| rest.trim().to_owned())
            .filter(|title| !title.is_empty())
    })
}

/// Title-case a file stem: `getting-started` becomes `Getting Started`.
fn title_case(stem: &str) -> String {
    stem.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deferred loader that reads and renders one markdown file.
pub struct MarkdownLoader {
    path: PathBuf,
    base: Option<String>,
}

impl MarkdownLoader {
    /// Create a loader for the given file.
    ///
    /// `base` is the URL directory the page lives in, used to resolve
    /// relative links; `None` for root-level pages.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, base: Option<String>) -> Self {
        Self {
            path: path.into(),
            base,
        }
    }
}

impl ContentLoader for MarkdownLoader {
    fn load(&self) -> LoadFuture {
        let path = self.path.clone();
        let base = self.base.clone();
        Box::pin(async move {
            let text = tokio::fs::read_to_string(&path).await.map_err(|err| {
                if err.kind() == io::ErrorKind::NotFound {
                    LoadError::NotFound(path.display().to_string())
                } else {
                    LoadError::Io(err)
                }
            })?;

            let (front, body) = split_front_matter(&text)
                .map_err(|err| LoadError::Malformed(format!("{}: {err}", path.display())))?;

            let mut renderer = MarkdownRenderer::new().with_title_extraction();
            if let Some(base) = base {
                renderer = renderer.with_base_path(base);
            }
            let rendered = renderer.render(body);

            debug!(path = %path.display(), "rendered page content");
            Ok(ContentPayload {
                title: front.title.or(rendered.title),
                description: front.description,
                html: rendered.html,
                toc: rendered.toc,
            })
        })
    }
}
