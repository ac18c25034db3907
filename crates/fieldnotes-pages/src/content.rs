//! Page content bodies and lazy materialization.
//!
//! A page body is either an [`NodeBody::Inline`] payload that is already
//! resident, or an [`NodeBody::Deferred`] loader that produces the payload
//! asynchronously on first access. Deferred loads are memoized per node:
//! the first successful load wins and every later access returns the same
//! payload without re-triggering the loader.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use tokio::sync::OnceCell;

/// Table of contents entry extracted from rendered content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level (2-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID.
    pub id: String,
}

/// The renderable unit for a page, immutable after first production.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ContentPayload {
    /// Page title, if the content declares one.
    pub title: Option<String>,
    /// Page description, if the content declares one.
    pub description: Option<String>,
    /// Rendered HTML body.
    pub html: String,
    /// Table of contents entries.
    pub toc: Vec<TocEntry>,
}

/// Error produced when a page body cannot be materialized.
///
/// Callers treat every variant the same way: the page renders as not-found.
/// A resolved tree entry with no materializable body is equivalent to a page
/// that was never in the tree.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Underlying content source is missing.
    #[error("content source not found: {0}")]
    NotFound(String),
    /// Underlying content source exists but cannot be parsed.
    #[error("content source is malformed: {0}")]
    Malformed(String),
    /// I/O failure reading the content source.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Boxed future returned by [`ContentLoader::load`].
pub type LoadFuture = Pin<Box<dyn Future<Output = Result<ContentPayload, LoadError>> + Send>>;

/// Asynchronous producer of a page's [`ContentPayload`].
///
/// Implementations must be idempotent: the node memoizes the first
/// successful result, but a race between concurrent first loads may invoke
/// `load` more than once and either result may win the cache write.
pub trait ContentLoader: Send + Sync {
    /// Produce the payload. May suspend on I/O.
    fn load(&self) -> LoadFuture;
}

impl<F> ContentLoader for F
where
    F: Fn() -> LoadFuture + Send + Sync,
{
    fn load(&self) -> LoadFuture {
        self()
    }
}

/// A page body: inline payload or deferred loader.
///
/// Modeled as a tagged variant rather than an optional load capability so
/// dispatch is explicit at the call site.
pub enum NodeBody {
    /// Payload already resident at tree construction time.
    Inline(ContentPayload),
    /// Payload produced on demand by an asynchronous loader.
    Deferred(Box<dyn ContentLoader>),
}

impl NodeBody {
    /// Create a deferred body from a loader.
    #[must_use]
    pub fn deferred<L: ContentLoader + 'static>(loader: L) -> Self {
        Self::Deferred(Box::new(loader))
    }
}

impl fmt::Debug for NodeBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(payload) => f.debug_tuple("Inline").field(payload).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// A body together with its write-once materialization cell.
#[derive(Debug)]
pub(crate) struct NodeContent {
    body: NodeBody,
    cell: OnceCell<ContentPayload>,
}

impl NodeContent {
    pub(crate) fn new(body: NodeBody) -> Self {
        Self {
            body,
            cell: OnceCell::new(),
        }
    }

    /// Materialize the payload, waiting for the deferred loader if needed.
    ///
    /// Inline bodies return immediately. Deferred bodies run the loader at
    /// most once per successful load; failures are not cached, so a later
    /// request may retry a transient error.
    pub(crate) async fn materialize(&self) -> Result<&ContentPayload, LoadError> {
        match &self.body {
            NodeBody::Inline(payload) => Ok(payload),
            NodeBody::Deferred(loader) => self.cell.get_or_try_init(|| loader.load()).await,
        }
    }
}
