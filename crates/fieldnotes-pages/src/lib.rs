//! Page tree, resolution and navigation core for fieldnotes.
//!
//! This crate owns the data model of a documentation site and the two
//! operations everything else is built on:
//!
//! - **Resolution**: mapping a URL [`Slug`] to a [`PageNode`] in the
//!   [`PageTree`], walking one segment per level with exact matching.
//! - **Sequencing**: computing previous/next [`Neighbors`] for the active
//!   URL from the tree's flattened reading-order [`NavEntry`] list.
//!
//! Content bodies are materialized lazily: a node carries either an inline
//! [`ContentPayload`] or a deferred [`ContentLoader`], and the first
//! successful load is memoized for the lifetime of the process.
//!
//! # Thread Safety
//!
//! A built [`PageTree`] is immutable and meant to be shared behind an `Arc`.
//! Per-node memoization uses a write-once cell, so concurrent requests for
//! the same page converge on a single payload without external locking.

mod content;
mod nav;
mod slug;
mod tree;

pub use content::{ContentLoader, ContentPayload, LoadError, LoadFuture, NodeBody, TocEntry};
pub use nav::{NavEntry, Neighbors, is_active, neighbors};
pub use slug::Slug;
pub use tree::{PageNode, PageTree, PageTreeBuilder, ResolveError, TreeError};
