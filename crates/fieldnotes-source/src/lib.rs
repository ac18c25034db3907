//! Filesystem content source for the fieldnotes page tree.
//!
//! Scans a directory of markdown notes into a [`fieldnotes_pages::PageTree`]
//! whose bodies are deferred loaders: the tree shape and page metadata come
//! from a startup scan, while each page's HTML is rendered lazily on first
//! request and memoized by the tree node.

mod frontmatter;
mod fs;

pub use frontmatter::{FrontMatter, FrontMatterError, split_front_matter};
pub use fs::{FsSource, MarkdownLoader, SourceError};
