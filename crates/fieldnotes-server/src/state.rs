//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use fieldnotes_pages::PageTree;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page tree built from the content source at startup.
    pub(crate) tree: Arc<PageTree>,
    /// Site title shown in page chrome.
    pub(crate) site_title: String,
    /// Site description.
    pub(crate) site_description: Option<String>,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}
