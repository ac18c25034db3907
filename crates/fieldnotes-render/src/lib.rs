//! Markdown rendering for fieldnotes pages.
//!
//! Converts markdown note bodies to HTML with heading anchors, a table of
//! contents, optional title extraction from the first H1, and relative
//! link resolution against the current page's location. Also renders the
//! previous/Home/next page footer.

mod footer;
mod links;
mod renderer;

pub use footer::render_footer;
pub use links::resolve_link;
pub use renderer::{MarkdownRenderer, RenderResult, escape_html};
