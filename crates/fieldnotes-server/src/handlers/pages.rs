//! Pages API endpoint.
//!
//! Resolves the requested slug against the page tree, materializes the
//! page content (waiting on the deferred loader when needed) and returns
//! JSON with metadata, table of contents, HTML content and the footer
//! navigation.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use fieldnotes_pages::{NavEntry, Slug, TocEntry, neighbors};
use fieldnotes_render::render_footer;
use md5::{Digest, Md5};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/pages/{path}.
#[derive(Serialize)]
struct PageResponse {
    /// Page metadata.
    meta: PageMeta,
    /// Table of contents entries.
    toc: Vec<TocEntry>,
    /// Rendered HTML content.
    content: String,
    /// Previous/Home/next footer navigation.
    footer: FooterResponse,
}

/// Page metadata.
#[derive(Serialize)]
struct PageMeta {
    /// Page title (from content or the tree node's name).
    title: String,
    /// URL path with leading slash.
    path: String,
    /// Page description.
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Footer navigation for serialization.
#[derive(Serialize)]
struct FooterResponse {
    /// Previous page in reading order.
    #[serde(skip_serializing_if = "Option::is_none")]
    previous: Option<NavEntry>,
    /// Next page in reading order.
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<NavEntry>,
    /// Rendered footer HTML.
    html: String,
}

/// Handle GET /api/pages/ (root page).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(String::new(), state, headers).await
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(path, state, headers).await
}

/// Shared implementation for page rendering.
async fn get_page_impl(
    path: String,
    state: Arc<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let slug = Slug::from_url_path(&path);
    let url = slug.url_path();

    let node = state
        .tree
        .resolve(&slug)
        .map_err(|_| ServerError::PageNotFound(url.clone()))?;

    // A page whose content cannot be produced is indistinguishable from a
    // page that was never in the tree: log the cause, answer 404.
    let payload = match node.materialize().await {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(path = %url, error = %err, "Failed to materialize page content");
            return Err(ServerError::PageNotFound(url));
        }
    };

    // Compute ETag and answer conditional requests before building the body
    let etag = compute_etag(&state.version, &payload.html);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let footer_neighbors = neighbors(&url, state.tree.nav_entries(), false);

    let response = PageResponse {
        meta: PageMeta {
            title: payload
                .title
                .clone()
                .unwrap_or_else(|| node.name().to_owned()),
            path: url,
            description: payload
                .description
                .clone()
                .or_else(|| node.description().map(str::to_owned)),
        },
        toc: payload.toc.clone(),
        content: payload.html.clone(),
        footer: FooterResponse {
            previous: footer_neighbors.previous.cloned(),
            next: footer_neighbors.next.cloned(),
            html: render_footer(footer_neighbors),
        },
    };

    Ok((
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Json(response),
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars) - sufficient for
/// cache invalidation with negligible collision probability.
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
