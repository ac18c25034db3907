//! Site metadata API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/site.
#[derive(Serialize)]
pub(crate) struct SiteResponse {
    /// Site title.
    title: String,
    /// Site description.
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// Application version.
    version: String,
}

/// Handle GET /api/site.
pub(crate) async fn get_site(State(state): State<Arc<AppState>>) -> Json<SiteResponse> {
    Json(SiteResponse {
        title: state.site_title.clone(),
        description: state.site_description.clone(),
        version: state.version.clone(),
    })
}
