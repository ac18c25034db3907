//! Navigation API endpoint.
//!
//! Returns the flattened navigation list in reading order.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use fieldnotes_pages::NavEntry;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Navigation entries in reading order.
    items: Vec<NavEntry>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(State(state): State<Arc<AppState>>) -> Json<NavigationResponse> {
    let items = state.tree.nav_entries().to_vec();
    Json(NavigationResponse { items })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_response_serialization() {
        let response = NavigationResponse {
            items: vec![NavEntry {
                url: "/guide".to_owned(),
                name: "Guide".to_owned(),
                description: None,
            }],
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["items"][0]["url"], "/guide");
        assert_eq!(json["items"][0]["name"], "Guide");
    }
}
