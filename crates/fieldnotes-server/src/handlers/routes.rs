//! Route enumeration API endpoint.
//!
//! Lists every resolvable URL path. Used by static exporters to know
//! which pages to fetch; every listed route is guaranteed to resolve.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use fieldnotes_pages::Slug;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/routes.
#[derive(Serialize)]
pub(crate) struct RoutesResponse {
    /// All resolvable URL paths, in reading order.
    routes: Vec<String>,
}

/// Handle GET /api/routes.
pub(crate) async fn get_routes(State(state): State<Arc<AppState>>) -> Json<RoutesResponse> {
    let routes = state.tree.routes().iter().map(Slug::url_path).collect();
    Json(RoutesResponse { routes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_response_serialization() {
        let response = RoutesResponse {
            routes: vec!["/".to_owned(), "/guide".to_owned()],
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["routes"][0], "/");
        assert_eq!(json["routes"][1], "/guide");
    }
}
