//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/site", get(handlers::site::get_site))
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route("/api/routes", get(handlers::routes::get_routes))
        .route("/api/pages/", get(handlers::pages::get_root_page))
        .route("/api/pages/{*path}", get(handlers::pages::get_page));

    // Add security headers middleware
    Router::new()
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use fieldnotes_source::FsSource;
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    fn notes_router() -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.md"), "# Welcome\n\nStart here.").unwrap();
        fs::create_dir(dir.path().join("guide")).unwrap();
        fs::write(
            dir.path().join("guide/index.md"),
            "---\ntitle: Guide\ndescription: How to use this\n---\n\nOverview.",
        )
        .unwrap();
        fs::write(
            dir.path().join("guide/setup.md"),
            "# Setup\n\n## Install\n\nSteps.",
        )
        .unwrap();

        let tree = FsSource::new(dir.path()).build_tree().unwrap();
        let state = Arc::new(AppState {
            tree: Arc::new(tree),
            site_title: "Field Notes".to_owned(),
            site_description: None,
            version: "test".to_owned(),
        });
        (dir, create_router(state))
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_get_page_returns_content_and_footer() {
        let (_dir, router) = notes_router();

        let (status, json) = get(router, "/api/pages/guide/setup").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["meta"]["title"], "Setup");
        assert_eq!(json["meta"]["path"], "/guide/setup");
        assert_eq!(json["toc"][0]["title"], "Install");
        assert_eq!(json["footer"]["previous"]["url"], "/guide");
        assert!(json["footer"]["html"].as_str().unwrap().contains("Home"));
    }

    #[tokio::test]
    async fn test_get_root_page() {
        let (_dir, router) = notes_router();

        let (status, json) = get(router, "/api/pages/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["meta"]["title"], "Welcome");
        assert_eq!(json["meta"]["path"], "/");
    }

    #[tokio::test]
    async fn test_get_missing_page_is_404() {
        let (_dir, router) = notes_router();

        let (status, json) = get(router, "/api/pages/does/not/exist").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["path"], "/does/not/exist");
    }

    #[tokio::test]
    async fn test_deleted_source_downgrades_to_404() {
        let (dir, router) = notes_router();
        fs::remove_file(dir.path().join("guide/setup.md")).unwrap();

        let (status, _) = get(router, "/api/pages/guide/setup").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_conditional_request_returns_not_modified() {
        let (_dir, router) = notes_router();

        let first = router
            .clone()
            .oneshot(
                Request::get("/api/pages/guide/setup")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let etag = first.headers()[header::ETAG].clone();

        let second = router
            .oneshot(
                Request::get("/api/pages/guide/setup")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_navigation_lists_reading_order() {
        let (_dir, router) = notes_router();

        let (status, json) = get(router, "/api/navigation").await;

        assert_eq!(status, StatusCode::OK);
        let urls: Vec<_> = json["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["url"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(urls, ["/guide", "/guide/setup"]);
    }

    #[tokio::test]
    async fn test_every_enumerated_route_resolves() {
        let (_dir, router) = notes_router();

        let (_, json) = get(router.clone(), "/api/routes").await;
        let routes: Vec<String> = serde_json::from_value(json["routes"].clone()).unwrap();
        assert!(!routes.is_empty());

        for route in routes {
            let (status, _) = get(router.clone(), &format!("/api/pages{route}")).await;
            assert_eq!(status, StatusCode::OK, "route {route} must resolve");
        }
    }

    #[tokio::test]
    async fn test_site_endpoint() {
        let (_dir, router) = notes_router();

        let (status, json) = get(router, "/api/site").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "Field Notes");
        assert_eq!(json["version"], "test");
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let (_dir, router) = notes_router();

        let response = router
            .oneshot(Request::get("/api/site").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert!(response.headers().contains_key("content-security-policy"));
    }
}
