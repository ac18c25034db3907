//! HTTP server for the fieldnotes site.
//!
//! This crate provides a native Rust HTTP server using axum, serving JSON
//! API endpoints for page rendering, navigation and route enumeration.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use fieldnotes_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 4141,
//!         source_dir: PathBuf::from("notes"),
//!         site_title: "Field Notes".to_string(),
//!         site_description: None,
//!         version: "1.0.0".to_string(),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (fieldnotes-server)
//!                        │
//!                        └─► API routes (Rust handlers)
//!                                │
//!                                └─► PageTree (resolve + lazy render)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use fieldnotes_source::FsSource;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Notes source directory.
    pub source_dir: PathBuf,
    /// Site title shown in page chrome.
    pub site_title: String,
    /// Site description.
    pub site_description: Option<String>,
    /// Application version (for cache invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 4141,
            source_dir: PathBuf::from("notes"),
            site_title: "Field Notes".to_owned(),
            site_description: None,
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// Scans the content directory into a page tree once at startup, then
/// serves it until shutdown.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the content scan or server startup fails.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let tree = Arc::new(FsSource::new(config.source_dir.clone()).build_tree()?);
    tracing::info!(
        source_dir = %config.source_dir.display(),
        pages = tree.node_count(),
        "Loaded content tree"
    );

    let state = Arc::new(AppState {
        tree,
        site_title: config.site_title.clone(),
        site_description: config.site_description.clone(),
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from fieldnotes config.
///
/// # Arguments
///
/// * `config` - fieldnotes configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_config(
    config: &fieldnotes_config::Config,
    version: String,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.notes_resolved.source_dir.clone(),
        site_title: config.site.title.clone(),
        site_description: config.site.description.clone(),
        version,
    }
}
