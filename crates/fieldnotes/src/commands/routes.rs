//! `fieldnotes routes` command implementation.
//!
//! Enumerates every resolvable page URL from the content directory.
//! Useful for static export scripts and for sanity-checking the tree.

use std::path::PathBuf;

use clap::Args;
use fieldnotes_config::{CliSettings, Config};
use fieldnotes_source::FsSource;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    /// Path to configuration file (default: auto-discover fieldnotes.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Notes source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the content scan fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let tree = FsSource::new(config.notes_resolved.source_dir).build_tree()?;
        let routes = tree.routes();

        for route in &routes {
            output.info(&route.url_path());
        }
        output.success(&format!("{} routes", routes.len()));

        Ok(())
    }
}
