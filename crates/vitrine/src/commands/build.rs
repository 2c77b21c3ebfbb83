//! Static site build command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use vitrine_catalog::load_catalog;
use vitrine_static::StaticBuilder;

use crate::config::ConfigFile;

/// Run the build command.
pub fn run(
    config: &ConfigFile,
    catalog: Option<PathBuf>,
    output: Option<PathBuf>,
    minify: Option<bool>,
) -> Result<()> {
    tracing::info!("Building preview site...");

    let catalog_path = catalog.unwrap_or_else(|| config.catalog.path.clone());
    let catalog = load_catalog(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;

    let result = StaticBuilder::new(config.build_config(output, minify)).build(&catalog)?;

    tracing::info!(
        "Built {} pages with {} components in {}ms",
        result.pages,
        result.components,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.join("preview").display());

    Ok(())
}
