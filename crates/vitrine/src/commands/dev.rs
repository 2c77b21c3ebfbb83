//! Development server command.

use std::path::PathBuf;

use anyhow::Result;
use vitrine_server::{DevServer, DevServerConfig};

use crate::config::ConfigFile;

/// Run the dev server.
pub async fn run(
    config: &ConfigFile,
    catalog: Option<PathBuf>,
    port: Option<u16>,
    open: bool,
) -> Result<()> {
    let port = port.unwrap_or(config.serve.port);
    tracing::info!("Starting development server on port {}", port);

    let server_config = DevServerConfig {
        catalog: catalog.unwrap_or_else(|| config.catalog.path.clone()),
        build: config.build_config(None, None),
        port,
        open,
        ..Default::default()
    };

    DevServer::new(server_config).start().await?;

    Ok(())
}
