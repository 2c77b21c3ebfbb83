//! Vitrine CLI - static preview site generator for UI component catalogs.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Static preview site generator for UI component catalogs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to vitrine.toml config file
    #[arg(short, long, default_value = "vitrine.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the preview site
    Build {
        /// Catalog file (defaults to config or "catalog.json")
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output root containing html/ (defaults to config or "output")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Build, serve and rebuild when inputs change
    Dev {
        /// Catalog file (defaults to config or "catalog.json")
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Serve a built preview site
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory to serve (defaults to <output>/preview)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let file_config = config::load_config(&cli.config)?;

    // Execute command
    match cli.command {
        Commands::Build {
            catalog,
            output,
            no_minify,
        } => {
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&file_config, catalog, output, minify)?;
        }
        Commands::Dev {
            catalog,
            port,
            no_open,
        } => {
            commands::dev::run(&file_config, catalog, port, !no_open).await?;
        }
        Commands::Serve { port, dir, no_open } => {
            let port = port.unwrap_or(file_config.serve.port);
            let dir = dir.unwrap_or_else(|| file_config.build.output.join("preview"));
            commands::serve::run(port, dir, !no_open).await?;
        }
    }

    Ok(())
}
