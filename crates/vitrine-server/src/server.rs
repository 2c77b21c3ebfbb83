//! Development server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use vitrine_catalog::{load_catalog, CatalogError};
use vitrine_static::{BuildConfig, BuildError, BuildResult, StaticBuilder};

use crate::watcher::{FileWatcher, WatchEvent, WatchTargets};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Catalog file to load on every build
    pub catalog: PathBuf,

    /// Build settings
    pub build: BuildConfig,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("catalog.json"),
            build: BuildConfig::default(),
            port: 4000,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

impl DevServerConfig {
    /// Directory served to the browser.
    pub fn preview_dir(&self) -> PathBuf {
        self.build.output_dir.join("preview")
    }

    fn watch_targets(&self) -> WatchTargets {
        WatchTargets {
            catalog: self.catalog.clone(),
            html_dir: self.build.output_dir.join("html"),
            stylesheet: self.build.stylesheet.clone(),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("Server error: {0}")]
    ServeError(String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Development server: builds, serves the preview directory and rebuilds on change.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let config = Arc::new(self.config);

        // A broken first build still serves whatever is on disk
        rebuild_blocking(&config).await;

        let (watcher, mut rx) = FileWatcher::new(&config.watch_targets())
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let watch_config = Arc::clone(&config);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&watch_config, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = Router::new().fallback_service(ServeDir::new(config.preview_dir()));

        tracing::info!("Starting dev server at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        if config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        Ok(())
    }
}

/// Load the catalog and build the site once.
pub fn rebuild(config: &DevServerConfig) -> Result<BuildResult, ServerError> {
    let catalog = load_catalog(&config.catalog)?;
    let result = StaticBuilder::new(config.build.clone()).build(&catalog)?;
    Ok(result)
}

fn report(result: Result<BuildResult, ServerError>) {
    match result {
        Ok(result) => tracing::info!(
            "Built {} pages with {} components in {}ms",
            result.pages,
            result.components,
            result.duration_ms
        ),
        Err(e) => tracing::error!("Build failed: {}", e),
    }
}

/// Handle file watch events.
async fn handle_watch_event(config: &Arc<DevServerConfig>, event: WatchEvent) {
    match &event {
        WatchEvent::CatalogModified(path) => {
            tracing::info!("Catalog modified: {}", path.display());
        }
        WatchEvent::ComponentModified(path) => {
            tracing::info!("Component modified: {}", path.display());
        }
        WatchEvent::StylesheetModified(path) => {
            tracing::info!("Stylesheet modified: {}", path.display());
        }
    }

    rebuild_blocking(config).await;
}

/// Run [`rebuild`] on the blocking pool and log the outcome.
async fn rebuild_blocking(config: &Arc<DevServerConfig>) {
    let config = Arc::clone(config);
    match tokio::task::spawn_blocking(move || rebuild(&config)).await {
        Ok(result) => report(result),
        Err(e) => tracing::error!("Rebuild task failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn site(root: &std::path::Path) -> DevServerConfig {
        fs::write(root.join("app.css"), "body {}").unwrap();
        fs::create_dir_all(root.join("out/html/a")).unwrap();
        fs::write(root.join("out/html/a/1.html"), "<p>one</p>").unwrap();
        fs::write(
            root.join("catalog.json"),
            r#"{"A": {"B": {"C": {"url": "/a/c.html", "components": [
                {"url": "/a/1.html", "hash": "one", "title": "One"}
            ]}}}}"#,
        )
        .unwrap();

        DevServerConfig {
            catalog: root.join("catalog.json"),
            build: BuildConfig {
                output_dir: root.join("out"),
                stylesheet: root.join("app.css"),
                ..Default::default()
            },
            open: false,
            ..Default::default()
        }
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());
        assert_eq!(server.config.port, 4000);
        assert_eq!(server.config.preview_dir(), PathBuf::from("output/preview"));
    }

    #[test]
    fn rebuilds_site() {
        let temp = tempdir().unwrap();
        let config = site(temp.path());

        let result = rebuild(&config).unwrap();

        assert_eq!(result.components, 1);
        assert!(config.preview_dir().join("a/c.html").exists());
    }

    #[test]
    fn rebuild_reports_missing_catalog() {
        let temp = tempdir().unwrap();
        let config = DevServerConfig {
            catalog: temp.path().join("missing.json"),
            ..site(temp.path())
        };

        assert!(matches!(rebuild(&config), Err(ServerError::Catalog(_))));
    }

    #[test]
    fn rebuild_reports_missing_component() {
        let temp = tempdir().unwrap();
        let config = site(temp.path());
        fs::remove_file(temp.path().join("out/html/a/1.html")).unwrap();

        assert!(matches!(
            rebuild(&config),
            Err(ServerError::Build(BuildError::ReadError { .. }))
        ));
    }

    #[tokio::test]
    async fn rebuilds_off_the_runtime_thread() {
        let temp = tempdir().unwrap();
        let config = Arc::new(site(temp.path()));

        rebuild_blocking(&config).await;

        assert!(config.preview_dir().join("index.html").exists());
        assert!(config.preview_dir().join("a/c.html").exists());
    }

    #[tokio::test]
    async fn rejects_invalid_host() {
        let config = DevServerConfig {
            host: "not a host".to_string(),
            open: false,
            ..Default::default()
        };

        let result = DevServer::new(config).start().await;

        assert!(matches!(result, Err(ServerError::InvalidAddress(_))));
    }
}
