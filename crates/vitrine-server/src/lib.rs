//! Preview server with rebuild-on-change for vitrine sites.
//!
//! Serves the generated `preview/` directory and regenerates it whenever the
//! catalog, the rendered component markup or the stylesheet changes.

pub mod server;
pub mod watcher;

pub use server::{rebuild, DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent, WatchTargets};
