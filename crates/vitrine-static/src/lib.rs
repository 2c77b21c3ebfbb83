//! Static preview site generator for component catalogs.
//!
//! Renders an index page for the whole catalog and one page per section,
//! each embedding its components as live frames next to their source.

pub mod assets;
pub mod builder;
pub mod html;
pub mod storage;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use html::{escape_html, escape_source};
pub use storage::{FsStorage, Storage};
pub use vitrine_catalog::{anchor, component_anchor, slugify};
