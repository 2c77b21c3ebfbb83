//! Component catalog model, loading and validation.
//!
//! A catalog is a three-level, insertion-ordered hierarchy
//! (category → subcategory → section) whose leaves are the components
//! rendered on each section page.

pub mod error;
pub mod loader;
pub mod model;
pub mod ordered;
pub mod slug;
pub mod validate;

pub use error::CatalogError;
pub use loader::{load_catalog, parse_json, parse_yaml};
pub use model::{Catalog, Category, Component, Section, SectionRef, Subcategory};
pub use ordered::OrderedMap;
pub use slug::{anchor, component_anchor, slugify};
pub use validate::validate;
