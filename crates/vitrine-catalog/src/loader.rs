//! Catalog file loading.

use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::model::Catalog;

/// Load a catalog from a `.json`, `.yaml` or `.yml` file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !matches!(ext, "json" | "yaml" | "yml") {
        return Err(CatalogError::UnsupportedFormat(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|e| CatalogError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    if ext == "json" {
        parse_json(&content)
    } else {
        parse_yaml(&content)
    }
}

/// Parse a catalog from JSON text.
pub fn parse_json(source: &str) -> Result<Catalog, CatalogError> {
    serde_json::from_str(source).map_err(|e| CatalogError::Parse(e.to_string()))
}

/// Parse a catalog from YAML text.
pub fn parse_yaml(source: &str) -> Result<Catalog, CatalogError> {
    serde_yaml::from_str(source).map_err(|e| CatalogError::Parse(e.to_string()))
}
