//! Catalog errors.

/// Errors that can occur when loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Unsupported catalog format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("Names `{first}` and `{second}` both resolve to anchor `{anchor}`")]
    DuplicateAnchor {
        anchor: String,
        first: String,
        second: String,
    },

    #[error("Name `{0}` does not produce a usable anchor")]
    EmptyAnchor(String),

    #[error("Component hash `{hash}` is used by both `{first}` and `{second}`")]
    DuplicateHash {
        hash: String,
        first: String,
        second: String,
    },

    #[error("Component `{0}` has an empty hash")]
    EmptyHash(String),

    #[error("Invalid url `{url}` in {owner}: must start with `/` and contain no empty, `.` or `..` segment")]
    InvalidUrl { owner: String, url: String },

    #[error("Url `{url}` of section `{owner}` is already written by another page")]
    DuplicateUrl { owner: String, url: String },
}
