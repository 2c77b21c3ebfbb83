//! Anchor and URL fragment derivation.

/// Convert a display name to a lowercase, URL-safe slug.
///
/// Every run of non-alphanumeric characters collapses to a single `-`, and
/// leading or trailing separators are dropped.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Build a composite anchor by slugging each part and joining with `-`.
pub fn anchor(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| slugify(part))
        .collect::<Vec<_>>()
        .join("-")
}

/// Anchor id of a component block.
pub fn component_anchor(hash: &str) -> String {
    format!("component-{}", hash)
}
