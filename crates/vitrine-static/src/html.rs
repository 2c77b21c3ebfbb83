//! HTML escaping.
//!
//! Pages never interpolate raw text: templates escape every value with
//! [`escape_html`] through the environment formatter, and component markup
//! goes through [`escape_source`] via the `source` filter.

/// Escape component markup for embedding as text inside a `<textarea>`.
///
/// Ampersands are replaced before angle brackets so the entities this
/// introduces are not escaped again.
pub fn escape_source(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;")
}

/// Escape text or attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
