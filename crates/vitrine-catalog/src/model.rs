//! Catalog data model.

use serde::Deserialize;

use crate::ordered::OrderedMap;

/// Subcategories of a category, keyed by display name.
pub type Category = OrderedMap<Subcategory>;

/// Sections of a subcategory, keyed by display name.
pub type Subcategory = OrderedMap<Section>;

/// The full catalog: categories keyed by display name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub categories: OrderedMap<Category>,
}

/// A group of related components rendered on one page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    /// Path of the section page, relative to the preview root (e.g. `/forms/buttons.html`)
    pub url: String,

    /// Components in display order
    #[serde(default)]
    pub components: Vec<Component>,
}

/// One component snippet with pre-rendered markup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Component {
    /// Path of the rendered markup, relative to the html root
    pub url: String,

    /// Stable identifier, unique across the catalog
    pub hash: String,

    /// Display title
    pub title: String,

    /// Whether the component needs Alpine.js to work
    #[serde(rename = "hasAlpine", default)]
    pub has_alpine: bool,
}

/// A section together with the names of its ancestors.
#[derive(Debug, Clone, Copy)]
pub struct SectionRef<'a> {
    pub category: &'a str,
    pub subcategory: &'a str,
    pub name: &'a str,
    pub section: &'a Section,
}

impl Catalog {
    /// Iterate every section in catalog order.
    pub fn sections(&self) -> impl Iterator<Item = SectionRef<'_>> {
        self.categories.iter().flat_map(|(category, subcategories)| {
            subcategories.iter().flat_map(move |(subcategory, sections)| {
                sections.iter().map(move |(name, section)| SectionRef {
                    category,
                    subcategory,
                    name,
                    section,
                })
            })
        })
    }

    /// Total number of components across all sections.
    pub fn component_count(&self) -> usize {
        self.sections().map(|s| s.section.components.len()).sum()
    }
}

impl Section {
    /// Component count label, e.g. "1 component" or "3 components".
    pub fn count_label(&self) -> String {
        let count = self.components.len();
        format!("{} component{}", count, if count == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section(count: usize) -> Section {
        Section {
            url: "/s.html".to_string(),
            components: (0..count)
                .map(|i| Component {
                    url: format!("/s/{}.html", i),
                    hash: format!("h{}", i),
                    title: format!("C{}", i),
                    has_alpine: false,
                })
                .collect(),
        }
    }

    #[test]
    fn pluralizes_count_label() {
        assert_eq!(section(0).count_label(), "0 components");
        assert_eq!(section(1).count_label(), "1 component");
        assert_eq!(section(2).count_label(), "2 components");
    }

    #[test]
    fn deserializes_components() {
        let json = r#"{
            "url": "/elements/buttons/primary/1.html",
            "hash": "abc123",
            "title": "Primary Button",
            "hasAlpine": true,
            "extra": "ignored"
        }"#;

        let component: Component = serde_json::from_str(json).unwrap();

        assert_eq!(component.hash, "abc123");
        assert!(component.has_alpine);
    }

    #[test]
    fn has_alpine_defaults_to_false() {
        let json = r#"{"url": "/a.html", "hash": "a", "title": "A"}"#;

        let component: Component = serde_json::from_str(json).unwrap();

        assert!(!component.has_alpine);
    }

    #[test]
    fn iterates_sections_in_order() {
        let json = r#"{
            "Elements": {
                "Buttons": {
                    "Primary": { "url": "/e/b/p.html", "components": [] },
                    "Groups": { "url": "/e/b/g.html", "components": [] }
                }
            },
            "Forms": {
                "Inputs": {
                    "Text": { "url": "/f/i/t.html" }
                }
            }
        }"#;

        let catalog: Catalog = serde_json::from_str(json).unwrap();
        let names: Vec<_> = catalog
            .sections()
            .map(|s| (s.category, s.subcategory, s.name))
            .collect();

        assert_eq!(
            names,
            vec![
                ("Elements", "Buttons", "Primary"),
                ("Elements", "Buttons", "Groups"),
                ("Forms", "Inputs", "Text"),
            ]
        );
    }
}
