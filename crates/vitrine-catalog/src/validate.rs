//! Catalog validation.
//!
//! Names become DOM anchors and hashes become component ids, so collisions
//! produce broken links rather than errors in the browser. Section urls name
//! output files, so a repeated url silently replaces a page. Validation
//! rejects both up front, before any page is written.

use std::collections::{HashMap, HashSet};

use crate::error::CatalogError;
use crate::model::Catalog;
use crate::ordered::OrderedMap;
use crate::slug::{anchor, slugify};

/// Urls of the pages and assets the builder writes itself.
const RESERVED_URLS: &[&str] = &[
    "/index.html",
    "/css/app.css",
    "/css/preview.css",
    "/js/preview.js",
];

/// Check a catalog for anchor collisions, duplicate hashes and unsafe or
/// clashing urls.
pub fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    check_index_ids(catalog)?;
    for (_, category) in catalog.categories.iter() {
        for (_, subcategory) in category.iter() {
            check_siblings(subcategory)?;
        }
    }

    let mut hashes: HashMap<&str, &str> = HashMap::new();
    let mut urls: HashSet<&str> = RESERVED_URLS.iter().copied().collect();

    for entry in catalog.sections() {
        check_url(&entry.section.url, || format!("section `{}`", entry.name))?;

        if !urls.insert(&entry.section.url) {
            return Err(CatalogError::DuplicateUrl {
                owner: entry.name.to_string(),
                url: entry.section.url.clone(),
            });
        }

        for component in &entry.section.components {
            if component.hash.is_empty() {
                return Err(CatalogError::EmptyHash(component.title.clone()));
            }

            check_url(&component.url, || format!("component `{}`", component.title))?;

            if let Some(first) = hashes.insert(&component.hash, &component.title) {
                return Err(CatalogError::DuplicateHash {
                    hash: component.hash.clone(),
                    first: first.to_string(),
                    second: component.title.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Every id on the index page, category slugs and composite
/// category-subcategory anchors alike, must be distinct and non-empty.
fn check_index_ids(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut seen: HashMap<String, String> = HashMap::new();

    for (category_name, category) in catalog.categories.iter() {
        claim_id(&mut seen, slugify(category_name), category_name, category_name)?;

        for (subcategory_name, _) in category.iter() {
            let label = format!("{} / {}", category_name, subcategory_name);
            claim_id(
                &mut seen,
                anchor(&[category_name, subcategory_name]),
                subcategory_name,
                &label,
            )?;
        }
    }

    Ok(())
}

fn claim_id(
    seen: &mut HashMap<String, String>,
    id: String,
    name: &str,
    label: &str,
) -> Result<(), CatalogError> {
    if slugify(name).is_empty() {
        return Err(CatalogError::EmptyAnchor(label.to_string()));
    }
    if let Some(first) = seen.get(&id) {
        return Err(CatalogError::DuplicateAnchor {
            anchor: id,
            first: first.clone(),
            second: label.to_string(),
        });
    }
    seen.insert(id, label.to_string());
    Ok(())
}

/// Section names within one subcategory must produce distinct, non-empty slugs.
fn check_siblings<V>(level: &OrderedMap<V>) -> Result<(), CatalogError> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for name in level.keys() {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(CatalogError::EmptyAnchor(name.to_string()));
        }
        if let Some(first) = seen.insert(slug.clone(), name) {
            return Err(CatalogError::DuplicateAnchor {
                anchor: slug,
                first: first.to_string(),
                second: name.to_string(),
            });
        }
    }

    Ok(())
}

fn check_url(url: &str, owner: impl FnOnce() -> String) -> Result<(), CatalogError> {
    if let Some(path) = url.strip_prefix('/') {
        if !path
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Ok(());
        }
    }
    Err(CatalogError::InvalidUrl {
        owner: owner(),
        url: url.to_string(),
    })
}
