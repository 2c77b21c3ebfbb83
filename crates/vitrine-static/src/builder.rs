//! Static preview site builder.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use vitrine_catalog::{anchor, component_anchor, slugify, validate, Catalog, CatalogError, Section};

use crate::assets::AssetPipeline;
use crate::storage::{FsStorage, Storage};
use crate::templates::{
    CategoryView, ComponentView, Crumb, IndexPage, SectionCard, SectionPage, SubcategoryView,
    TemplateEngine,
};

/// Path of the index page under the output root.
pub const INDEX_PATH: &str = "preview/index.html";

/// Configuration for building a preview site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output root; rendered components are read from `html/`, pages go to `preview/`
    pub output_dir: PathBuf,

    /// Stylesheet copied to `preview/css/app.css`
    pub stylesheet: PathBuf,

    /// Page title
    pub title: String,

    /// Minify generated CSS
    pub minify: bool,

    /// Reject anchor collisions and duplicate hashes before writing anything
    pub validate: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            stylesheet: PathBuf::from("css/app.css"),
            title: "Tailwind UI Components".to_string(),
            minify: true,
            validate: true,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated, index included
    pub pages: usize,

    /// Number of section pages generated
    pub sections: usize,

    /// Number of components embedded
    pub components: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to read {path}: {source}")]
    ReadError { path: String, source: io::Error },

    #[error("Failed to write {path}: {source}")]
    WriteError { path: String, source: io::Error },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to generate asset: {0}")]
    AssetError(String),
}

/// Static preview site builder.
///
/// One traversal of the catalog writes every section page and then the
/// index page. The first unreadable component aborts the build; pages
/// already written stay on disk.
pub struct StaticBuilder<S = FsStorage> {
    config: BuildConfig,
    storage: S,
    templates: TemplateEngine,
}

impl StaticBuilder<FsStorage> {
    /// Create a builder that writes under `config.output_dir`.
    pub fn new(config: BuildConfig) -> Self {
        let storage = FsStorage::new(&config.output_dir);
        Self::with_storage(config, storage)
    }
}

impl<S: Storage> StaticBuilder<S> {
    /// Create a builder over a custom storage.
    pub fn with_storage(config: BuildConfig, storage: S) -> Self {
        Self {
            config,
            storage,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the whole preview site.
    pub fn build(&self, catalog: &Catalog) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        if self.config.validate {
            validate(catalog)?;
        }

        let (sections, components) = self.build_index_page(catalog)?;

        Ok(BuildResult {
            pages: sections + 1,
            sections,
            components,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Write the index page, every section page it links to, and the assets.
    ///
    /// Returns the number of sections and components written.
    pub fn build_index_page(&self, catalog: &Catalog) -> Result<(usize, usize), BuildError> {
        let mut sections = 0;
        let mut components = 0;
        let mut categories = Vec::with_capacity(catalog.categories.len());

        for (category_name, category) in catalog.categories.iter() {
            let mut subcategories = Vec::with_capacity(category.len());

            for (subcategory_name, subcategory) in category.iter() {
                let id = anchor(&[category_name, subcategory_name]);
                let mut cards = Vec::with_capacity(subcategory.len());

                for (section_name, section) in subcategory.iter() {
                    cards.push(SectionCard {
                        name: section_name.to_string(),
                        href: format!("{}#{}", section.url, id),
                        count_label: section.count_label(),
                    });

                    components += self.build_section_page(
                        category_name,
                        subcategory_name,
                        section_name,
                        section,
                    )?;
                    sections += 1;
                }

                subcategories.push(SubcategoryView {
                    name: subcategory_name.to_string(),
                    id,
                    sections: cards,
                });
            }

            categories.push(CategoryView {
                name: category_name.to_string(),
                id: slugify(category_name),
                subcategories,
            });
        }

        let page = IndexPage {
            title: self.config.title.clone(),
            categories,
        };

        let html = self
            .templates
            .render_page("index.html", &page)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        tracing::info!("Writing index.html");
        self.write(INDEX_PATH, html.as_bytes())?;

        self.generate_assets()?;

        Ok((sections, components))
    }

    /// Write one section page to `preview/<section.url>`.
    ///
    /// Returns the number of components embedded.
    pub fn build_section_page(
        &self,
        category: &str,
        subcategory: &str,
        name: &str,
        section: &Section,
    ) -> Result<usize, BuildError> {
        let mut components = Vec::with_capacity(section.components.len());

        for component in &section.components {
            let path = format!("html{}", component.url);
            tracing::debug!("Reading {}", path);

            let source = self
                .storage
                .read_to_string(&path)
                .map_err(|source| BuildError::ReadError { path, source })?;

            components.push(ComponentView {
                id: component_anchor(&component.hash),
                hash: component.hash.clone(),
                title: component.title.clone(),
                url: component.url.clone(),
                source,
                has_alpine: component.has_alpine,
            });
        }

        let page = SectionPage {
            title: self.config.title.clone(),
            name: name.to_string(),
            category: Crumb {
                name: category.to_string(),
                href: format!("/#{}", slugify(category)),
            },
            subcategory: Crumb {
                name: subcategory.to_string(),
                href: format!("/#{}", anchor(&[category, subcategory])),
            },
            components,
        };

        let html = self
            .templates
            .render_page("section.html", &page)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        tracing::info!("Writing {}", section.url);
        self.write(&format!("preview{}", section.url), html.as_bytes())?;

        Ok(page.components.len())
    }

    /// Copy the stylesheet and write the shared preview script and styles.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let stylesheet =
            fs::read(&self.config.stylesheet).map_err(|source| BuildError::ReadError {
                path: self.config.stylesheet.display().to_string(),
                source,
            })?;
        self.write("preview/css/app.css", &stylesheet)?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).map_err(BuildError::AssetError)?
        } else {
            css
        };
        self.write("preview/css/preview.css", css.as_bytes())?;

        self.write("preview/js/preview.js", AssetPipeline::generate_js().as_bytes())?;

        Ok(())
    }

    fn write(&self, path: &str, contents: &[u8]) -> Result<(), BuildError> {
        self.storage
            .write(path, contents)
            .map_err(|source| BuildError::WriteError {
                path: path.to_string(),
                source,
            })
    }
}
