//! Configuration file structure (vitrine.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use vitrine_static::BuildConfig;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub serve: ServeSettings,
}

#[derive(Debug, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog")]
    pub path: PathBuf,
    /// Reject anchor collisions and duplicate hashes
    #[serde(default = "default_true")]
    pub validate: bool,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_stylesheet")]
    pub stylesheet: PathBuf,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_true")]
    pub minify: bool,
}

#[derive(Debug, Deserialize)]
pub struct ServeSettings {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog(),
            validate: true,
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            stylesheet: default_stylesheet(),
            title: default_title(),
            minify: true,
        }
    }
}

impl Default for ServeSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_catalog() -> PathBuf {
    PathBuf::from("catalog.json")
}
fn default_output() -> PathBuf {
    PathBuf::from("output")
}
fn default_stylesheet() -> PathBuf {
    PathBuf::from("css/app.css")
}
fn default_title() -> String {
    "Tailwind UI Components".to_string()
}
fn default_port() -> u16 {
    4000
}
fn default_true() -> bool {
    true
}

impl ConfigFile {
    /// Builder settings, with an optional output directory override.
    pub fn build_config(&self, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
        BuildConfig {
            output_dir: output.unwrap_or_else(|| self.build.output.clone()),
            stylesheet: self.build.stylesheet.clone(),
            title: self.build.title.clone(),
            minify: minify.unwrap_or(self.build.minify),
            validate: self.catalog.validate,
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("vitrine.toml")).unwrap();

        assert_eq!(config.catalog.path, PathBuf::from("catalog.json"));
        assert!(config.catalog.validate);
        assert_eq!(config.build.output, PathBuf::from("output"));
        assert_eq!(config.build.title, "Tailwind UI Components");
        assert_eq!(config.serve.port, 4000);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("vitrine.toml");
        fs::write(&path, "[build]\ntitle = \"My Kit\"\nminify = false\n").unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.build.title, "My Kit");
        assert!(!config.build.minify);
        assert_eq!(config.build.stylesheet, PathBuf::from("css/app.css"));
        assert_eq!(config.catalog.path, PathBuf::from("catalog.json"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("vitrine.toml");
        fs::write(&path, "[build\ntitle = 1").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let config = ConfigFile::default();

        let build = config.build_config(Some(PathBuf::from("dist")), Some(false));

        assert_eq!(build.output_dir, PathBuf::from("dist"));
        assert!(!build.minify);
        assert!(build.validate);
    }
}
