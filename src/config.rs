//! Build configuration
//!
//! The configuration names the theme repository to read, the application
//! whose definitions are being built and the product tier. It can be loaded
//! from a TOML file and adjusted with the builder methods.
//!
//! ```toml
//! repo = "../doki-master"
//! app = "jupyter"
//! product = "ultimate"
//!
//! [groups]
//! "Re:Zero" = "Re:Zero: "
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LoadError;
use crate::theme::ProductTier;

/// Configuration for a theme build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Root of the theme repository
    pub repo: PathBuf,
    /// Application whose `<app>.definition.json` files are read
    pub app: String,
    /// Product tier; ultimate-only themes are skipped for community builds
    pub product: ProductTier,
    /// Display-name prefixes per theme group
    pub groups: HashMap<String, String>,
}

/// TOML structure for deserializing the configuration
#[derive(Deserialize)]
struct TomlConfig {
    repo: Option<PathBuf>,
    app: Option<String>,
    product: Option<ProductTier>,
    #[serde(default)]
    groups: HashMap<String, String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            repo: PathBuf::from("."),
            app: String::new(),
            product: ProductTier::Community,
            groups: HashMap::new(),
        }
    }
}

impl BuildConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// A relative `repo` is taken relative to the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let mut config = Self::from_str(&content)?;
        if config.repo.is_relative() {
            if let Some(parent) = path.parent() {
                config.repo = parent.join(&config.repo);
            }
        }
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, LoadError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        Ok(BuildConfig {
            repo: parsed.repo.unwrap_or(defaults.repo),
            app: parsed.app.unwrap_or(defaults.app),
            product: parsed.product.unwrap_or(defaults.product),
            groups: parsed.groups,
        })
    }

    /// Set the repository root
    pub fn with_repo(mut self, repo: impl Into<PathBuf>) -> Self {
        self.repo = repo.into();
        self
    }

    /// Set the application name
    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = app.into();
        self
    }

    /// Set the product tier
    pub fn with_product(mut self, product: ProductTier) -> Self {
        self.product = product;
        self
    }

    /// Add a display-name prefix for a group
    pub fn with_group(mut self, group: impl Into<String>, label: impl Into<String>) -> Self {
        self.groups.insert(group.into(), label.into());
        self
    }

    /// The directory layout of the configured repository
    pub fn paths(&self) -> ProjectPaths {
        ProjectPaths::resolve(&self.repo)
    }
}

/// Conventional directory layout of a theme repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub repo: PathBuf,
    /// `masterThemes/`
    pub master_themes: PathBuf,
    /// `masterThemes/templates/`
    pub master_templates: PathBuf,
    /// `masterThemes/definitions/`
    pub master_definitions: PathBuf,
    /// `buildSrc/assets/themes/`, the application definitions
    pub app_definitions: PathBuf,
    /// `buildSrc/assets/templates/`, the application's script templates
    pub app_templates: PathBuf,
}

impl ProjectPaths {
    pub fn resolve(repo: &Path) -> Self {
        let master_themes = repo.join("masterThemes");
        let assets = repo.join("buildSrc").join("assets");
        Self {
            repo: repo.to_path_buf(),
            master_templates: master_themes.join("templates"),
            master_definitions: master_themes.join("definitions"),
            master_themes,
            app_definitions: assets.join("themes"),
            app_templates: assets.join("templates"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert_eq!(config.repo, PathBuf::from("."));
        assert_eq!(config.product, ProductTier::Community);
        assert!(config.app.is_empty());
    }

    #[test]
    fn test_builder_pattern() {
        let config = BuildConfig::new()
            .with_repo("/themes")
            .with_app("jupyter")
            .with_product(ProductTier::Ultimate)
            .with_group("Re:Zero", "Re:Zero: ");

        assert_eq!(config.repo, PathBuf::from("/themes"));
        assert_eq!(config.app, "jupyter");
        assert_eq!(config.product, ProductTier::Ultimate);
        assert_eq!(config.groups["Re:Zero"], "Re:Zero: ");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
repo = "/srv/doki"
app = "vscode"
product = "ultimate"

[groups]
"Re:Zero" = "Re:Zero: "
"#;
        let config = BuildConfig::from_str(toml_str).expect("Should parse");
        assert_eq!(config.repo, PathBuf::from("/srv/doki"));
        assert_eq!(config.app, "vscode");
        assert_eq!(config.product, ProductTier::Ultimate);
        assert_eq!(config.groups.len(), 1);
    }

    #[test]
    fn test_parse_toml_partial() {
        let config = BuildConfig::from_str(r#"app = "jetbrains""#).expect("Should parse");
        assert_eq!(config.app, "jetbrains");
        assert_eq!(config.repo, PathBuf::from("."));
        assert_eq!(config.product, ProductTier::Community);
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = BuildConfig::from_str("product = 3");
        assert!(matches!(result, Err(LoadError::Toml(_))));
        assert!(BuildConfig::from_str("this is not valid toml {{{{").is_err());
    }

    #[test]
    fn test_project_paths() {
        let paths = ProjectPaths::resolve(Path::new("/repo"));
        assert_eq!(paths.master_templates, PathBuf::from("/repo/masterThemes/templates"));
        assert_eq!(paths.master_definitions, PathBuf::from("/repo/masterThemes/definitions"));
        assert_eq!(paths.app_definitions, PathBuf::from("/repo/buildSrc/assets/themes"));
        assert_eq!(paths.app_templates, PathBuf::from("/repo/buildSrc/assets/templates"));
    }
}
