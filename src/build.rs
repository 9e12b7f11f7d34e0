//! Theme build pipeline
//!
//! Reads the template namespaces, the application definitions and the master
//! theme definitions of a repository, pairs every master theme with its
//! application definition, drops themes outside the configured product tier
//! and hands each remaining theme to a caller-provided builder.

use std::path::{Component, Path};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::color::ColorMap;
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::loader::{find_theme_definitions, load_app_definitions, load_templates, read_json};
use crate::palette::{build_named_color_mapping, compose_laf};
use crate::script::{fill_with, VariableResolver};
use crate::template::{merge_override, AttributeMap, TemplateSet};
use crate::theme::{AppDefinition, BaseAppDefinition, ThemeDefinition};

/// Everything a builder needs to produce one theme
#[derive(Debug)]
pub struct ThemeContext<'a, A> {
    pub definition_path: &'a Path,
    pub definition: &'a ThemeDefinition,
    pub templates: &'a TemplateSet,
    pub app_definition: &'a A,
    pub config: &'a BuildConfig,
}

impl<A> ThemeContext<'_, A> {
    /// The theme's finalized named-color mapping
    pub fn named_colors(&self) -> Result<ColorMap, BuildError> {
        build_named_color_mapping(self.definition, self.templates)
    }

    /// Display name with the configured group prefix
    pub fn display_name(&self) -> String {
        self.definition.display_name(&self.config.groups)
    }

    /// Path of the theme's default sticker, relative to the definitions directory
    pub fn sticker_path(&self) -> Option<String> {
        let stickers = self.definition.stickers.as_ref()?;
        sticker_path(
            self.definition_path,
            &stickers.default.name,
            &self.config.paths().master_definitions,
        )
    }
}

impl ThemeContext<'_, BaseAppDefinition> {
    /// Named colors overridden by the application's own colors
    pub fn script_variables(&self) -> Result<ColorMap, BuildError> {
        Ok(merge_override(
            self.named_colors()?,
            self.app_definition.colors.clone(),
        ))
    }

    /// The application's look-and-feel attributes with colors resolved
    pub fn laf(&self) -> Result<AttributeMap, BuildError> {
        compose_laf(
            &self.definition.id,
            &self.app_definition.laf,
            self.templates,
            &self.script_variables()?,
        )
    }

    /// Fill a script template for this theme
    pub fn render<R>(&self, script: &str, resolver: &R) -> Result<String, BuildError>
    where
        R: VariableResolver + ?Sized,
    {
        Ok(fill_with(script, &self.script_variables()?, resolver)?)
    }
}

/// Run `create` for every theme of the configured application and product
pub fn evaluate_templates<A, R, F>(config: &BuildConfig, mut create: F) -> Result<Vec<R>, BuildError>
where
    A: AppDefinition + DeserializeOwned,
    F: FnMut(ThemeContext<'_, A>) -> Result<R, BuildError>,
{
    let paths = config.paths();
    let templates = load_templates(&paths.master_templates)?;
    let app_definitions = load_app_definitions::<A>(&paths.app_definitions, &config.app)?;
    let definition_paths = find_theme_definitions(&paths.master_definitions)?;
    info!(
        app = %config.app,
        product = %config.product,
        templates = templates.len(),
        themes = definition_paths.len(),
        "evaluating themes"
    );

    let mut results = Vec::new();
    for definition_path in &definition_paths {
        let definition: ThemeDefinition = read_json(definition_path)?;
        let app_definition =
            app_definitions
                .get(&definition.id)
                .ok_or_else(|| BuildError::MissingAppDefinition {
                    theme: definition.display_name(&config.groups),
                    app: config.app.clone(),
                })?;

        if !definition.ships_with(config.product) {
            debug!(theme = %definition.id, product = %definition.product, "skipping theme");
            continue;
        }

        debug!(theme = %definition.id, path = %definition_path.display(), "building theme");
        results.push(create(ThemeContext {
            definition_path,
            definition: &definition,
            templates: &templates,
            app_definition,
            config,
        })?);
    }

    Ok(results)
}

/// Resolve a sticker file named in a definition to a `/`-separated path
/// relative to the definitions directory
///
/// Returns `None` when the sticker lies outside that directory.
pub fn sticker_path(definition_path: &Path, sticker: &str, definitions_dir: &Path) -> Option<String> {
    let base = definition_path.parent()?;
    let joined = base.join(sticker);
    let mut resolved = Vec::new();
    for component in joined.components() {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir => {}
            other => resolved.push(other),
        }
    }
    let resolved: std::path::PathBuf = resolved.iter().collect();
    let relative = resolved.strip_prefix(definitions_dir).ok()?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(format!("/{}", parts.join("/")))
}
