//! Theme and application definition documents
//!
//! A master theme definition (`*.master.definition.json`) describes one
//! theme independently of any host application: its variant, its own
//! named-color overrides and its metadata. An application definition
//! (`*.<app>.definition.json`) carries the per-application attributes of
//! the same theme, matched by `id`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::color::ColorMap;
use crate::template::{AttributeMap, Extends, NamedColorTemplate};

/// Which product tier a theme ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductTier {
    Ultimate,
    /// Any tier other than `ultimate` ships with the community edition
    #[default]
    #[serde(other)]
    Community,
}

impl std::fmt::Display for ProductTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductTier::Community => write!(f, "community"),
            ProductTier::Ultimate => write!(f, "ultimate"),
        }
    }
}

impl std::str::FromStr for ProductTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "community" => Ok(ProductTier::Community),
            "ultimate" => Ok(ProductTier::Ultimate),
            other => Err(format!("unknown product tier '{}'", other)),
        }
    }
}

/// Horizontal placement of a sticker image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stickers {
    pub default: Sticker,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<Sticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
}

/// A payload carrying only colors
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorScheme {
    #[serde(default)]
    pub colors: ColorMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_scheme: Option<ColorScheme>,
}

/// A master theme definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDefinition {
    pub id: String,
    #[serde(default)]
    pub character_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_name: Option<String>,
    pub dark: bool,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub product: ProductTier,
    /// Explicit parent of the theme's named colors, defaults to the variant root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,
    #[serde(default)]
    pub colors: ColorMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ThemeOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stickers: Option<Stickers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_scheme: Option<ColorScheme>,
}

impl ThemeDefinition {
    /// Name of the root named-color template for this theme's variant
    pub fn variant(&self) -> &'static str {
        if self.dark {
            "dark"
        } else {
            "light"
        }
    }

    /// The theme's own colors viewed as a named-color template
    ///
    /// The template carries the `dark` marker so that, without an explicit
    /// `extends`, it inherits from the variant root.
    pub fn as_named_color_template(&self) -> NamedColorTemplate {
        NamedColorTemplate {
            name: self.id.clone(),
            extends: self.extends.clone(),
            dark: Some(self.dark),
            colors: self.colors.clone(),
        }
    }

    /// Display name prefixed with the group's label, when one is known
    pub fn display_name(&self, group_labels: &HashMap<String, String>) -> String {
        let name = if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        };
        match group_labels.get(&self.group) {
            Some(label) => format!("{}{}", label, name),
            None => name.clone(),
        }
    }

    /// Whether the theme is built for the given product tier
    pub fn ships_with(&self, product: ProductTier) -> bool {
        self.product != ProductTier::Ultimate || product == ProductTier::Ultimate
    }
}

/// Application definitions are matched to master themes by id
pub trait AppDefinition {
    fn id(&self) -> &str;
}

/// Look-and-feel section of an application definition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppLaf {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,
    #[serde(default)]
    pub ui: AttributeMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundPositioning {
    pub anchor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BackgroundPositionings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<BackgroundPositioning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<BackgroundPositioning>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_scheme: Option<HashMap<String, ColorMap>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<HashMap<String, ColorMap>>,
}

/// The attributes every application definition shares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseAppDefinition {
    pub id: String,
    #[serde(default)]
    pub overrides: AppOverrides,
    #[serde(default)]
    pub laf: AppLaf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backgrounds: Option<BackgroundPositionings>,
    #[serde(default)]
    pub syntax: AttributeMap,
    #[serde(default)]
    pub colors: ColorMap,
}

impl AppDefinition for BaseAppDefinition {
    fn id(&self) -> &str {
        &self.id
    }
}
