//! Themesmith - theme generation from hierarchical templates
//!
//! This library composes inherited template documents into flat attribute
//! maps, resolves symbolic `&name&` color references, and fills
//! `{{variable}}` placeholders in script templates, so that one set of
//! master themes can be turned into assets for several host applications.
//!
//! # Example
//!
//! ```rust
//! use themesmith::color::ColorMap;
//! use themesmith::fill;
//!
//! let mut variables = ColorMap::new();
//! variables.insert("accent".into(), "#3d7aff".into());
//! variables.insert("selection".into(), "&accent&66".into());
//!
//! let css = fill("::selection { background: {{selection}}; }", &variables).unwrap();
//! assert_eq!(css, "::selection { background: #3d7aff66; }");
//! ```

pub mod build;
pub mod color;
pub mod config;
pub mod error;
pub mod loader;
pub mod palette;
pub mod script;
pub mod template;
pub mod theme;

pub use build::{evaluate_templates, sticker_path, ThemeContext};
pub use color::{resolve_color, ColorError, ColorMap};
pub use config::{BuildConfig, ProjectPaths};
pub use error::{BuildError, LoadError};
pub use palette::{build_named_color_mapping, compose_laf, compose_syntax, resolve_attributes};
pub use script::{fill, fill_with, HexResolver, RgbResolver, ScriptError, VariableResolver};
pub use template::{compose, compose_single, merge_override, TemplateError, TemplateSet};
pub use theme::{AppDefinition, BaseAppDefinition, ProductTier, ThemeDefinition};
