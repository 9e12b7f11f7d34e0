//! Color handling: symbolic named-color resolution and color-space helpers

mod resolver;
mod space;

use std::collections::BTreeMap;

use thiserror::Error;

pub use resolver::{apply_named_colors, resolve_color};
pub use space::{hex_to_rgb, hex_to_rgba, rgb_to_hsl, rgb_triple_string};

/// Flat mapping from color name to color expression
pub type ColorMap = BTreeMap<String, String>;

/// Errors raised while resolving or converting colors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Referenced name is absent from the named-color mapping
    #[error("named color '{name}' is not present")]
    MissingNamedColor { name: String },

    /// A named color resolves directly to its own reference
    #[error("named color '{name}' is set to resolve to itself")]
    SelfReference { name: String },

    /// Chasing the reference produced nothing
    #[error("cannot find named color '{name}'")]
    EmptyResolution { name: String },

    /// Value could not be read as a hex color
    #[error("invalid hex color '{value}'")]
    InvalidHex { value: String },
}
