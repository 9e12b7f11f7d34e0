//! Error types for the theme build pipeline

use std::path::PathBuf;

use thiserror::Error;

use crate::color::ColorError;
use crate::script::ScriptError;
use crate::template::TemplateError;

/// Errors raised while reading templates and definitions from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LoadError {
    /// Create an I/O error for a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON parse error for a path
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Errors that can occur while building a theme
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("color error: {0}")]
    Color(#[from] ColorError),

    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// A master theme has no definition for the application being built
    #[error("{theme}'s theme does not have a {app} definition")]
    MissingAppDefinition { theme: String, app: String },

    /// No theme with the requested id was found
    #[error("theme not found: {id}")]
    ThemeNotFound { id: String },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
