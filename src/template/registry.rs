//! Template documents and the per-kind namespaces that hold them

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ColorMap;

/// Flat attribute payload of layout and syntax templates
pub type AttributeMap = BTreeMap<String, serde_json::Value>;

/// Errors that can occur during template operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Template not found in its namespace
    #[error("template not found: {name}")]
    NotFound { name: String },

    /// Duplicate template definition
    #[error("duplicate template definition: {name}")]
    Duplicate { name: String },
}

/// Parent references of a template: one name or a list of names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    /// Parent names in declaration order
    pub fn names(&self) -> Vec<String> {
        match self {
            Extends::One(name) => vec![name.clone()],
            Extends::Many(names) => names.clone(),
        }
    }

    /// The first declared parent
    pub fn first(&self) -> Option<&str> {
        match self {
            Extends::One(name) => Some(name.as_str()),
            Extends::Many(names) => names.first().map(|s| s.as_str()),
        }
    }
}

impl From<&str> for Extends {
    fn from(name: &str) -> Self {
        Extends::One(name.to_string())
    }
}

/// Common view over every template kind
pub trait TemplateDocument {
    /// Unique name inside the namespace
    fn name(&self) -> &str;

    /// Declared parents, empty for a root template
    fn parents(&self) -> Vec<String>;
}

/// Named-color template (`*.colors.template.json`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedColorTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,
    /// Variant marker; templates carrying it inherit from the matching
    /// `dark`/`light` root when they declare no explicit parent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<bool>,
    #[serde(default)]
    pub colors: ColorMap,
}

/// Look-and-feel template (`*.laf.template.json`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LafTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,
    #[serde(default)]
    pub ui: AttributeMap,
}

/// Syntax-highlighting template (`*.syntax.template.json`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SyntaxTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,
    #[serde(default)]
    pub colors: AttributeMap,
}

macro_rules! impl_template_document {
    ($($ty:ty),*) => {
        $(
            impl TemplateDocument for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn parents(&self) -> Vec<String> {
                    self.extends.as_ref().map(Extends::names).unwrap_or_default()
                }
            }
        )*
    };
}

impl_template_document!(NamedColorTemplate, LafTemplate, SyntaxTemplate);

/// The kinds of template a template directory can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Laf,
    Syntax,
    NamedColors,
}

impl TemplateKind {
    /// File name suffix identifying this kind
    pub fn file_suffix(self) -> &'static str {
        match self {
            TemplateKind::Laf => "laf.template.json",
            TemplateKind::Syntax => "syntax.template.json",
            TemplateKind::NamedColors => "colors.template.json",
        }
    }

    /// Classify a file by its name, `None` for anything that is not a template
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        [TemplateKind::Laf, TemplateKind::Syntax, TemplateKind::NamedColors]
            .into_iter()
            .find(|kind| file_name.ends_with(kind.file_suffix()))
    }
}

/// A template of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    Laf(LafTemplate),
    Syntax(SyntaxTemplate),
    NamedColors(NamedColorTemplate),
}

impl Template {
    /// Parse a JSON document as a template of the given kind
    pub fn from_json(kind: TemplateKind, content: &str) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            TemplateKind::Laf => Template::Laf(serde_json::from_str(content)?),
            TemplateKind::Syntax => Template::Syntax(serde_json::from_str(content)?),
            TemplateKind::NamedColors => Template::NamedColors(serde_json::from_str(content)?),
        })
    }

    pub fn kind(&self) -> TemplateKind {
        match self {
            Template::Laf(_) => TemplateKind::Laf,
            Template::Syntax(_) => TemplateKind::Syntax,
            Template::NamedColors(_) => TemplateKind::NamedColors,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Template::Laf(t) => t.name(),
            Template::Syntax(t) => t.name(),
            Template::NamedColors(t) => t.name(),
        }
    }
}

/// Read-only mapping from template name to template, one per template kind
#[derive(Debug, Clone)]
pub struct Namespace<T> {
    templates: HashMap<String, T>,
}

impl<T> Default for Namespace<T> {
    fn default() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }
}

impl<T: TemplateDocument> Namespace<T> {
    /// Create a new empty namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under its own name
    pub fn register(&mut self, template: T) -> Result<(), TemplateError> {
        if self.templates.contains_key(template.name()) {
            return Err(TemplateError::Duplicate {
                name: template.name().to_string(),
            });
        }
        self.templates.insert(template.name().to_string(), template);
        Ok(())
    }

    /// Register a template, builder style
    pub fn with(mut self, template: T) -> Result<Self, TemplateError> {
        self.register(template)?;
        Ok(self)
    }
}

impl<T> Namespace<T> {
    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&T> {
        self.templates.get(name)
    }

    /// Get a template by name, failing when it is absent
    pub fn lookup(&self, name: &str) -> Result<&T, TemplateError> {
        self.templates.get(name).ok_or_else(|| TemplateError::NotFound {
            name: name.to_string(),
        })
    }

    /// Check if a template exists
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Get all template names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Every template namespace of a template directory
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    pub laf: Namespace<LafTemplate>,
    pub syntax: Namespace<SyntaxTemplate>,
    pub named_colors: Namespace<NamedColorTemplate>,
}

impl TemplateSet {
    /// Create a new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a template into the namespace of its kind
    pub fn register(&mut self, template: Template) -> Result<(), TemplateError> {
        match template {
            Template::Laf(t) => self.laf.register(t),
            Template::Syntax(t) => self.syntax.register(t),
            Template::NamedColors(t) => self.named_colors.register(t),
        }
    }

    /// Total number of templates across namespaces
    pub fn len(&self) -> usize {
        self.laf.len() + self.syntax.len() + self.named_colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
