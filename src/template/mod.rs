//! Template system for inherited theme documents
//!
//! Templates are JSON documents grouped by kind (look-and-feel, syntax,
//! named colors). Each one may extend one or more parents from the same
//! namespace; composition flattens that chain into a single payload where
//! children override their ancestors.
//!
//! # Example
//!
//! ```json
//! { "name": "base", "colors": { "accent": "#3d7aff" } }
//! { "name": "dark", "extends": "base", "colors": { "background": "#1e1f22" } }
//! ```

mod composer;
mod registry;

pub use composer::{compose, compose_declared, compose_single, merge_override};
pub use registry::{
    AttributeMap, Extends, LafTemplate, NamedColorTemplate, Namespace, SyntaxTemplate, Template,
    TemplateDocument, TemplateError, TemplateKind, TemplateSet,
};
