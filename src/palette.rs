//! Named-color tables and color-resolved attribute maps for a theme

use serde_json::Value;
use tracing::debug;

use crate::color::{apply_named_colors, resolve_color, ColorError, ColorMap};
use crate::error::BuildError;
use crate::template::{
    compose, compose_declared, merge_override, AttributeMap, LafTemplate, TemplateSet,
};
use crate::theme::{AppLaf, ThemeDefinition};

/// Build the finalized named-color mapping of a theme
///
/// The shared `dark`/`light` chain of the named-color namespace forms the
/// base. The theme's own colors are composed on top of it, inheriting from
/// the variant root unless the theme names its parent explicitly. Theme
/// colors always win.
pub fn build_named_color_mapping(
    theme: &ThemeDefinition,
    templates: &TemplateSet,
) -> Result<ColorMap, BuildError> {
    let namespace = &templates.named_colors;
    let variant = theme.variant();

    let root = namespace.lookup(variant)?;
    let shared = compose_declared(root, namespace, |t| t.colors.clone())?;

    let own = compose(
        &theme.as_named_color_template(),
        namespace,
        |t| t.colors.clone(),
        |t| match &t.extends {
            Some(extends) => extends.names(),
            None if t.dark.is_some() => vec![variant.to_string()],
            None => Vec::new(),
        },
        merge_override,
    )?;

    // the shared tier is not expected to hold references, this only proves
    // that any it does hold resolve
    let resolved_shared = apply_named_colors(&shared, &own)?;

    let named_colors = merge_override(merge_override(resolved_shared, shared), own);
    debug!(
        theme = %theme.id,
        variant,
        colors = named_colors.len(),
        "built named-color mapping"
    );
    Ok(named_colors)
}

/// Resolve every color expression held in the string values of an attribute map
///
/// Objects and arrays are walked; numbers, booleans and nulls are kept.
pub fn resolve_attributes(
    attributes: &AttributeMap,
    named_colors: &ColorMap,
) -> Result<AttributeMap, ColorError> {
    attributes
        .iter()
        .map(|(key, value)| Ok((key.clone(), resolve_value(value, named_colors)?)))
        .collect()
}

fn resolve_value(value: &Value, named_colors: &ColorMap) -> Result<Value, ColorError> {
    Ok(match value {
        Value::String(expression) => Value::String(resolve_color(expression, named_colors)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_value(item, named_colors))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, field)| Ok((key.clone(), resolve_value(field, named_colors)?)))
                .collect::<Result<_, ColorError>>()?,
        ),
        other => other.clone(),
    })
}

/// Compose an application's look-and-feel section over the laf namespace and
/// resolve its colors
pub fn compose_laf(
    name: &str,
    laf: &AppLaf,
    templates: &TemplateSet,
    named_colors: &ColorMap,
) -> Result<AttributeMap, BuildError> {
    let child = LafTemplate {
        name: name.to_string(),
        extends: laf.extends.clone(),
        ui: laf.ui.clone(),
    };
    let composed = compose_declared(&child, &templates.laf, |t| t.ui.clone())?;
    Ok(resolve_attributes(&composed, named_colors)?)
}

/// Compose a syntax template by name and resolve its colors
pub fn compose_syntax(
    name: &str,
    templates: &TemplateSet,
    named_colors: &ColorMap,
) -> Result<AttributeMap, BuildError> {
    let template = templates.syntax.lookup(name)?;
    let composed = compose_declared(template, &templates.syntax, |t| t.colors.clone())?;
    Ok(resolve_attributes(&composed, named_colors)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Extends, NamedColorTemplate, SyntaxTemplate, Template, TemplateError};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn colors(pairs: &[(&str, &str)]) -> ColorMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn color_template(name: &str, extends: Option<&str>, pairs: &[(&str, &str)]) -> Template {
        Template::NamedColors(NamedColorTemplate {
            name: name.to_string(),
            extends: extends.map(Extends::from),
            dark: None,
            colors: colors(pairs),
        })
    }

    fn templates() -> TemplateSet {
        let mut set = TemplateSet::new();
        for t in [
            color_template("base", None, &[("foreground", "#000000"), ("accent", "#0000ff")]),
            color_template("dark", Some("base"), &[("foreground", "#ffffff"), ("background", "#1e1e1e")]),
            color_template("light", Some("base"), &[("background", "#fafafa")]),
            color_template("high-contrast", Some("dark"), &[("foreground", "#ffff00")]),
        ] {
            set.register(t).unwrap();
        }
        set
    }

    fn theme(json: serde_json::Value) -> ThemeDefinition {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_dark_theme_inherits_dark_chain() {
        let theme = theme(json!({
            "id": "t1", "name": "T1", "dark": true,
            "colors": { "accent": "#ff00ff", "selection": "&accent&80" }
        }));

        let named = build_named_color_mapping(&theme, &templates()).unwrap();
        assert_eq!(
            named,
            colors(&[
                ("accent", "#ff00ff"),
                ("background", "#1e1e1e"),
                ("foreground", "#ffffff"),
                ("selection", "&accent&80"),
            ])
        );
        assert_eq!(resolve_color(&named["selection"], &named).unwrap(), "#ff00ff80");
    }

    #[test]
    fn test_light_theme_uses_light_root() {
        let theme = theme(json!({ "id": "t2", "name": "T2", "dark": false }));
        let named = build_named_color_mapping(&theme, &templates()).unwrap();
        assert_eq!(named["background"], "#fafafa");
        assert_eq!(named["foreground"], "#000000");
    }

    #[test]
    fn test_explicit_extends_wins_over_variant() {
        let theme = theme(json!({
            "id": "t3", "name": "T3", "dark": true, "extends": "high-contrast",
            "colors": { "background": "#000000" }
        }));
        let named = build_named_color_mapping(&theme, &templates()).unwrap();
        assert_eq!(named["foreground"], "#ffff00");
        assert_eq!(named["background"], "#000000");
        assert_eq!(named["accent"], "#0000ff");
    }

    #[test]
    fn test_missing_variant_root_is_reported() {
        let theme = theme(json!({ "id": "t4", "name": "T4", "dark": true }));
        let err = build_named_color_mapping(&theme, &TemplateSet::new()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Template(TemplateError::NotFound { ref name }) if name == "dark"
        ));
    }

    #[test]
    fn test_unresolvable_shared_reference_is_reported() {
        let mut set = TemplateSet::new();
        set.register(color_template("dark", None, &[("border", "&nowhere&")]))
            .unwrap();
        let theme = theme(json!({ "id": "t5", "name": "T5", "dark": true }));

        let err = build_named_color_mapping(&theme, &set).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Color(ColorError::MissingNamedColor { ref name }) if name == "nowhere"
        ));
    }

    #[test]
    fn test_resolve_attributes_walks_nested_values() {
        let named = colors(&[("accent", "#123456")]);
        let attributes: AttributeMap = serde_json::from_value(json!({
            "Button.background": "&accent&",
            "Button.arc": 6,
            "Tree.rowHeight": null,
            "Tabs": { "underline": "&accent&80", "colors": ["&accent&", "#ffffff"] }
        }))
        .unwrap();

        let resolved = resolve_attributes(&attributes, &named).unwrap();
        assert_eq!(resolved["Button.background"], json!("#123456"));
        assert_eq!(resolved["Button.arc"], json!(6));
        assert_eq!(resolved["Tree.rowHeight"], json!(null));
        assert_eq!(
            resolved["Tabs"],
            json!({ "underline": "#12345680", "colors": ["#123456", "#ffffff"] })
        );
    }

    #[test]
    fn test_compose_laf_over_namespace() {
        let mut set = TemplateSet::new();
        set.register(Template::Laf(LafTemplate {
            name: "base".to_string(),
            extends: None,
            ui: serde_json::from_value(json!({
                "Panel.background": "&background&",
                "Label.foreground": "&foreground&"
            }))
            .unwrap(),
        }))
        .unwrap();
        let laf = AppLaf {
            extends: Some(Extends::from("base")),
            ui: serde_json::from_value(json!({ "Label.foreground": "#abcdef" })).unwrap(),
        };
        let named = colors(&[("background", "#101010"), ("foreground", "#eeeeee")]);

        let ui = compose_laf("app", &laf, &set, &named).unwrap();
        assert_eq!(ui["Panel.background"], json!("#101010"));
        assert_eq!(ui["Label.foreground"], json!("#abcdef"));
    }

    #[test]
    fn test_compose_syntax_by_name() {
        let mut set = TemplateSet::new();
        for t in [
            SyntaxTemplate {
                name: "base".to_string(),
                extends: None,
                colors: serde_json::from_value(json!({ "keyword": "&accent&", "string": "#00ff00" }))
                    .unwrap(),
            },
            SyntaxTemplate {
                name: "dark".to_string(),
                extends: Some(Extends::from("base")),
                colors: serde_json::from_value(json!({ "string": "#aaffaa" })).unwrap(),
            },
        ] {
            set.register(Template::Syntax(t)).unwrap();
        }
        let named = colors(&[("accent", "#ff8800")]);

        let syntax = compose_syntax("dark", &set, &named).unwrap();
        assert_eq!(syntax["keyword"], json!("#ff8800"));
        assert_eq!(syntax["string"], json!("#aaffaa"));
    }
}
