//! Symbolic color resolution
//!
//! A color expression is either a literal (`#ff00aa`) or a reference of the
//! form `&name&suffix`. References are looked up in a named-color mapping and
//! chased until a literal is reached; the suffix (usually an alpha channel)
//! is appended to the resolved value.

use super::{ColorError, ColorMap};

/// Resolve a color expression against a named-color mapping
///
/// Only a value that points straight back at its own expression is
/// reported as a cycle. Longer cycles recurse until the stack runs out, so
/// the mapping must be acyclic.
///
/// # Example
///
/// ```rust
/// use themesmith::color::{resolve_color, ColorMap};
///
/// let mut named = ColorMap::new();
/// named.insert("accent".into(), "#00FF00".into());
///
/// assert_eq!(resolve_color("&accent&80", &named).unwrap(), "#00FF0080");
/// assert_eq!(resolve_color("#FF0000", &named).unwrap(), "#FF0000");
/// ```
pub fn resolve_color(expression: &str, named_colors: &ColorMap) -> Result<String, ColorError> {
    let Some(start) = expression.find('&') else {
        return Ok(expression.to_string());
    };
    let end = expression.rfind('&').unwrap_or(start);
    let name = if end > start {
        &expression[start + 1..end]
    } else {
        ""
    };

    let value = named_colors
        .get(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ColorError::MissingNamedColor {
            name: name.to_string(),
        })?;

    if value == expression {
        return Err(ColorError::SelfReference {
            name: name.to_string(),
        });
    }

    let resolved = resolve_color(value, named_colors)?;
    if resolved.is_empty() {
        return Err(ColorError::EmptyResolution {
            name: name.to_string(),
        });
    }

    Ok(resolved + &expression[end + 1..])
}

/// Resolve every value of a color map, keeping its keys
pub fn apply_named_colors(colors: &ColorMap, named_colors: &ColorMap) -> Result<ColorMap, ColorError> {
    colors
        .iter()
        .map(|(key, color)| Ok((key.clone(), resolve_color(color, named_colors)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(pairs: &[(&str, &str)]) -> ColorMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_literal_is_unchanged() {
        assert_eq!(resolve_color("#FF0000", &ColorMap::new()).unwrap(), "#FF0000");
    }

    #[test]
    fn test_reference_with_alpha_suffix() {
        let colors = named(&[("accent", "#00FF00")]);
        assert_eq!(resolve_color("&accent&80", &colors).unwrap(), "#00FF0080");
    }

    #[test]
    fn test_chained_references() {
        let colors = named(&[
            ("base", "#123456"),
            ("accent", "&base&"),
            ("selection", "&accent&66"),
        ]);
        assert_eq!(resolve_color("&selection&", &colors).unwrap(), "#12345666");
        assert_eq!(resolve_color("&selection&10", &colors).unwrap(), "#1234566610");
    }

    #[test]
    fn test_self_reference_is_rejected() {
        let colors = named(&[("x", "&x&")]);
        let err = resolve_color("&x&", &colors).unwrap_err();
        assert!(matches!(err, ColorError::SelfReference { ref name } if name == "x"));
    }

    #[test]
    fn test_missing_named_color() {
        let err = resolve_color("&missing&", &ColorMap::new()).unwrap_err();
        assert!(matches!(err, ColorError::MissingNamedColor { ref name } if name == "missing"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let colors = named(&[("blank", "")]);
        assert!(matches!(
            resolve_color("&blank&", &colors),
            Err(ColorError::MissingNamedColor { .. })
        ));
    }

    #[test]
    fn test_missing_link_deeper_in_chain() {
        let colors = named(&[("accent", "&gone&")]);
        let err = resolve_color("&accent&", &colors).unwrap_err();
        assert!(matches!(err, ColorError::MissingNamedColor { ref name } if name == "gone"));
    }

    #[test]
    fn test_apply_named_colors() {
        let palette = named(&[("fg", "#eeeeee"), ("bg", "#111111")]);
        let ui = named(&[("text", "&fg&"), ("panel", "&bg&cc"), ("border", "#000000")]);

        let resolved = apply_named_colors(&ui, &palette).unwrap();
        assert_eq!(
            resolved,
            named(&[
                ("border", "#000000"),
                ("panel", "#111111cc"),
                ("text", "#eeeeee"),
            ])
        );
    }

    #[test]
    fn test_apply_named_colors_propagates_errors() {
        let ui = named(&[("text", "&fg&")]);
        assert!(apply_named_colors(&ui, &ColorMap::new()).is_err());
    }
}
