//! Script template filling
//!
//! Script templates are plain text (CSS, JavaScript, XML, ...) with
//! `{{variable}}` placeholders. A placeholder may list fallbacks separated by
//! `|` (`{{selectionBackground|accentColor}}`) and may be prefixed with `^` to
//! ask for the color as an RGB triple instead of hex. A single `{` never opens
//! a placeholder, so the braces of the host language pass through untouched.

use thiserror::Error;

use crate::color::{hex_to_rgb, resolve_color, rgb_triple_string, ColorError, ColorMap};

/// Sigil requesting RGB output for a variable
pub const RGB_SIGIL: char = '^';

/// Errors raised while filling a script template
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// None of the `|`-separated names is set
    #[error("template does not have variable {variable}")]
    MissingVariable { variable: String },

    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Turns the text between `{{` and `}}` into its replacement
pub trait VariableResolver {
    fn resolve(&self, token: &str, variables: &ColorMap) -> Result<String, ScriptError>;
}

impl<F> VariableResolver for F
where
    F: Fn(&str, &ColorMap) -> Result<String, ScriptError>,
{
    fn resolve(&self, token: &str, variables: &ColorMap) -> Result<String, ScriptError> {
        self(token, variables)
    }
}

/// Resolves placeholders to color expressions, chasing `&name&` references
#[derive(Debug, Clone, Copy, Default)]
pub struct HexResolver;

impl VariableResolver for HexResolver {
    fn resolve(&self, token: &str, variables: &ColorMap) -> Result<String, ScriptError> {
        let variable = token.strip_prefix(RGB_SIGIL).unwrap_or(token);
        let value = lookup_variable(variables, variable)?;
        Ok(resolve_color(value, variables)?)
    }
}

/// Like [`HexResolver`], but `^`-prefixed placeholders become `r, g, b`
#[derive(Debug, Clone, Copy, Default)]
pub struct RgbResolver;

impl VariableResolver for RgbResolver {
    fn resolve(&self, token: &str, variables: &ColorMap) -> Result<String, ScriptError> {
        let hex = HexResolver.resolve(token, variables)?;
        if token.starts_with(RGB_SIGIL) {
            Ok(rgb_triple_string(hex_to_rgb(&hex)?))
        } else {
            Ok(hex)
        }
    }
}

/// Pick the first name of a `|`-separated list that has a non-empty value
pub fn lookup_variable<'a>(variables: &'a ColorMap, variable: &str) -> Result<&'a str, ScriptError> {
    variable
        .split('|')
        .filter_map(|name| variables.get(name))
        .find(|value| !value.is_empty())
        .map(|value| value.as_str())
        .ok_or_else(|| ScriptError::MissingVariable {
            variable: variable.to_string(),
        })
}

/// Fill a script template using the default [`HexResolver`]
///
/// # Example
///
/// ```rust
/// use themesmith::color::ColorMap;
/// use themesmith::script::fill;
///
/// let mut variables = ColorMap::new();
/// variables.insert("accent".into(), "#ff0000".into());
///
/// let css = fill(".link { color: {{accent}}; }", &variables).unwrap();
/// assert_eq!(css, ".link { color: #ff0000; }");
/// ```
pub fn fill(script: &str, variables: &ColorMap) -> Result<String, ScriptError> {
    fill_with(script, variables, &HexResolver)
}

/// Fill a script template with a custom resolver
pub fn fill_with<R>(script: &str, variables: &ColorMap, resolver: &R) -> Result<String, ScriptError>
where
    R: VariableResolver + ?Sized,
{
    let lines = script
        .split('\n')
        .map(|line| fill_line(line, variables, resolver))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

/// Scanner state, local to a single line
enum ScanState {
    Plain,
    /// Saw one `{`
    Staging,
    /// Inside `{{`, holding the text read so far
    InTemplate(String),
}

fn fill_line<R>(line: &str, variables: &ColorMap, resolver: &R) -> Result<String, ScriptError>
where
    R: VariableResolver + ?Sized,
{
    let mut out = String::with_capacity(line.len());
    let mut state = ScanState::Plain;

    for c in line.chars() {
        state = match state {
            ScanState::Plain if c == '{' => ScanState::Staging,
            ScanState::Plain => {
                out.push(c);
                ScanState::Plain
            }
            ScanState::Staging if c == '{' => ScanState::InTemplate(String::new()),
            ScanState::Staging => {
                out.push('{');
                out.push(c);
                ScanState::Plain
            }
            ScanState::InTemplate(mut token) => {
                if c == '}' && token.ends_with('}') {
                    token.pop();
                    out.push_str(&resolver.resolve(&token, variables)?);
                    ScanState::Plain
                } else {
                    token.push(c);
                    ScanState::InTemplate(token)
                }
            }
        };
    }

    // a dangling `{` is kept; an open placeholder survives only on an
    // otherwise empty line
    match state {
        ScanState::Plain => {}
        ScanState::Staging => out.push('{'),
        ScanState::InTemplate(token) if out.is_empty() => {
            out.push_str("{{");
            out.push_str(&token);
        }
        ScanState::InTemplate(_) => {}
    }

    Ok(out)
}
