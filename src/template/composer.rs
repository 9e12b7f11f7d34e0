//! Template composition - flattens inheritance chains into one payload

use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use super::registry::{Namespace, TemplateDocument, TemplateError};

/// Shallow merge where keys of `overrides` replace the same keys of `base`
///
/// Nested values are replaced wholesale, never merged.
pub fn merge_override<K: Ord, V>(mut base: BTreeMap<K, V>, overrides: BTreeMap<K, V>) -> BTreeMap<K, V> {
    base.extend(overrides);
    base
}

/// Compose a template with all of its ancestors
///
/// Layers are combined from the most distant ancestors down to the
/// template itself, each layer overriding the previous one:
///
/// 1. a template without parents yields its own payload;
/// 2. the direct parents' own payloads are combined left to right, so a
///    later parent wins over an earlier one;
/// 3. the direct parents' parents are deduplicated and composed
///    recursively, then combined left to right into the base;
/// 4. the result is `base`, overridden by the direct parents, overridden by
///    the template.
///
/// The namespace must be acyclic; cycles are not detected.
///
/// # Example
///
/// ```rust
/// use themesmith::template::{compose, merge_override, Extends, Namespace, NamedColorTemplate, TemplateDocument};
///
/// let base = NamedColorTemplate {
///     name: "base".into(),
///     colors: [("x".to_string(), "2".to_string()), ("y".to_string(), "3".to_string())].into(),
///     ..Default::default()
/// };
/// let child = NamedColorTemplate {
///     name: "child".into(),
///     extends: Some(Extends::from("base")),
///     colors: [("x".to_string(), "1".to_string())].into(),
///     ..Default::default()
/// };
/// let namespace = Namespace::new().with(base).unwrap();
///
/// let colors = compose(&child, &namespace, |t| t.colors.clone(), |t| t.parents(), merge_override).unwrap();
/// assert_eq!(colors["x"], "1");
/// assert_eq!(colors["y"], "3");
/// ```
pub fn compose<T, R, A, P, C>(
    template: &T,
    namespace: &Namespace<T>,
    attribute_of: A,
    parents_of: P,
    combine: C,
) -> Result<R, TemplateError>
where
    A: Fn(&T) -> R,
    P: Fn(&T) -> Vec<String>,
    C: Fn(R, R) -> R,
{
    compose_inner(template, namespace, &attribute_of, &parents_of, &combine)
}

fn compose_inner<T, R, A, P, C>(
    template: &T,
    namespace: &Namespace<T>,
    attribute_of: &A,
    parents_of: &P,
    combine: &C,
) -> Result<R, TemplateError>
where
    A: Fn(&T) -> R,
    P: Fn(&T) -> Vec<String>,
    C: Fn(R, R) -> R,
{
    let parent_names = parents_of(template);
    if parent_names.is_empty() {
        return Ok(attribute_of(template));
    }

    let parents = parent_names
        .iter()
        .map(|name| namespace.lookup(name))
        .collect::<Result<Vec<_>, _>>()?;
    trace!(parents = ?parent_names, "composing template");

    let Some(direct) = parents.iter().map(|&p| attribute_of(p)).reduce(combine) else {
        return Ok(attribute_of(template));
    };

    let mut seen = HashSet::new();
    let grandparent_names: Vec<String> = parents
        .iter()
        .flat_map(|&p| parents_of(p))
        .filter(|name| seen.insert(name.clone()))
        .collect();

    let Some(base) = grandparent_names
        .iter()
        .map(|name| {
            let grandparent = namespace.lookup(name)?;
            compose_inner(grandparent, namespace, attribute_of, parents_of, combine)
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .reduce(combine)
    else {
        return Ok(combine(direct, attribute_of(template)));
    };

    Ok(combine(combine(base, direct), attribute_of(template)))
}

/// Compose a template through a chain of single parents
///
/// The degenerate form of [`compose`] where every template names at most
/// one parent.
pub fn compose_single<T, R, A, P, C>(
    template: &T,
    namespace: &Namespace<T>,
    attribute_of: A,
    parent_of: P,
    combine: C,
) -> Result<R, TemplateError>
where
    A: Fn(&T) -> R,
    P: Fn(&T) -> Option<String>,
    C: Fn(R, R) -> R,
{
    compose_single_inner(template, namespace, &attribute_of, &parent_of, &combine)
}

fn compose_single_inner<T, R, A, P, C>(
    template: &T,
    namespace: &Namespace<T>,
    attribute_of: &A,
    parent_of: &P,
    combine: &C,
) -> Result<R, TemplateError>
where
    A: Fn(&T) -> R,
    P: Fn(&T) -> Option<String>,
    C: Fn(R, R) -> R,
{
    match parent_of(template) {
        None => Ok(attribute_of(template)),
        Some(name) => {
            let parent = namespace.lookup(&name)?;
            let resolved = compose_single_inner(parent, namespace, attribute_of, parent_of, combine)?;
            Ok(combine(resolved, attribute_of(template)))
        }
    }
}

/// Compose a template using its declared parents and a shallow override merge
pub fn compose_declared<T, K, V, A>(
    template: &T,
    namespace: &Namespace<T>,
    attribute_of: A,
) -> Result<BTreeMap<K, V>, TemplateError>
where
    T: TemplateDocument,
    K: Ord,
    A: Fn(&T) -> BTreeMap<K, V>,
{
    compose(template, namespace, attribute_of, |t| t.parents(), merge_override)
}
