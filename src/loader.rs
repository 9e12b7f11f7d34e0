//! Reading templates and definitions from a theme repository

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{BuildError, LoadError};
use crate::template::{Template, TemplateKind, TemplateSet};
use crate::theme::AppDefinition;

/// File name suffix of master theme definitions
pub const MASTER_DEFINITION_SUFFIX: &str = "master.definition.json";

/// List every file below a directory, in file-name order
pub fn walk_dir(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    debug!(dir = %dir.display(), files = files.len(), "walked directory");
    Ok(files)
}

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| LoadError::json(path, e))
}

/// Read every template file among `paths` into its namespace
///
/// Files that are not templates are skipped.
pub fn read_templates(paths: &[PathBuf]) -> Result<TemplateSet, BuildError> {
    let mut set = TemplateSet::new();
    for path in paths {
        let Some(kind) = TemplateKind::from_path(path) else {
            continue;
        };
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let template = Template::from_json(kind, &content).map_err(|e| LoadError::json(path, e))?;
        debug!(path = %path.display(), name = template.name(), ?kind, "read template");
        set.register(template)?;
    }
    Ok(set)
}

/// Walk a directory and read all templates below it
pub fn load_templates(dir: &Path) -> Result<TemplateSet, BuildError> {
    let set = read_templates(&walk_dir(dir)?)?;
    if set.is_empty() {
        warn!(dir = %dir.display(), "no templates found");
    }
    Ok(set)
}

/// Read the `<app>.definition.json` files below a directory, keyed by id
pub fn load_app_definitions<A>(dir: &Path, app: &str) -> Result<HashMap<String, A>, LoadError>
where
    A: AppDefinition + DeserializeOwned,
{
    let suffix = format!("{}.definition.json", app);
    let mut definitions = HashMap::new();
    for path in walk_dir(dir)? {
        if !has_suffix(&path, &suffix) {
            continue;
        }
        let definition: A = read_json(&path)?;
        definitions.insert(definition.id().to_string(), definition);
    }
    debug!(app, definitions = definitions.len(), "read app definitions");
    Ok(definitions)
}

/// Paths of every master theme definition below a directory
pub fn find_theme_definitions(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    Ok(walk_dir(dir)?
        .into_iter()
        .filter(|path| has_suffix(path, MASTER_DEFINITION_SUFFIX))
        .collect())
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_suffix() {
        assert!(has_suffix(Path::new("a/rem.master.definition.json"), MASTER_DEFINITION_SUFFIX));
        assert!(has_suffix(Path::new("rem.jupyter.definition.json"), "jupyter.definition.json"));
        assert!(!has_suffix(Path::new("rem.vscode.definition.json"), "jupyter.definition.json"));
    }

    #[test]
    fn test_read_json_missing_file() {
        let result: Result<serde_json::Value, _> = read_json(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_read_templates_skips_unknown_files() {
        let set = read_templates(&[PathBuf::from("README.md"), PathBuf::from("notes.txt")]).unwrap();
        assert!(set.is_empty());
    }
}
