//! Settings-file loading.
//!
//! The resolver never parses files itself; it asks a [`SettingsLoader`] for a
//! [`ConfigMap`]. [`YamlLoader`] is the loader used by default.
//!
//! ## Inheritance
//!
//! A settings file may list parent files under a top-level `inherit` key:
//!
//! ```yaml
//! inherit: ["base.yml", "print.yml"]
//! booktitle: Second Edition
//! ```
//!
//! Parents are resolved relative to the directory of the file naming them and
//! are merged in list order, so `print.yml` overrides `base.yml`. The file
//! itself is merged last. The `inherit` key does not appear in the result.

use crate::convert::config_map_from_yaml;
use crate::error::LoadError;
use crate::merge::deep_merge;
use crate::types::{ConfigMap, ConfigValue};
use std::path::{Path, PathBuf};
use yaml_rust2::YamlLoader as YamlParser;

const INHERIT_KEY: &str = "inherit";

/// Turns a settings file into a nested mapping.
pub trait SettingsLoader {
    fn load_file(&self, path: &Path) -> Result<ConfigMap, LoadError>;
}

/// YAML settings loader with `inherit` support.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLoader;

impl SettingsLoader for YamlLoader {
    fn load_file(&self, path: &Path) -> Result<ConfigMap, LoadError> {
        let mut chain = Vec::new();
        load_with_parents(path, &mut chain)
    }
}

/// Parse YAML settings text.
///
/// Only the first document is read. An empty document is an empty mapping.
/// `origin` names the source in error messages.
pub fn parse_settings(content: &str, origin: &Path) -> Result<ConfigMap, LoadError> {
    let documents = YamlParser::load_from_str(content).map_err(|e| LoadError::Syntax {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    let Some(document) = documents.into_iter().next() else {
        return Ok(ConfigMap::new());
    };
    if document.is_null() {
        return Ok(ConfigMap::new());
    }

    config_map_from_yaml(document).ok_or_else(|| LoadError::NotAMapping {
        path: origin.to_path_buf(),
    })
}

/// `chain` holds the files currently being loaded, outermost first.
fn load_with_parents(path: &Path, chain: &mut Vec<PathBuf>) -> Result<ConfigMap, LoadError> {
    let identity = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if chain.contains(&identity) {
        return Err(LoadError::CircularInherit { path: identity });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut settings = parse_settings(&content, path)?;

    let Some(inherit) = settings.shift_remove(INHERIT_KEY) else {
        return Ok(settings);
    };
    let parents = inherit_paths(&inherit, path)?;

    chain.push(identity);
    let mut merged = ConfigMap::new();
    for parent in &parents {
        tracing::debug!("{} inherits {}", path.display(), parent.display());
        let parent_settings = load_with_parents(parent, chain)?;
        deep_merge(&mut merged, parent_settings);
    }
    chain.pop();

    deep_merge(&mut merged, settings);
    Ok(merged)
}

fn inherit_paths(inherit: &ConfigValue, path: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let invalid = || LoadError::InvalidInherit {
        path: path.to_path_buf(),
    };
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

    match inherit {
        ConfigValue::Null => Ok(Vec::new()),
        ConfigValue::String(name) => Ok(vec![base_dir.join(name)]),
        ConfigValue::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(|name| base_dir.join(name)).ok_or_else(invalid))
            .collect(),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_plain_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yml", "review_version: 5.0\nbookname: sample\n");

        let settings = YamlLoader.load_file(&path).unwrap();
        assert_eq!(settings["bookname"], ConfigValue::from("sample"));
    }

    #[test]
    fn test_empty_file_is_empty_mapping() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yml", "");
        assert!(YamlLoader.load_file(&path).unwrap().is_empty());

        let path = write(&dir, "comments.yml", "# nothing here\n");
        assert!(YamlLoader.load_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = YamlLoader
            .load_file(&dir.path().join("absent.yml"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_syntax_error_carries_message() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yml", "bookname: [unclosed\n");

        match YamlLoader.load_file(&path).unwrap_err() {
            LoadError::Syntax { message, .. } => assert!(!message.is_empty()),
            other => panic!("expected Syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_mapping_root() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yml", "- one\n- two\n");
        assert!(matches!(
            YamlLoader.load_file(&path).unwrap_err(),
            LoadError::NotAMapping { .. }
        ));
    }

    #[test]
    fn test_inherit_merges_parents_then_self() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "base.yml",
            "booktitle: Base\nlanguage: en\npdfmaker:\n  makeindex: true\n  use_cover_nombre: false\n",
        );
        write(&dir, "print.yml", "booktitle: Print\npdfmaker:\n  makeindex: false\n");
        let path = write(
            &dir,
            "config.yml",
            "inherit: [base.yml, print.yml]\nbookname: child\n",
        );

        let settings = YamlLoader.load_file(&path).unwrap();

        assert!(!settings.contains_key("inherit"));
        assert_eq!(settings["bookname"], ConfigValue::from("child"));
        // later parent wins over earlier parent
        assert_eq!(settings["booktitle"], ConfigValue::from("Print"));
        assert_eq!(settings["language"], ConfigValue::from("en"));
        let pdfmaker = &settings["pdfmaker"];
        assert_eq!(pdfmaker.get("makeindex"), Some(&ConfigValue::Bool(false)));
        assert_eq!(pdfmaker.get("use_cover_nombre"), Some(&ConfigValue::Bool(false)));
    }

    #[test]
    fn test_child_overrides_parent() {
        let dir = TempDir::new().unwrap();
        write(&dir, "base.yml", "booktitle: Base\n");
        let path = write(&dir, "config.yml", "inherit: [base.yml]\nbooktitle: Child\n");

        let settings = YamlLoader.load_file(&path).unwrap();
        assert_eq!(settings["booktitle"], ConfigValue::from("Child"));
    }

    #[test]
    fn test_inherit_is_relative_to_including_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "shared/common.yml", "language: ja\n");
        write(&dir, "shared/print.yml", "inherit: [common.yml]\ntexcommand: lualatex\n");
        let path = write(&dir, "config.yml", "inherit: [shared/print.yml]\n");

        let settings = YamlLoader.load_file(&path).unwrap();
        assert_eq!(settings["language"], ConfigValue::from("ja"));
        assert_eq!(settings["texcommand"], ConfigValue::from("lualatex"));
    }

    #[test]
    fn test_circular_inherit_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.yml", "inherit: [b.yml]\n");
        write(&dir, "b.yml", "inherit: [a.yml]\n");

        let err = YamlLoader.load_file(&dir.path().join("a.yml")).unwrap_err();
        assert!(matches!(err, LoadError::CircularInherit { .. }));
    }

    #[test]
    fn test_diamond_inherit_is_not_circular() {
        let dir = TempDir::new().unwrap();
        write(&dir, "root.yml", "language: en\n");
        write(&dir, "left.yml", "inherit: [root.yml]\n");
        write(&dir, "right.yml", "inherit: [root.yml]\n");
        let path = write(&dir, "config.yml", "inherit: [left.yml, right.yml]\n");

        let settings = YamlLoader.load_file(&path).unwrap();
        assert_eq!(settings["language"], ConfigValue::from("en"));
    }

    #[test]
    fn test_invalid_inherit_value() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yml", "inherit: [1, 2]\n");
        assert!(matches!(
            YamlLoader.load_file(&path).unwrap_err(),
            LoadError::InvalidInherit { .. }
        ));
    }
}
