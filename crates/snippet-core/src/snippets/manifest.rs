//! Snippet tree settings (`snippets.yaml`) types and parsing

use crate::config::Conventions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the optional settings file at the root of the snippet tree
pub const SETTINGS_FILE: &str = "snippets.yaml";

/// Settings read from `snippets.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetSettings {
    /// Extension (without dot) of snippet files
    #[serde(default = "default_extension")]
    pub extension: String,

    /// File-name patterns to skip: `*suffix`, `prefix*` or an exact name
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Overrides of the framework's naming conventions
    #[serde(default)]
    pub conventions: Option<Conventions>,
}

fn default_extension() -> String {
    "txt".to_string()
}

impl Default for SnippetSettings {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            ignore: Vec::new(),
            conventions: None,
        }
    }
}

impl SnippetSettings {
    /// Read settings from an explicit file, or from `snippets.yaml` in the
    /// snippet root when present. Without either, defaults apply.
    pub fn load(snippet_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = snippet_root.join(SETTINGS_FILE);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Conventions to generate with: the file's section, else the given defaults
    pub fn conventions_or(&self, defaults: Conventions) -> Conventions {
        self.conventions.clone().unwrap_or(defaults)
    }

    /// Whether a file name matches one of the `ignore` patterns
    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignore.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                file_name.ends_with(suffix)
            } else if let Some(prefix) = pattern.strip_suffix('*') {
                file_name.starts_with(prefix)
            } else {
                file_name == pattern
            }
        })
    }

    /// Whether a path has the snippet extension
    pub fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_patterns() {
        let settings = SnippetSettings {
            ignore: vec![
                "*.draft.txt".to_string(),
                "_*".to_string(),
                "README.txt".to_string(),
            ],
            ..SnippetSettings::default()
        };

        assert!(settings.is_ignored("hero.draft.txt"));
        assert!(settings.is_ignored("_partial.txt"));
        assert!(settings.is_ignored("README.txt"));
        assert!(!settings.is_ignored("hero.txt"));
        assert!(!settings.is_ignored("readme.txt"));
    }

    #[test]
    fn test_extension_match_is_exact() {
        let settings = SnippetSettings::default();
        assert!(settings.has_extension(Path::new("cards/basic.txt")));
        assert!(!settings.has_extension(Path::new("cards/basic.html")));
        assert!(!settings.has_extension(Path::new("cards/basic")));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SnippetSettings::load(dir.path(), None).unwrap();
        assert_eq!(settings, SnippetSettings::default());
    }

    #[test]
    fn test_load_from_snippet_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "extension: html\nignore:\n  - \"_*\"\nconventions:\n  tag_prefix: ui\n",
        )
        .unwrap();

        let settings = SnippetSettings::load(dir.path(), None).unwrap();
        assert_eq!(settings.extension, "html");
        assert_eq!(settings.ignore, vec!["_*"]);

        let conventions = settings.conventions_or(Conventions::default());
        assert_eq!(conventions.tag_prefix, "ui");
        assert_eq!(conventions.container_suffix, "Module");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(SnippetSettings::load(dir.path(), Some(&missing)).is_err());
    }
}
