//! Snippet discovery under a root directory

use super::manifest::SnippetSettings;
use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// One discovered snippet, read and split into the parts names derive from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetFile {
    /// Path as discovered (snippet root joined with the relative path)
    pub path: PathBuf,
    /// Directory segments between the root and the file, as on disk
    pub relative_dir: Vec<String>,
    /// `relative_dir` with percent-escapes decoded, for display
    pub display_dir: Vec<String>,
    /// File name without extension
    pub base_name: String,
    /// Raw file content, in whatever encoding it was saved with; written
    /// back byte-for-byte as the template
    pub content: Vec<u8>,
}

impl SnippetFile {
    /// Read a snippet discovered under `root`
    pub async fn load(root: &Path, path: &Path) -> Result<Self, ScaffoldError> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| ScaffoldError::io(path, e))?;
        Ok(Self::from_parts(root, path, content))
    }

    /// Split a path under `root` into its naming parts
    pub fn from_parts(root: &Path, path: &Path, content: impl Into<Vec<u8>>) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative_dir: Vec<String> = relative
            .parent()
            .map(|dir| {
                dir.components()
                    .filter_map(|c| match c {
                        Component::Normal(part) => Some(os_to_string(part)),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let display_dir = relative_dir.iter().map(|s| decode_segment(s)).collect();
        let base_name = path.file_stem().map(os_to_string).unwrap_or_default();

        Self {
            path: path.to_path_buf(),
            relative_dir,
            display_dir,
            base_name,
            content: content.into(),
        }
    }
}

/// Non-UTF-8 names cannot carry a name; they degrade to an empty string
fn os_to_string(part: &OsStr) -> String {
    match part.to_str() {
        Some(s) => s.to_string(),
        None => {
            tracing::warn!(name = ?part, "non-UTF-8 name in snippet path");
            String::new()
        }
    }
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

/// Recursively collect snippet files under `root`, in file-name order.
///
/// A missing root is reported and yields no files.
pub fn scan_snippets(root: &Path, settings: &SnippetSettings) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "snippet directory does not exist");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to scan {}", root.display()))?;
        if !entry.file_type().is_file() || !settings.has_extension(entry.path()) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if settings.is_ignored(&file_name) {
            tracing::debug!(file = %entry.path().display(), "ignored snippet");
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}
