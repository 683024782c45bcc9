//! File-system access to the project being generated into
//!
//! All paths handed to a [`Workspace`] are relative to the project root, the
//! same root the generator runs in.

use crate::error::ScaffoldError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Read/write capability over the project tree
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Whether a file exists at `path`
    async fn exists(&self, path: &Path) -> bool;

    /// Read a file as text
    async fn read(&self, path: &Path) -> Result<String, ScaffoldError>;

    /// Write raw bytes to a file, creating parent directories as needed
    async fn write_bytes(&self, path: &Path, contents: &[u8]) -> Result<(), ScaffoldError>;

    /// Write a text file, creating parent directories as needed
    async fn write(&self, path: &Path, contents: &str) -> Result<(), ScaffoldError> {
        self.write_bytes(path, contents.as_bytes()).await
    }
}

/// Workspace backed by the real file system under `root`
#[derive(Debug, Clone)]
pub struct DiskWorkspace {
    root: PathBuf,
}

impl DiskWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl Workspace for DiskWorkspace {
    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(self.resolve(path))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn read(&self, path: &Path) -> Result<String, ScaffoldError> {
        let full = self.resolve(path);
        fs::read_to_string(&full)
            .await
            .map_err(|e| ScaffoldError::io(full, e))
    }

    async fn write_bytes(&self, path: &Path, contents: &[u8]) -> Result<(), ScaffoldError> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::io(parent, e))?;
        }
        fs::write(&full, contents)
            .await
            .map_err(|e| ScaffoldError::io(full, e))
    }
}
