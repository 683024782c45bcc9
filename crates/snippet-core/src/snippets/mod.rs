//! Snippet discovery and settings
//!
//! This module provides:
//! - Snippet tree settings (`snippets.yaml`)
//! - Recursive discovery of snippet files
//! - Loading a snippet into its naming parts and raw content

pub mod manifest;
pub mod scanner;

pub use manifest::{SnippetSettings, SETTINGS_FILE};
pub use scanner::{scan_snippets, SnippetFile};
