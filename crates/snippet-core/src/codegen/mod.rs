//! Generated source manipulation
//!
//! This module provides:
//! - Import specifiers between generated files
//! - Exported class renaming in generated components
//! - Structural patching of container module imports
//! - Story file rendering

pub mod component;
pub mod import_path;
pub mod ng_module;
pub mod story;

pub use component::rename_exported_class;
pub use import_path::{relative_import, slash_path};
pub use ng_module::{add_declared_import, add_import_statement, declared_imports, PatchOutcome};
pub use story::StoryDescriptor;
