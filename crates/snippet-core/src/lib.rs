//! Snippet Core - Shared library for generating UI components from snippets
//!
//! This library turns a directory tree of markup snippets into framework
//! components. For every snippet it drives the framework's own generator to
//! create the component and its enclosing modules, then fills in the template,
//! wires each module to its parent and writes a Storybook story.
//!
//! It is designed to be used by CLI binaries (e.g. `ng-snippets`) that supply
//! a [`FrameworkConfig`] describing how the generator is invoked.
//!
//! # Architecture
//!
//! - **Naming** - Pure functions deriving every identifier from a snippet path
//! - **Codegen** - Structural source edits: class renames, module imports, stories
//! - **Pipeline** - Per-snippet orchestration over the [`Workspace`] and [`Scaffolder`] seams
//!
//! # Example Usage
//!
//! ```ignore
//! use snippet_core::{Conventions, DiskWorkspace, Pipeline, ProcessScaffolder, SnippetSettings};
//!
//! let settings = SnippetSettings::load(&root, None)?;
//! let command = snippet_core::config::resolve_generator(&MyConfig, None);
//! let scaffolder = ProcessScaffolder::new(MyConfig, command, ".");
//! let mut pipeline = Pipeline::new(DiskWorkspace::new("."), scaffolder, Conventions::default());
//! let report = pipeline.generate_all(&root, &settings).await?;
//! report.print_summary(&root);
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod framework;
pub mod hierarchy;
pub mod leaf;
pub mod naming;
pub mod pipeline;
pub mod runtime;
pub mod snippets;
pub mod workspace;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export main types for convenience
pub use config::{Conventions, GeneratorCommand};
pub use error::ScaffoldError;
pub use framework::FrameworkConfig;
pub use naming::DerivedNames;
pub use pipeline::{BatchReport, GeneratedLeaf, Pipeline, SnippetFailure};
pub use runtime::{check_generator, GeneratorInfo, ProcessScaffolder, Scaffolder};
pub use snippets::{SnippetFile, SnippetSettings};
pub use workspace::{DiskWorkspace, Workspace};
