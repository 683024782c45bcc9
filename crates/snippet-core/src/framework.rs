//! Framework configuration trait for CLI binaries
//!
//! Each binary describes the UI framework it scaffolds for: how its generator
//! is invoked and which naming conventions its generated code follows.

use crate::config::Conventions;

/// Configuration trait for a scaffolding target
///
/// Implementations define:
/// - Identity (name, display name, docs link)
/// - The generator program and the environment variable overriding it
/// - The exact argument lists for leaf and container creation
/// - Naming conventions (defaults can be overridden from `snippets.yaml`)
pub trait FrameworkConfig: Clone + Send + Sync + 'static {
    /// Internal name (used in log targets and the env var prefix)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Generator executable (e.g. `ng`)
    fn generator_program(&self) -> &'static str;

    /// Environment variable overriding the generator command line
    fn generator_env(&self) -> &'static str;

    /// URL for generator documentation
    fn docs_url(&self) -> &'static str;

    /// Arguments creating a leaf component at `path`, exported by the module
    /// found from `owner`, with the given tag selector
    fn leaf_args(&self, path: &str, owner: &str, tag: &str, force: bool) -> Vec<String>;

    /// Arguments creating a container module at `path`
    fn container_args(&self, path: &str, force: bool) -> Vec<String>;

    /// Naming conventions of generated code
    fn conventions(&self) -> Conventions {
        Conventions::default()
    }
}
