//! Per-snippet orchestration
//!
//! For each snippet file, in scan order:
//!
//! 1. read it and derive every name
//! 2. make sure its container chain exists and is wired ([`crate::hierarchy`])
//! 3. generate the leaf, fill its template, rename its class, write its story
//!    ([`crate::leaf`])
//!
//! A failure aborts only the snippet being processed. Files are handled one at
//! a time because the generator mutates shared module files.

use crate::config::Conventions;
use crate::error::ScaffoldError;
use crate::hierarchy::{ContainerNode, HierarchyState};
use crate::leaf::LeafOutcome;
use crate::naming::DerivedNames;
use crate::runtime::Scaffolder;
use crate::snippets::{scan_snippets, SnippetFile, SnippetSettings};
use crate::workspace::Workspace;
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Everything produced for one snippet
#[derive(Debug, Clone)]
pub struct GeneratedLeaf {
    pub snippet: PathBuf,
    pub names: DerivedNames,
    pub containers: Vec<ContainerNode>,
    pub outcome: LeafOutcome,
}

/// A snippet whose pipeline failed
#[derive(Debug)]
pub struct SnippetFailure {
    pub snippet: PathBuf,
    pub error: ScaffoldError,
}

/// Result of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub generated: Vec<GeneratedLeaf>,
    pub failures: Vec<SnippetFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.generated.len() + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Leaves generated without an enclosing container, hence without a story
    pub fn without_story(&self) -> usize {
        self.generated
            .iter()
            .filter(|g| g.outcome.story.is_none())
            .count()
    }

    /// Print the colored end-of-run summary
    pub fn print_summary(&self, snippet_root: &Path) {
        println!();
        println!(
            "{} {} of {} snippet(s) from {}",
            "Generated".green().bold(),
            self.generated.len(),
            self.total(),
            snippet_root.display()
        );
        let without_story = self.without_story();
        if without_story > 0 {
            println!(
                "{} {} component(s) without a story (no enclosing module)",
                "Note:".yellow(),
                without_story
            );
        }
        if !self.failures.is_empty() {
            println!("{} {} snippet(s):", "Failed".red().bold(), self.failures.len());
            for failure in &self.failures {
                println!("  {} {}", "✗".red(), failure.snippet.display());
                println!("    {}", failure.error);
            }
        }
    }
}

/// Drives generation against a workspace and a scaffolder
pub struct Pipeline<W: Workspace, S: Scaffolder> {
    pub(crate) workspace: W,
    pub(crate) scaffolder: S,
    pub(crate) conventions: Conventions,
    pub(crate) state: HierarchyState,
}

impl<W: Workspace, S: Scaffolder> Pipeline<W, S> {
    pub fn new(workspace: W, scaffolder: S, conventions: Conventions) -> Self {
        Self {
            workspace,
            scaffolder,
            conventions,
            state: HierarchyState::default(),
        }
    }

    /// Run the whole pipeline for one snippet file under `root`
    pub async fn process(&mut self, root: &Path, path: &Path) -> Result<GeneratedLeaf, ScaffoldError> {
        let snippet = SnippetFile::load(root, path).await?;
        let names = DerivedNames::derive(
            &snippet.relative_dir,
            &snippet.base_name,
            &snippet.display_dir,
            &self.conventions,
        )?;

        let containers = self.build_hierarchy(&names).await?;
        let outcome = self.generate_leaf(&snippet, &names).await?;

        Ok(GeneratedLeaf {
            snippet: snippet.path,
            names,
            containers,
            outcome,
        })
    }

    /// Process `files` in order, isolating failures per file
    pub async fn run(&mut self, root: &Path, files: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::default();

        for path in files {
            let relative = path.strip_prefix(root).unwrap_or(path);
            println!("  {} {}", "->".blue(), relative.display());

            match self.process(root, path).await {
                Ok(generated) => {
                    println!(
                        "  {} {} {}",
                        "->".blue(),
                        generated.names.leaf_type_name,
                        "done".green()
                    );
                    report.generated.push(generated);
                }
                Err(error) => {
                    tracing::error!(file = %path.display(), error = %error, "failed to process snippet");
                    println!("  {} {} {}", "->".blue(), relative.display(), "failed".red());
                    report.failures.push(SnippetFailure {
                        snippet: path.clone(),
                        error,
                    });
                }
            }
        }

        report
    }

    /// Scan `root` for snippets and process all of them
    pub async fn generate_all(
        &mut self,
        root: &Path,
        settings: &SnippetSettings,
    ) -> Result<BatchReport> {
        let files = scan_snippets(root, settings)?;
        if files.is_empty() {
            tracing::warn!(root = %root.display(), "No .{} files found", settings.extension);
            return Ok(BatchReport::default());
        }

        println!(
            "{}",
            format!("Generating components for {} snippet(s)...", files.len())
                .cyan()
                .bold()
        );
        println!();

        Ok(self.run(root, &files).await)
    }
}
