//! Container module hierarchy
//!
//! Every directory above a leaf becomes a container module. For a leaf at
//! `layout/grids/two-col` the chain is:
//!
//! ```text
//! src/app/layout/layout.module.ts        LayoutModule
//! src/app/layout/grids/grids.module.ts   GridsModule   (imports LayoutModule)
//! ```
//!
//! Each container is created at most once, and each "imports its parent"
//! wiring is applied at most once. [`HierarchyState`] remembers both for the
//! current run; the file system is only consulted for what the state has not
//! seen yet, which keeps repeated runs over the same tree idempotent.

use crate::codegen::{
    add_declared_import, add_import_statement, relative_import, slash_path, PatchOutcome,
};
use crate::config::Conventions;
use crate::error::ScaffoldError;
use crate::naming::{kebab_from_pascal, sanitize, DerivedNames};
use crate::pipeline::Pipeline;
use crate::runtime::Scaffolder;
use crate::workspace::Workspace;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One ancestor level of a leaf. In a chain, the parent of node `i` is node `i - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerNode {
    /// Directory relative to the source root
    pub dir: PathBuf,
    /// Module class name, suffix included
    pub name: String,
    /// Module source file relative to the project root
    pub file: PathBuf,
}

/// Containers the current run has already materialized and wired
#[derive(Debug, Default)]
pub struct HierarchyState {
    materialized: HashSet<PathBuf>,
    wired: HashSet<(PathBuf, String)>,
}

impl HierarchyState {
    pub fn is_materialized(&self, file: &Path) -> bool {
        self.materialized.contains(file)
    }

    pub fn mark_materialized(&mut self, file: PathBuf) {
        self.materialized.insert(file);
    }

    /// Whether `file` is known to import `parent`
    pub fn is_wired(&self, file: &Path, parent: &str) -> bool {
        self.wired.contains(&(file.to_path_buf(), parent.to_string()))
    }

    pub fn mark_wired(&mut self, file: PathBuf, parent: String) {
        self.wired.insert((file, parent));
    }

    pub fn materialized_count(&self) -> usize {
        self.materialized.len()
    }
}

/// The chain of containers enclosing a leaf, outermost first
pub fn container_chain(names: &DerivedNames, conventions: &Conventions) -> Vec<ContainerNode> {
    let mut dir = PathBuf::new();
    names
        .segments
        .iter()
        .zip(&names.container_names)
        .map(|(segment, pascal)| {
            dir.push(segment);
            ContainerNode {
                dir: dir.clone(),
                name: conventions.container_type(pascal),
                file: conventions.container_file(&dir, &sanitize(segment)),
            }
        })
        .collect()
}

impl<W: Workspace, S: Scaffolder> Pipeline<W, S> {
    /// Make sure every ancestor container of the leaf exists and imports the
    /// container above it.
    pub(crate) async fn build_hierarchy(
        &mut self,
        names: &DerivedNames,
    ) -> Result<Vec<ContainerNode>, ScaffoldError> {
        let chain = container_chain(names, &self.conventions);
        for (i, node) in chain.iter().enumerate() {
            self.ensure_container(node).await?;
            if i > 0 {
                self.wire_parent(node, &chain[i - 1]).await?;
            }
        }
        Ok(chain)
    }

    async fn ensure_container(&mut self, node: &ContainerNode) -> Result<(), ScaffoldError> {
        if self.state.is_materialized(&node.file) {
            return Ok(());
        }

        if self.workspace.exists(&node.file).await {
            tracing::debug!(
                container = %node.name,
                file = %node.file.display(),
                "module already exists"
            );
        } else {
            tracing::info!(
                container = %node.name,
                file = %node.file.display(),
                "generating module"
            );
            self.scaffolder
                .create_container(&slash_path(&node.dir), true)
                .await?;
            if !self.workspace.exists(&node.file).await {
                return Err(ScaffoldError::SkeletonMissing(node.file.clone()));
            }
        }

        self.state.mark_materialized(node.file.clone());
        Ok(())
    }

    /// Add `parent` to `node`'s import statements and declared imports
    async fn wire_parent(
        &mut self,
        node: &ContainerNode,
        parent: &ContainerNode,
    ) -> Result<(), ScaffoldError> {
        if self.state.is_wired(&node.file, &parent.name) {
            return Ok(());
        }

        let parent_stem = kebab_from_pascal(self.conventions.container_base(&parent.name));
        let parent_file = self.conventions.container_file(&parent.dir, &parent_stem);
        let from_dir = node.file.parent().unwrap_or_else(|| Path::new(""));
        let specifier = relative_import(from_dir, &parent_file);

        let original = self.workspace.read(&node.file).await?;
        let mut source = original.clone();

        if let Some(patched) = add_import_statement(&source, &parent.name, &specifier) {
            tracing::info!(
                container = %node.name,
                parent = %parent.name,
                from = %specifier,
                "added import statement"
            );
            source = patched;
        }

        let declared = match add_declared_import(&source, &parent.name) {
            PatchOutcome::Patched(patched) => {
                tracing::info!(
                    container = %node.name,
                    parent = %parent.name,
                    "added to imports array"
                );
                source = patched;
                true
            }
            PatchOutcome::Unchanged => true,
            PatchOutcome::Unpatched => {
                tracing::error!(
                    file = %node.file.display(),
                    parent = %parent.name,
                    "could not find imports array; manual intervention may be required"
                );
                false
            }
        };

        if source != original {
            self.workspace.write(&node.file, &source).await?;
        }
        if declared {
            self.state.mark_wired(node.file.clone(), parent.name.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::declared_imports;
    use crate::test_helpers::{derive, pipeline, MODULE_WITHOUT_IMPORTS};

    #[test]
    fn test_chain_for_nested_leaf() {
        let names = derive(&["layout", "grids"], "two-col");
        let chain = container_chain(&names, &Conventions::default());
        assert_eq!(
            chain,
            vec![
                ContainerNode {
                    dir: PathBuf::from("layout"),
                    name: "LayoutModule".to_string(),
                    file: PathBuf::from("src/app/layout/layout.module.ts"),
                },
                ContainerNode {
                    dir: PathBuf::from("layout/grids"),
                    name: "GridsModule".to_string(),
                    file: PathBuf::from("src/app/layout/grids/grids.module.ts"),
                },
            ]
        );
    }

    #[test]
    fn test_chain_for_root_leaf_is_empty() {
        let names = derive(&[], "footer");
        assert!(container_chain(&names, &Conventions::default()).is_empty());
    }

    #[tokio::test]
    async fn test_creates_missing_containers_and_wires_child_to_parent() {
        let (mut pipeline, workspace, scaffolder) = pipeline();
        let names = derive(&["layout", "grids"], "two-col");

        pipeline.build_hierarchy(&names).await.unwrap();

        assert_eq!(scaffolder.calls(), vec!["module layout", "module layout/grids"]);
        let grids = workspace
            .get("src/app/layout/grids/grids.module.ts")
            .unwrap();
        assert!(grids.starts_with("import { LayoutModule } from '../layout.module';\n"));
        assert_eq!(
            declared_imports(&grids).unwrap(),
            vec!["CommonModule", "LayoutModule"]
        );
        let layout = workspace.get("src/app/layout/layout.module.ts").unwrap();
        assert!(!layout.contains("import { GridsModule }"));
    }

    #[tokio::test]
    async fn test_existing_containers_are_not_regenerated() {
        let (mut pipeline, workspace, scaffolder) = pipeline();
        workspace.insert(
            "src/app/layout/layout.module.ts",
            "@NgModule({\n  imports: [CommonModule]\n})\nexport class LayoutModule {}\n",
        );
        let names = derive(&["layout"], "two-col");

        pipeline.build_hierarchy(&names).await.unwrap();

        assert!(scaffolder.calls().is_empty());
        assert_eq!(pipeline.state.materialized_count(), 1);
    }

    #[tokio::test]
    async fn test_second_pass_does_not_touch_disk_again() {
        let (mut pipeline, workspace, scaffolder) = pipeline();
        let names = derive(&["layout", "grids"], "two-col");

        pipeline.build_hierarchy(&names).await.unwrap();
        let first = workspace.snapshot();
        pipeline.build_hierarchy(&names).await.unwrap();

        assert_eq!(workspace.snapshot(), first);
        assert_eq!(scaffolder.calls().len(), 2);
        assert!(pipeline
            .state
            .is_wired(Path::new("src/app/layout/grids/grids.module.ts"), "LayoutModule"));
    }

    #[tokio::test]
    async fn test_generator_failure_propagates() {
        let (mut pipeline, _workspace, scaffolder) = pipeline();
        scaffolder.fail_on("layout/grids");
        let names = derive(&["layout", "grids"], "two-col");

        let err = pipeline.build_hierarchy(&names).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::GeneratorFailed { .. }));
    }

    #[tokio::test]
    async fn test_generator_writing_nothing_is_an_error() {
        let (mut pipeline, _workspace, scaffolder) = pipeline();
        scaffolder.write_nothing_for("layout");
        let names = derive(&["layout"], "two-col");

        let err = pipeline.build_hierarchy(&names).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::SkeletonMissing(_)));
    }

    #[tokio::test]
    async fn test_missing_imports_array_is_inserted_into_decorator() {
        let (mut pipeline, workspace, _scaffolder) = pipeline();
        workspace.insert("src/app/layout/layout.module.ts", MODULE_WITHOUT_IMPORTS);
        workspace.insert("src/app/layout/grids/grids.module.ts", MODULE_WITHOUT_IMPORTS);
        let names = derive(&["layout", "grids"], "two-col");

        pipeline.build_hierarchy(&names).await.unwrap();

        let grids = workspace
            .get("src/app/layout/grids/grids.module.ts")
            .unwrap();
        assert_eq!(declared_imports(&grids).unwrap(), vec!["LayoutModule"]);
    }

    #[tokio::test]
    async fn test_unpatchable_module_keeps_import_line_and_is_not_marked_wired() {
        let (mut pipeline, workspace, _scaffolder) = pipeline();
        workspace.insert("src/app/layout/layout.module.ts", "export const layout = 1;\n");
        workspace.insert(
            "src/app/layout/grids/grids.module.ts",
            "export const grids = 2;\n",
        );
        let names = derive(&["layout", "grids"], "two-col");

        pipeline.build_hierarchy(&names).await.unwrap();

        let grids = workspace
            .get("src/app/layout/grids/grids.module.ts")
            .unwrap();
        assert_eq!(
            grids,
            "import { LayoutModule } from '../layout.module';\nexport const grids = 2;\n"
        );
        assert!(!pipeline
            .state
            .is_wired(Path::new("src/app/layout/grids/grids.module.ts"), "LayoutModule"));
    }

    #[tokio::test]
    async fn test_non_array_imports_is_left_alone_and_not_marked_wired() {
        let (mut pipeline, workspace, _scaffolder) = pipeline();
        let grids = "@NgModule({\n  imports: SHARED_IMPORTS\n})\nexport class GridsModule { }\n";
        workspace.insert("src/app/layout/layout.module.ts", MODULE_WITHOUT_IMPORTS);
        workspace.insert("src/app/layout/grids/grids.module.ts", grids);
        let names = derive(&["layout", "grids"], "two-col");

        pipeline.build_hierarchy(&names).await.unwrap();

        let patched = workspace
            .get("src/app/layout/grids/grids.module.ts")
            .unwrap();
        assert_eq!(
            patched,
            format!("import {{ LayoutModule }} from '../layout.module';\n{}", grids)
        );
        assert_eq!(patched.matches("imports:").count(), 1);
        assert!(!pipeline
            .state
            .is_wired(Path::new("src/app/layout/grids/grids.module.ts"), "LayoutModule"));
    }

    #[tokio::test]
    async fn test_parent_import_stem_comes_from_class_name() {
        let (mut pipeline, workspace, _scaffolder) = pipeline();
        let names = derive(&["x-ray", "scans"], "chest");

        let chain = pipeline.build_hierarchy(&names).await.unwrap();

        assert_eq!(chain[0].name, "XRayModule");
        assert_eq!(chain[0].file, PathBuf::from("src/app/x-ray/x-ray.module.ts"));
        // The stem is rebuilt from `XRay`, which has no lower-to-upper boundary
        let scans = workspace
            .get("src/app/x-ray/scans/scans.module.ts")
            .unwrap();
        assert!(scans.starts_with("import { XRayModule } from '../xray.module';\n"));
        assert_eq!(
            declared_imports(&scans).unwrap(),
            vec!["CommonModule", "XRayModule"]
        );
    }
}
