//! Leaf component generation and story wiring

use crate::codegen::{relative_import, rename_exported_class, slash_path, StoryDescriptor};
use crate::config::{COMPONENT_FILE_SUFFIX, STORY_FILE_SUFFIX, TEMPLATE_FILE_SUFFIX};
use crate::error::ScaffoldError;
use crate::naming::{sanitize, DerivedNames};
use crate::pipeline::Pipeline;
use crate::runtime::{LeafRequest, Scaffolder};
use crate::snippets::SnippetFile;
use crate::workspace::Workspace;
use std::path::PathBuf;

/// Files written for one leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafOutcome {
    /// Template holding the snippet content
    pub template: PathBuf,
    /// Component source with the renamed class
    pub source: PathBuf,
    /// Story file; `None` for a leaf without an enclosing container
    pub story: Option<PathBuf>,
}

impl<W: Workspace, S: Scaffolder> Pipeline<W, S> {
    /// Generate the leaf, fill its template with the snippet, rename its class
    /// and, when it has a container, write its story.
    pub(crate) async fn generate_leaf(
        &mut self,
        snippet: &SnippetFile,
        names: &DerivedNames,
    ) -> Result<LeafOutcome, ScaffoldError> {
        let component_path = names.component_path();
        let path_arg = slash_path(&component_path);
        self.scaffolder
            .create_leaf(&LeafRequest {
                path: path_arg.clone(),
                owner: path_arg,
                tag: names.tag_name.clone(),
                force: true,
            })
            .await?;

        let component_dir = self.conventions.source_dir(&component_path);
        let template = component_dir.join(format!("{}{}", names.leaf_name, TEMPLATE_FILE_SUFFIX));
        let source = component_dir.join(format!("{}{}", names.leaf_name, COMPONENT_FILE_SUFFIX));

        self.workspace.write_bytes(&template, &snippet.content).await?;
        tracing::debug!(component = %names.leaf_type_name, "updated template");

        let generated = self.workspace.read(&source).await?;
        match rename_exported_class(&generated, &names.leaf_type_name) {
            Some(renamed) if renamed != generated => {
                self.workspace.write(&source, &renamed).await?;
                tracing::debug!(component = %names.leaf_type_name, "updated component class name");
            }
            Some(_) => {}
            None => tracing::warn!(
                file = %source.display(),
                "no exported class found to rename"
            ),
        }

        let (Some(pascal), Some(segment)) = (names.container_names.last(), names.segments.last())
        else {
            tracing::warn!(
                component = %names.leaf_type_name,
                "no enclosing module; skipping story creation"
            );
            return Ok(LeafOutcome {
                template,
                source,
                story: None,
            });
        };

        let module = self.conventions.container_type(pascal);
        let module_file = self
            .conventions
            .container_file(&names.container_path, &sanitize(segment));
        if !self.workspace.exists(&module_file).await {
            return Err(ScaffoldError::MissingContainer(module_file));
        }

        let descriptor = StoryDescriptor {
            component: names.leaf_type_name.clone(),
            component_import: relative_import(&component_dir, &source),
            module,
            module_import: relative_import(&component_dir, &module_file),
            title: names.breadcrumb_title.clone(),
        };
        let story = component_dir.join(format!("{}{}", names.leaf_name, STORY_FILE_SUFFIX));
        self.workspace.write(&story, &descriptor.render()).await?;
        tracing::info!(component = %names.leaf_type_name, story = %story.display(), "story generated");

        Ok(LeafOutcome {
            template,
            source,
            story: Some(story),
        })
    }
}
