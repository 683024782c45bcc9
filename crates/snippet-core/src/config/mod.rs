//! Naming conventions and generator command resolution

pub mod generator;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use generator::{detect_generator_command, resolve_generator, GeneratorCommand};

/// File-name suffix of a container source file
pub const MODULE_FILE_SUFFIX: &str = ".module.ts";

/// File-name suffix of a leaf component source file
pub const COMPONENT_FILE_SUFFIX: &str = ".component.ts";

/// File-name suffix of a leaf component template file
pub const TEMPLATE_FILE_SUFFIX: &str = ".component.html";

/// File-name suffix of a story descriptor
pub const STORY_FILE_SUFFIX: &str = ".stories.ts";

/// Naming constants shared by every derived identifier and generated path.
///
/// All fields can be overridden from the `conventions` section of `snippets.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conventions {
    /// Directory (relative to the project) the generator writes sources into
    pub source_root: String,

    /// Appended to the PascalCase leaf name to form its class name
    pub leaf_suffix: String,

    /// Appended to the PascalCase directory name to form a module class name
    pub container_suffix: String,

    /// Namespace prefix of every tag selector
    pub tag_prefix: String,

    /// Inserted in front of a selector that would otherwise start with a digit
    pub digit_guard_prefix: String,

    /// Separator between breadcrumb title parts
    pub title_separator: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            source_root: "src/app".to_string(),
            leaf_suffix: "Component".to_string(),
            container_suffix: "Module".to_string(),
            tag_prefix: "app".to_string(),
            digit_guard_prefix: "ngx".to_string(),
            title_separator: " / ".to_string(),
        }
    }
}

impl Conventions {
    /// Directory holding the generated sources for a relative path
    pub fn source_dir(&self, relative: &Path) -> PathBuf {
        Path::new(&self.source_root).join(relative)
    }

    /// Source file of the container living in `dir` with the given file stem
    pub fn container_file(&self, dir: &Path, stem: &str) -> PathBuf {
        self.source_dir(dir).join(format!("{}{}", stem, MODULE_FILE_SUFFIX))
    }

    /// Class name of a container, from its PascalCase directory name
    pub fn container_type(&self, pascal: &str) -> String {
        format!("{}{}", pascal, self.container_suffix)
    }

    /// Strip the container suffix off a module class name
    pub fn container_base<'a>(&self, type_name: &'a str) -> &'a str {
        type_name
            .strip_suffix(self.container_suffix.as_str())
            .unwrap_or(type_name)
    }
}
