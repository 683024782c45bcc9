//! Shared fixtures: an in-memory workspace and a generator stand-in that
//! writes Angular-shaped skeletons into it.

use crate::config::Conventions;
use crate::error::ScaffoldError;
use crate::framework::FrameworkConfig;
use crate::naming::sanitize::capitalize;
use crate::naming::DerivedNames;
use crate::pipeline::Pipeline;
use crate::runtime::{LeafRequest, Scaffolder};
use crate::snippets::SnippetFile;
use crate::workspace::Workspace;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const MODULE_WITHOUT_IMPORTS: &str = "import { NgModule } from '@angular/core';\n\
    \n\
    @NgModule({\n  declarations: []\n})\n\
    export class PlainModule { }\n";

#[derive(Clone)]
pub struct TestFramework;

impl FrameworkConfig for TestFramework {
    fn name(&self) -> &'static str {
        "test"
    }

    fn display_name(&self) -> &'static str {
        "Test"
    }

    fn generator_program(&self) -> &'static str {
        "test-generator"
    }

    fn generator_env(&self) -> &'static str {
        "SNIPPET_CORE_TEST_GENERATOR"
    }

    fn docs_url(&self) -> &'static str {
        "https://example.com/docs"
    }

    fn leaf_args(&self, path: &str, owner: &str, tag: &str, force: bool) -> Vec<String> {
        let mut args = vec![
            "component".to_string(),
            path.to_string(),
            format!("--module={}", owner),
            format!("--selector={}", tag),
        ];
        if force {
            args.push("--force".to_string());
        }
        args
    }

    fn container_args(&self, path: &str, force: bool) -> Vec<String> {
        let mut args = vec!["module".to_string(), path.to_string()];
        if force {
            args.push("--force".to_string());
        }
        args
    }
}

#[derive(Clone, Default)]
pub struct MemoryWorkspace {
    files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
}

impl MemoryWorkspace {
    /// File content as text; `None` if missing or not UTF-8
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.get_bytes(path).and_then(|bytes| String::from_utf8(bytes).ok())
    }

    pub fn get_bytes(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    pub fn insert(&self, path: &str, contents: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), contents.as_bytes().to_vec());
    }

    pub fn snapshot(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        self.files.lock().unwrap().clone()
    }
}

#[async_trait]
impl Workspace for MemoryWorkspace {
    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    async fn read(&self, path: &Path) -> Result<String, ScaffoldError> {
        let bytes = self.get_bytes(path).ok_or_else(|| {
            ScaffoldError::io(path, std::io::Error::from(std::io::ErrorKind::NotFound))
        })?;
        String::from_utf8(bytes).map_err(|e| {
            ScaffoldError::io(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    async fn write_bytes(&self, path: &Path, contents: &[u8]) -> Result<(), ScaffoldError> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}

/// Records every call and writes the files the real generator would
#[derive(Clone)]
pub struct FakeScaffolder {
    workspace: MemoryWorkspace,
    calls: Arc<Mutex<Vec<String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    silent: Arc<Mutex<HashSet<String>>>,
}

impl FakeScaffolder {
    pub fn new(workspace: MemoryWorkspace) -> Self {
        Self {
            workspace,
            calls: Arc::default(),
            failing: Arc::default(),
            silent: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Exit non-zero for this path
    pub fn fail_on(&self, path: &str) {
        self.failing.lock().unwrap().insert(path.to_string());
    }

    /// Report success for this path without writing anything
    pub fn write_nothing_for(&self, path: &str) {
        self.silent.lock().unwrap().insert(path.to_string());
    }

    fn record(&self, call: String, path: &str) -> Result<bool, ScaffoldError> {
        self.calls.lock().unwrap().push(call.clone());
        if self.failing.lock().unwrap().contains(path) {
            return Err(ScaffoldError::GeneratorFailed {
                command: call,
                code: 1,
            });
        }
        Ok(!self.silent.lock().unwrap().contains(path))
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn pascal(name: &str) -> String {
    name.split('-').map(capitalize).collect()
}

#[async_trait]
impl Scaffolder for FakeScaffolder {
    async fn create_leaf(&self, request: &LeafRequest) -> Result<(), ScaffoldError> {
        let call = format!(
            "component {} --module={} --selector={}",
            request.path, request.owner, request.tag
        );
        if !self.record(call, &request.path)? {
            return Ok(());
        }

        let name = last_segment(&request.path);
        let dir = Path::new("src/app").join(&request.path);
        let source = format!(
            "import {{ Component }} from '@angular/core';\n\
             \n\
             @Component({{\n  selector: '{}',\n  templateUrl: './{}.component.html',\n}})\n\
             export class {}Component {{\n\n}}\n",
            request.tag,
            name,
            pascal(name)
        );
        self.workspace
            .write(&dir.join(format!("{}.component.ts", name)), &source)
            .await?;
        self.workspace
            .write(
                &dir.join(format!("{}.component.html", name)),
                &format!("<p>{} works!</p>\n", name),
            )
            .await
    }

    async fn create_container(&self, path: &str, _force: bool) -> Result<(), ScaffoldError> {
        if !self.record(format!("module {}", path), path)? {
            return Ok(());
        }

        let name = last_segment(path);
        let source = format!(
            "import {{ NgModule }} from '@angular/core';\n\
             import {{ CommonModule }} from '@angular/common';\n\
             \n\
             @NgModule({{\n  declarations: [],\n  imports: [\n    CommonModule\n  ]\n}})\n\
             export class {}Module {{ }}\n",
            pascal(name)
        );
        let file = Path::new("src/app")
            .join(path)
            .join(format!("{}.module.ts", name));
        self.workspace.write(&file, &source).await
    }
}

pub fn derive(dirs: &[&str], file: &str) -> DerivedNames {
    let segments: Vec<String> = dirs.iter().map(|s| s.to_string()).collect();
    DerivedNames::derive(&segments, file, &segments, &Conventions::default()).unwrap()
}

pub fn snippet(content: &str) -> SnippetFile {
    SnippetFile::from_parts(
        Path::new("snippets"),
        Path::new("snippets/snippet.txt"),
        content,
    )
}

pub fn pipeline() -> (
    Pipeline<MemoryWorkspace, FakeScaffolder>,
    MemoryWorkspace,
    FakeScaffolder,
) {
    let workspace = MemoryWorkspace::default();
    let scaffolder = FakeScaffolder::new(workspace.clone());
    let pipeline = Pipeline::new(workspace.clone(), scaffolder.clone(), Conventions::default());
    (pipeline, workspace, scaffolder)
}
