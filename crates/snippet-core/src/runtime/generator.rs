//! External scaffolding generator
//!
//! The generator (e.g. the Angular CLI) is a black box that writes a
//! conventionally named set of files. The pipeline only sees the narrow
//! [`Scaffolder`] interface, so everything above it can run against a fake.

use crate::config::GeneratorCommand;
use crate::error::ScaffoldError;
use crate::framework::FrameworkConfig;
use async_trait::async_trait;
use colored::Colorize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Leaf creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafRequest {
    /// Leaf path relative to the source root (`cards/basic-card`)
    pub path: String,
    /// Path the owning container is resolved from
    pub owner: String,
    /// Tag selector
    pub tag: String,
    /// Regenerate even if files already exist
    pub force: bool,
}

/// Creates skeletons on disk. Calls block until the files are written.
#[async_trait]
pub trait Scaffolder: Send + Sync {
    async fn create_leaf(&self, request: &LeafRequest) -> Result<(), ScaffoldError>;

    async fn create_container(&self, path: &str, force: bool) -> Result<(), ScaffoldError>;
}

/// Scaffolder running the framework's generator as a child process
pub struct ProcessScaffolder<C: FrameworkConfig> {
    config: C,
    command: GeneratorCommand,
    project_dir: PathBuf,
}

impl<C: FrameworkConfig> ProcessScaffolder<C> {
    pub fn new(config: C, command: GeneratorCommand, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            command,
            project_dir: project_dir.into(),
        }
    }

    pub fn command(&self) -> &GeneratorCommand {
        &self.command
    }

    /// Run the generator with `args`, streaming its output.
    /// Fails on a non-zero exit status.
    async fn run(&self, args: Vec<String>) -> Result<(), ScaffoldError> {
        let command_line = format!("{} {}", self.command, args.join(" "));
        println!("{} {}", "Executing:".dimmed(), command_line.yellow());
        tracing::debug!(command = %command_line, cwd = %self.project_dir.display(), "running generator");

        let mut child = TokioCommand::new(&self.command.program)
            .args(&self.command.args)
            .args(&args)
            .current_dir(&self.project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ScaffoldError::GeneratorSpawn {
                command: command_line.clone(),
                source,
            })?;

        let mut stdout_lines = child.stdout.take().map(|s| BufReader::new(s).lines());
        let mut stderr_lines = child.stderr.take().map(|s| BufReader::new(s).lines());

        // Drain both pipes until each reaches EOF
        while stdout_lines.is_some() || stderr_lines.is_some() {
            tokio::select! {
                line = next_line(&mut stdout_lines), if stdout_lines.is_some() => {
                    match line {
                        Some(line) => println!("  {}", line),
                        None => stdout_lines = None,
                    }
                }
                line = next_line(&mut stderr_lines), if stderr_lines.is_some() => {
                    match line {
                        Some(line) => eprintln!("  {}", line.yellow()),
                        None => stderr_lines = None,
                    }
                }
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|source| ScaffoldError::GeneratorSpawn {
                command: command_line.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::GeneratorFailed {
                command: command_line,
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

type Lines<R> = tokio::io::Lines<BufReader<R>>;

/// Next line of an open pipe; read errors end the stream
async fn next_line<R>(lines: &mut Option<Lines<R>>) -> Option<String>
where
    R: tokio::io::AsyncRead + Unpin,
{
    match lines.as_mut()?.next_line().await {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read generator output");
            None
        }
    }
}

#[async_trait]
impl<C: FrameworkConfig> Scaffolder for ProcessScaffolder<C> {
    async fn create_leaf(&self, request: &LeafRequest) -> Result<(), ScaffoldError> {
        let args = self
            .config
            .leaf_args(&request.path, &request.owner, &request.tag, request.force);
        self.run(args).await
    }

    async fn create_container(&self, path: &str, force: bool) -> Result<(), ScaffoldError> {
        let args = self.config.container_args(path, force);
        self.run(args).await
    }
}
