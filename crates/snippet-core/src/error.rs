//! Errors raised while generating a single snippet's artifacts

use std::path::PathBuf;
use thiserror::Error;

/// Failure of one snippet's pipeline.
///
/// Every variant is fatal to the snippet being processed and to nothing else:
/// the orchestrator records it and moves on to the next file.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The snippet's file name sanitizes to nothing usable.
    #[error("file name '{0}' does not produce a usable component name")]
    EmptyName(String),

    /// A directory segment sanitizes to nothing usable.
    #[error("directory '{0}' does not produce a usable module name")]
    EmptySegment(String),

    /// The nearest container should have been created by the hierarchy step.
    #[error("parent module file does not exist at path: {}", .0.display())]
    MissingContainer(PathBuf),

    /// The generator reported success but did not write the expected file.
    #[error("generator did not create expected file: {}", .0.display())]
    SkeletonMissing(PathBuf),

    /// The generator process exited with a non-zero status.
    #[error("command `{command}` failed with exit code {code}")]
    GeneratorFailed { command: String, code: i32 },

    /// The generator process could not be started at all.
    #[error("failed to run `{command}`: {source}")]
    GeneratorSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
