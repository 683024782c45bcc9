//! Generator command resolution

use crate::framework::FrameworkConfig;
use std::fmt;

/// A program plus the leading arguments needed to reach the generator
/// (e.g. `ng`, or `npx --no-install ng`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl GeneratorCommand {
    /// Split a command line on whitespace. Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn answers(&self) -> bool {
        std::process::Command::new(&self.program)
            .args(&self.args)
            .arg("version")
            .output()
            .is_ok_and(|o| o.status.success())
    }
}

impl fmt::Display for GeneratorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Candidate command lines for a generator program, in order of preference
fn candidates(program: &str) -> Vec<GeneratorCommand> {
    vec![
        GeneratorCommand {
            program: program.to_string(),
            args: Vec::new(),
        },
        GeneratorCommand {
            program: "npx".to_string(),
            args: vec!["--no-install".to_string(), program.to_string()],
        },
    ]
}

/// Detect how the generator can be invoked on this machine
pub fn detect_generator_command(program: &str) -> GeneratorCommand {
    let candidates = candidates(program);
    for candidate in &candidates {
        if candidate.answers() {
            return candidate.clone();
        }
    }
    // Fall back to the bare program; the first invocation reports the failure
    candidates[0].clone()
}

/// Resolve the generator command: explicit flag, then the product's
/// environment variable, then detection.
pub fn resolve_generator<C: FrameworkConfig>(config: &C, flag: Option<&str>) -> GeneratorCommand {
    if let Some(command) = flag.and_then(GeneratorCommand::parse) {
        return command;
    }
    if let Some(command) = std::env::var(config.generator_env())
        .ok()
        .as_deref()
        .and_then(GeneratorCommand::parse)
    {
        return command;
    }
    detect_generator_command(config.generator_program())
}
