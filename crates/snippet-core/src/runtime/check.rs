//! Generator availability check

use crate::config::GeneratorCommand;
use std::process::Command;

/// Generator detection result
#[derive(Debug, Clone)]
pub struct GeneratorInfo {
    pub command: String,
    pub version: Option<String>,
    pub available: bool,
}

/// Check whether the generator answers `version`, capturing the first
/// non-empty line it prints that mentions a version
pub fn check_generator(command: &GeneratorCommand) -> GeneratorInfo {
    let output = Command::new(&command.program)
        .args(&command.args)
        .arg("version")
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let stdout = String::from_utf8_lossy(&out.stdout);
            GeneratorInfo {
                command: command.to_string(),
                version: version_line(&stdout),
                available: true,
            }
        }
        _ => GeneratorInfo {
            command: command.to_string(),
            version: None,
            available: false,
        },
    }
}

/// Pick the line reporting the version out of a banner-heavy output
fn version_line(output: &str) -> Option<String> {
    let lines: Vec<&str> = output.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    lines
        .iter()
        .find(|l| l.to_ascii_lowercase().contains("cli:"))
        .or_else(|| lines.iter().find(|l| l.chars().any(|c| c.is_ascii_digit())))
        .map(|l| l.to_string())
}
