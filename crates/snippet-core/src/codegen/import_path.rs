//! Relative import specifiers between generated files

use std::path::{Component, Path};

/// Extension dropped from import specifiers
const SOURCE_EXTENSION: &str = ".ts";

fn normal_parts(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Render a relative path with `/` separators, as passed to the generator
pub fn slash_path(path: &Path) -> String {
    normal_parts(path).join("/")
}

/// Import specifier reaching `target` from a file living in `from_dir`.
///
/// Both paths are relative to the same root. The result always uses `/`,
/// starts with `./` or `../`, and has no source extension:
/// `("src/app/cards/basic-card", "src/app/cards/cards.module.ts")` → `"../cards.module"`.
pub fn relative_import(from_dir: &Path, target: &Path) -> String {
    let from = normal_parts(from_dir);
    let to = normal_parts(target);
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    if common == from.len() {
        parts.push(".");
    } else {
        parts.extend(std::iter::repeat("..").take(from.len() - common));
    }
    parts.extend(to[common..].iter().map(String::as_str));

    let joined = parts.join("/");
    joined
        .strip_suffix(SOURCE_EXTENSION)
        .map(str::to_string)
        .unwrap_or(joined)
}
