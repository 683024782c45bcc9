//! Generated component source rewriting

use regex::{Captures, Regex};
use std::sync::OnceLock;

static EXPORT_CLASS_REGEX: OnceLock<Regex> = OnceLock::new();

fn export_class_regex() -> &'static Regex {
    EXPORT_CLASS_REGEX.get_or_init(|| {
        Regex::new(r"(export\s+(?:default\s+)?class\s+)[A-Za-z_$][A-Za-z0-9_$]*")
            .expect("Invalid export class regex")
    })
}

/// Rename the first exported class in `source` to `class_name`.
///
/// Only the class identifier changes; everything else is kept as generated.
/// Returns `None` if the source declares no exported class.
pub fn rename_exported_class(source: &str, class_name: &str) -> Option<String> {
    let regex = export_class_regex();
    if !regex.is_match(source) {
        return None;
    }
    Some(
        regex
            .replacen(source, 1, |caps: &Captures| format!("{}{}", &caps[1], class_name))
            .into_owned(),
    )
}
