//! Identifier derivation for one snippet
//!
//! Every generated name comes from the snippet's relative directory and file
//! name, e.g. `cards/basic-card.txt`:
//!
//! | Field | Value |
//! |-------|-------|
//! | `segments` | `["cards"]` |
//! | `container_names` | `["Cards"]` |
//! | `leaf_name` | `basic-card` |
//! | `leaf_type_name` | `BasicCardComponent` |
//! | `tag_name` | `app-basic-card` |
//! | `breadcrumb_title` | `Cards / Basic Card` |

use super::sanitize::{
    capitalize, hyphenate_whitespace, replace_numbers_with_words, sanitize, to_title_case,
};
use crate::config::Conventions;
use crate::error::ScaffoldError;
use std::path::PathBuf;

/// All identifiers derived for one snippet file. Never mutated after derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNames {
    /// Sanitized directory segments, outermost first
    pub segments: Vec<String>,
    /// `segments` joined into a relative path
    pub container_path: PathBuf,
    /// PascalCase name per segment, without the container suffix
    pub container_names: Vec<String>,
    /// Sanitized, hyphen-case leaf name
    pub leaf_name: String,
    /// PascalCase leaf name plus the leaf suffix
    pub leaf_type_name: String,
    /// Tag selector of the leaf
    pub tag_name: String,
    /// Title-cased display path of the leaf
    pub breadcrumb_title: String,
}

impl DerivedNames {
    /// Derive every identifier for a snippet.
    ///
    /// `raw_segments` and `display_segments` are parallel: the former feed
    /// paths and type names, the latter only the breadcrumb title.
    pub fn derive(
        raw_segments: &[String],
        file_base_name: &str,
        display_segments: &[String],
        conventions: &Conventions,
    ) -> Result<Self, ScaffoldError> {
        let mut segments = Vec::with_capacity(raw_segments.len());
        for raw in raw_segments {
            let segment = name_part(raw.trim());
            tracing::debug!(raw = %raw, sanitized = %segment, "sanitized directory segment");
            if segment.is_empty() {
                return Err(ScaffoldError::EmptySegment(raw.clone()));
            }
            segments.push(segment);
        }

        let leaf_name = name_part(file_base_name);
        if leaf_name.is_empty() {
            return Err(ScaffoldError::EmptyName(file_base_name.to_string()));
        }

        let container_path: PathBuf = segments.iter().collect();
        let container_names: Vec<String> = segments.iter().map(|s| pascal_case(s)).collect();
        let leaf_type_name = format!("{}{}", pascal_case(&leaf_name), conventions.leaf_suffix);
        let tag_name = tag_name(&leaf_name, conventions);
        let leaf_words = leaf_name.replace('-', " ");
        let breadcrumb_title = display_segments
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(leaf_words.as_str()))
            .map(to_title_case)
            .collect::<Vec<_>>()
            .join(&conventions.title_separator);

        tracing::debug!(
            path = %container_path.join(&leaf_name).display(),
            class = %leaf_type_name,
            selector = %tag_name,
            modules = ?container_names,
            "derived names"
        );

        Ok(Self {
            segments,
            container_path,
            container_names,
            leaf_name,
            leaf_type_name,
            tag_name,
            breadcrumb_title,
        })
    }

    /// Path of the leaf relative to the source root (`cards/basic-card`)
    pub fn component_path(&self) -> PathBuf {
        self.container_path.join(&self.leaf_name)
    }

    /// Whether the leaf sits directly under the snippet root
    pub fn is_root_level(&self) -> bool {
        self.segments.is_empty() || self.container_names.is_empty()
    }
}

/// Whitespace to hyphens, sanitize, spell out numbers
fn name_part(raw: &str) -> String {
    replace_numbers_with_words(&sanitize(&hyphenate_whitespace(raw)))
}

fn pascal_case(hyphenated: &str) -> String {
    hyphenated
        .split('-')
        .filter(|token| !token.is_empty())
        .map(capitalize)
        .collect()
}

/// A selector may not have a hyphen directly before a digit, nor start with one.
fn tag_name(leaf_name: &str, conventions: &Conventions) -> String {
    let mut base = String::with_capacity(leaf_name.len());
    let mut chars = leaf_name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' && chars.peek().is_some_and(char::is_ascii_digit) {
            continue;
        }
        base.push(c);
    }
    if base.starts_with(|c: char| c.is_ascii_digit()) {
        base = format!("{}-{}", conventions.digit_guard_prefix, base);
    }
    format!("{}-{}", conventions.tag_prefix, base)
}
