//! Container module source patching
//!
//! Module sources are edited structurally rather than by pattern matching:
//! a small tokenizer marks which bytes are code (as opposed to string
//! literals and comments), property keys are located on code bytes only, and
//! brackets are matched by depth. This lets the `imports` list be found no
//! matter how it is formatted, and lets entries that themselves contain
//! commas (`RouterModule.forChild([a, b])`) survive re-serialization.

/// Result of adding an entry to a module's declared imports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The entry was added; carries the new source
    Patched(String),
    /// The entry was already declared
    Unchanged,
    /// No module decorator object, or its `imports` is not an array literal
    Unpatched,
}

const IMPORTS_KEY: &str = "imports";
const MODULE_DECORATOR: &str = "@NgModule";

/// Import statement bringing `name` in from `specifier`, with trailing newline
pub fn import_statement(name: &str, specifier: &str) -> String {
    format!("import {{ {} }} from '{}';\n", name, specifier)
}

/// Prepend the import statement unless that exact line is already present.
/// Returns `None` when nothing changes.
pub fn add_import_statement(source: &str, name: &str, specifier: &str) -> Option<String> {
    let statement = import_statement(name, specifier);
    if source.contains(&statement) {
        return None;
    }
    Some(format!("{}{}", statement, source))
}

/// Add `name` to the module's declared `imports` list.
///
/// Only the top level of the `@NgModule({ ... })` object is considered. When
/// it has no `imports` property, one is inserted as its first property. An
/// `imports` property whose value is not an array literal is left alone.
/// Existing entries are kept verbatim.
pub fn add_declared_import(source: &str, name: &str) -> PatchOutcome {
    let bytes = source.as_bytes();
    let mask = code_mask(bytes);

    match imports_slot(bytes, &mask) {
        Some(ImportsSlot::List(list)) => {
            let mut entries = split_top_level(source, &mask, list.open + 1, list.close);
            if entries.iter().any(|entry| entry == name) {
                return PatchOutcome::Unchanged;
            }
            entries.push(name.to_string());

            let rendered = format!("{}: [\n    {}\n  ]", IMPORTS_KEY, entries.join(",\n    "));
            let mut patched = String::with_capacity(source.len() + rendered.len());
            patched.push_str(&source[..list.key]);
            patched.push_str(&rendered);
            patched.push_str(&source[list.close + 1..]);
            PatchOutcome::Patched(patched)
        }
        Some(ImportsSlot::Absent { brace }) => {
            let mut patched = String::with_capacity(source.len() + name.len() + 32);
            patched.push_str(&source[..=brace]);
            patched.push_str(&format!("\n  {}: [\n    {}\n  ],", IMPORTS_KEY, name));
            patched.push_str(&source[brace + 1..]);
            PatchOutcome::Patched(patched)
        }
        Some(ImportsSlot::NotAList) | None => PatchOutcome::Unpatched,
    }
}

/// Entries of the declared `imports` list, if the module has one
pub fn declared_imports(source: &str) -> Option<Vec<String>> {
    let bytes = source.as_bytes();
    let mask = code_mask(bytes);
    match imports_slot(bytes, &mask)? {
        ImportsSlot::List(list) => Some(split_top_level(source, &mask, list.open + 1, list.close)),
        _ => None,
    }
}

/// Byte offsets of a `key: [ ... ]` property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListProperty {
    key: usize,
    open: usize,
    close: usize,
}

/// Mark each byte as code (`true`) or as part of a string, template literal
/// or comment (`false`).
fn code_mask(bytes: &[u8]) -> Vec<bool> {
    let mut mask = vec![true; bytes.len()];
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
            }
            quote @ (b'\'' | b'"' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i = (i + 1).min(bytes.len());
            }
            _ => {
                i += 1;
                continue;
            }
        }
        mask[start..i].iter_mut().for_each(|m| *m = false);
    }
    mask
}

fn is_ident(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

/// First code occurrence of `needle` at or after `from`, on identifier boundaries
fn find_code(bytes: &[u8], mask: &[bool], needle: &str, from: usize) -> Option<usize> {
    let needle = needle.as_bytes();
    (from..bytes.len().saturating_sub(needle.len() - 1)).find(|&i| {
        mask[i]
            && bytes[i..].starts_with(needle)
            && (i == 0 || !is_ident(bytes[i - 1]) || needle[0] == b'@')
            && bytes.get(i + needle.len()).map_or(true, |&b| !is_ident(b))
    })
}

/// Next code byte at or after `from` that is not whitespace
fn skip_trivia(bytes: &[u8], mask: &[bool], mut from: usize) -> Option<usize> {
    while from < bytes.len() && (!mask[from] || bytes[from].is_ascii_whitespace()) {
        from += 1;
    }
    (from < bytes.len()).then_some(from)
}

/// Last code byte before `at` that is not whitespace
fn previous_code(bytes: &[u8], mask: &[bool], at: usize) -> Option<u8> {
    (0..at)
        .rev()
        .find(|&i| mask[i] && !bytes[i].is_ascii_whitespace())
        .map(|i| bytes[i])
}

/// Index of the bracket closing the one at `open`
fn matching_close(bytes: &[u8], mask: &[bool], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for i in open..bytes.len() {
        if !mask[i] {
            continue;
        }
        match bytes[i] {
            b'[' | b'(' | b'{' => depth += 1,
            b']' | b')' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// State of the `imports` property of the module decorator object
enum ImportsSlot {
    /// `imports: [ ... ]`
    List(ListProperty),
    /// `imports` bound to something other than an array literal
    NotAList,
    /// No `imports` property; `brace` opens the decorator object
    Absent { brace: usize },
}

/// `None` when the source has no well-formed `@NgModule({ ... })`
fn imports_slot(bytes: &[u8], mask: &[bool]) -> Option<ImportsSlot> {
    let open = decorator_object_start(bytes, mask)?;
    let close = matching_close(bytes, mask, open)?;
    let Some(key) = find_top_level_key(bytes, mask, IMPORTS_KEY, open, close) else {
        return Some(ImportsSlot::Absent { brace: open });
    };

    let after_key = skip_trivia(bytes, mask, key + IMPORTS_KEY.len())?;
    if bytes[after_key] != b':' {
        // Shorthand `{ imports }`
        return Some(ImportsSlot::NotAList);
    }
    let value = skip_trivia(bytes, mask, after_key + 1)?;
    if bytes[value] != b'[' {
        return Some(ImportsSlot::NotAList);
    }
    let list_close = matching_close(bytes, mask, value)?;
    Some(ImportsSlot::List(ListProperty {
        key,
        open: value,
        close: list_close,
    }))
}

/// Offset of `key` used as a property name directly inside the object
/// spanning `open..=close`, ignoring nested objects, arrays and calls
fn find_top_level_key(
    bytes: &[u8],
    mask: &[bool],
    key: &str,
    open: usize,
    close: usize,
) -> Option<usize> {
    let needle = key.as_bytes();
    let mut depth = 0usize;
    for i in open + 1..close {
        if !mask[i] {
            continue;
        }
        match bytes[i] {
            b'[' | b'(' | b'{' => depth += 1,
            b']' | b')' | b'}' => depth = depth.saturating_sub(1),
            _ if depth == 0
                && bytes[i..close].starts_with(needle)
                && !is_ident(bytes[i - 1])
                && bytes.get(i + needle.len()).map_or(true, |&b| !is_ident(b))
                && matches!(previous_code(bytes, mask, i), Some(b'{' | b',')) =>
            {
                let next = skip_trivia(bytes, mask, i + needle.len())?;
                if matches!(bytes[next], b':' | b',') || next == close {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Opening brace of the object passed to the module decorator
fn decorator_object_start(bytes: &[u8], mask: &[bool]) -> Option<usize> {
    let at = find_code(bytes, mask, MODULE_DECORATOR, 0)?;
    let paren = skip_trivia(bytes, mask, at + MODULE_DECORATOR.len())?;
    if bytes[paren] != b'(' {
        return None;
    }
    let brace = skip_trivia(bytes, mask, paren + 1)?;
    (bytes[brace] == b'{').then_some(brace)
}

/// Split `source[start..end]` on commas that are code and not nested
fn split_top_level(source: &str, mask: &[bool], start: usize, end: usize) -> Vec<String> {
    let bytes = source.as_bytes();
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut entry_start = start;
    for i in start..end {
        if !mask[i] {
            continue;
        }
        match bytes[i] {
            b'[' | b'(' | b'{' => depth += 1,
            b']' | b')' | b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                entries.push(&source[entry_start..i]);
                entry_start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&source[entry_start..end]);
    entries
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
