//! String transforms shared by every derived name
//!
//! All functions are pure. `sanitize` output only ever contains lowercase
//! ASCII letters, digits and single interior hyphens.

use regex::{Captures, Regex};
use std::sync::OnceLock;

static GRID_REGEX: OnceLock<Regex> = OnceLock::new();
static DIGITS_REGEX: OnceLock<Regex> = OnceLock::new();
static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
static CASE_BOUNDARY_REGEX: OnceLock<Regex> = OnceLock::new();

fn grid_regex() -> &'static Regex {
    GRID_REGEX.get_or_init(|| Regex::new(r"(?i)([0-9]+)x([0-9]+)").expect("Invalid grid regex"))
}

fn digits_regex() -> &'static Regex {
    DIGITS_REGEX.get_or_init(|| Regex::new(r"[0-9]+").expect("Invalid digits regex"))
}

fn word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| Regex::new(r"[A-Za-z0-9_]\S*").expect("Invalid word regex"))
}

fn case_boundary_regex() -> &'static Regex {
    CASE_BOUNDARY_REGEX
        .get_or_init(|| Regex::new(r"([a-z])([A-Z])").expect("Invalid case boundary regex"))
}

/// Replace anything outside `[A-Za-z0-9-]` with `-`, collapse hyphen runs,
/// trim hyphens from both ends and lowercase.
///
/// - `"Foo Bar!!_Baz"` → `"foo-bar-baz"`
/// - `"--Hero--"` → `"hero"`
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if c.is_ascii_alphanumeric() { c } else { '-' };
        if c == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(c.to_ascii_lowercase());
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

fn digit_word(digit: char) -> Option<&'static str> {
    Some(match digit {
        '0' => "zero",
        '1' => "one",
        '2' => "two",
        '3' => "three",
        '4' => "four",
        '5' => "five",
        '6' => "six",
        '7' => "seven",
        '8' => "eight",
        '9' => "nine",
        _ => return None,
    })
}

/// Spell out every digit independently: `"42"` → `"fourtwo"`.
/// Anything that is not a digit passes through unchanged.
pub fn digits_to_words(digits: &str) -> String {
    let mut out = String::new();
    for c in digits.chars() {
        match digit_word(c) {
            Some(word) => out.push_str(word),
            None => out.push(c),
        }
    }
    out
}

/// Spell out numbers: `NxN` grids first (`"2x2"` → `"twobytwo"`), then any
/// remaining digit run (`"step3"` → `"stepthree"`).
pub fn replace_numbers_with_words(text: &str) -> String {
    let grids = grid_regex().replace_all(text, |caps: &Captures| {
        format!("{}by{}", digits_to_words(&caps[1]), digits_to_words(&caps[2]))
    });
    digits_regex()
        .replace_all(&grids, |caps: &Captures| digits_to_words(&caps[0]))
        .into_owned()
}

/// Uppercase the first letter of every word token, lowercase the rest of it.
pub fn to_title_case(text: &str) -> String {
    word_regex()
        .replace_all(text, |caps: &Captures| {
            let mut chars = caps[0].chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .into_owned()
}

/// `"BasicCards"` → `"basic-cards"`
pub fn kebab_from_pascal(text: &str) -> String {
    case_boundary_regex()
        .replace_all(text, "$1-$2")
        .to_lowercase()
}

/// Uppercase the first character of a token
pub fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replace every whitespace run with a single hyphen
pub fn hyphenate_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
