//! Name derivation
//!
//! - `sanitize`: pure string transforms (case, separators, numbers as words)
//! - `derive`: the full identifier set for one snippet file

pub mod derive;
pub mod sanitize;

pub use derive::DerivedNames;
pub use sanitize::{
    digits_to_words, kebab_from_pascal, replace_numbers_with_words, sanitize, to_title_case,
};
