//! Core types for droidgen
//!
//! Holds the project model consumed by the exporter, the string-keyed
//! settings store, and the shared error type. Everything here is plain
//! data: the generation pipeline reads it but never mutates it.

pub mod error;
pub mod paths;
pub mod project;
pub mod settings;

pub use error::{ExportError, Result};
pub use project::{
    collect_all_files, BuildConfiguration, OptimisationLevel, Project, SourceFile, SourceGroup,
};
pub use settings::{keys, SettingsStore};

/// Split a comma/whitespace delimited settings value into its non-empty,
/// trimmed tokens. Order is preserved and duplicates are kept; callers
/// that need a set de-duplicate themselves.
pub fn comma_or_whitespace_tokens(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_on_commas_and_whitespace() {
        assert_eq!(
            comma_or_whitespace_tokens(" armeabi,  x86 "),
            vec!["armeabi".to_string(), "x86".to_string()]
        );
    }

    #[test]
    fn empty_tokens_are_dropped() {
        assert!(comma_or_whitespace_tokens(" ,, \t ,").is_empty());
        assert!(comma_or_whitespace_tokens("").is_empty());
    }

    #[test]
    fn order_is_preserved() {
        assert_eq!(
            comma_or_whitespace_tokens("x86 armeabi-v7a armeabi"),
            vec!["x86", "armeabi-v7a", "armeabi"]
        );
    }
}
