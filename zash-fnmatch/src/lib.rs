// This file is part of zash, a POSIX-compatible shell.
// Copyright (C) 2026 The zash authors

//! This crate provides the `fnmatch` functionality that performs pattern
//! matching based on a globbing pattern.
//!
//! This implementation supports the following syntax in patterns:
//!
//! - Any single character (`?`)
//! - Any character sequence (`*`)
//! - Bracket expression (`[...]`)
//!     - Character literals
//!     - Character ranges (e.g. `a-z`)
//!     - Complement (`[!...]` or `[^...]`)
//!
//! Matching is performed directly on the pattern's syntax tree, character by
//! character, with no locale-specific behavior. Character ranges compare
//! scalar values, so the results are stable regardless of the current locale.
//!
//! # Example
//!
//! ```
//! use zash_fnmatch::{Pattern, without_escape};
//! let p = Pattern::parse(without_escape("r*.txt")).unwrap();
//! assert!(p.is_match("readme.txt"));
//! assert!(!p.is_match("readme.md"));
//! ```

mod ast;
mod char_iter;

pub use self::ast::{Ast, Atom, Bracket, BracketAtom, BracketItem};
pub use self::char_iter::{with_escape, without_escape, PatternChar, WithEscape, WithoutEscape};

use thiserror::Error;

/// Error that may happen while parsing a pattern
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A bracket expression contains a range whose start compares greater
    /// than its end (e.g. `[z-a]`).
    #[error("the character range is reversed")]
    ReversedRange,
}

/// Configuration for a pattern
///
/// The default configuration has all the options off.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct Config {
    /// Whether a leading period has to be matched explicitly
    ///
    /// When `literal_period` is `true`, a `.` at the start of the subject
    /// string (or, if [`pathname`](Self::pathname) is also `true`, right
    /// after a `/`) is matched only by a literal `.` in the pattern.
    pub literal_period: bool,

    /// Pathname matching mode
    ///
    /// When `pathname` is `true`, `?`, `*` and bracket expressions never
    /// match a `/`; only a literal `/` in the pattern does.
    pub pathname: bool,

    /// Whether matching is case-insensitive
    ///
    /// Case folding is applied to ASCII letters only, keeping the matching
    /// locale-independent.
    pub case_insensitive: bool,
}

impl Config {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Main part of this crate
///
/// A `Pattern` is a parsed globbing pattern paired with the [`Config`] that
/// governs its matching behavior. See the [crate documentation](self) for an
/// example.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pattern {
    ast: Ast,
    config: Config,
}

impl Pattern {
    /// Creates a pattern with defaulted configuration.
    #[inline]
    pub fn parse<I>(pattern: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = PatternChar>,
        I::IntoIter: Clone,
    {
        Self::parse_with_config(pattern, Config::default())
    }

    /// Creates a pattern with a specified configuration.
    pub fn parse_with_config<I>(pattern: I, config: Config) -> Result<Self, Error>
    where
        I: IntoIterator<Item = PatternChar>,
        I::IntoIter: Clone,
    {
        let ast = Ast::new(pattern.into_iter())?;
        Ok(Pattern { ast, config })
    }

    /// Returns the configuration for this pattern.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tests whether this pattern matches only the given literal string.
    ///
    /// The result is `Some(_)` if the pattern contains no `?`, `*` or bracket
    /// expression. Callers can skip directory scanning for such patterns.
    #[must_use]
    pub fn as_literal(&self) -> Option<String> {
        self.ast
            .atoms
            .iter()
            .map(|atom| match atom {
                Atom::Char(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Tests whether this pattern matches the given string.
    #[must_use]
    pub fn is_match(&self, subject: &str) -> bool {
        self.ast.matches(subject, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_pattern() {
        let p = Pattern::parse(without_escape("fnmatch")).unwrap();
        assert_eq!(p.as_literal().as_deref(), Some("fnmatch"));
        assert!(p.is_match("fnmatch"));
        assert!(!p.is_match("fnmatc"));
        assert!(!p.is_match("fnmatch "));
    }

    #[test]
    fn empty_pattern() {
        let p = Pattern::parse(without_escape("")).unwrap();
        assert!(p.is_match(""));
        assert!(!p.is_match("x"));
    }

    #[test]
    fn any_char() {
        let p = Pattern::parse(without_escape("a?c")).unwrap();
        assert_eq!(p.as_literal(), None);
        assert!(p.is_match("abc"));
        assert!(p.is_match("axc"));
        assert!(!p.is_match("ac"));
        assert!(!p.is_match("abbc"));
    }

    #[test]
    fn any_string() {
        let p = Pattern::parse(without_escape("a*c")).unwrap();
        assert!(p.is_match("ac"));
        assert!(p.is_match("abc"));
        assert!(p.is_match("abracadabrac"));
        assert!(!p.is_match("abd"));
    }

    #[test]
    fn multiple_stars_backtrack() {
        let p = Pattern::parse(without_escape("*a*b*")).unwrap();
        assert!(p.is_match("ab"));
        assert!(p.is_match("xxaxxbxx"));
        assert!(p.is_match("aabb"));
        assert!(!p.is_match("ba"));
    }

    #[test]
    fn escaped_characters_are_literal() {
        let p = Pattern::parse(with_escape(r"a\*c")).unwrap();
        assert_eq!(p.as_literal().as_deref(), Some("a*c"));
        assert!(p.is_match("a*c"));
        assert!(!p.is_match("abc"));
    }

    #[test]
    fn case_insensitive_match() {
        let config = Config {
            case_insensitive: true,
            ..Config::default()
        };
        let p = Pattern::parse_with_config(without_escape("a[b-d]*"), config).unwrap();
        assert!(p.is_match("abx"));
        assert!(p.is_match("AC"));
        assert!(p.is_match("ACX"));
        assert!(!p.is_match("aex"));
    }

    #[test]
    fn pathname_star_does_not_cross_slash() {
        let config = Config {
            pathname: true,
            ..Config::default()
        };
        let p = Pattern::parse_with_config(without_escape("a*c"), config).unwrap();
        assert!(p.is_match("abc"));
        assert!(!p.is_match("a/c"));

        let p = Pattern::parse_with_config(without_escape("a/*"), config).unwrap();
        assert!(p.is_match("a/bc"));
        assert!(!p.is_match("a/b/c"));
    }

    #[test]
    fn pathname_bracket_does_not_match_slash() {
        let config = Config {
            pathname: true,
            ..Config::default()
        };
        let p = Pattern::parse_with_config(without_escape("a[!b]c"), config).unwrap();
        assert!(p.is_match("axc"));
        assert!(!p.is_match("a/c"));
    }

    #[test]
    fn literal_period_at_start() {
        let config = Config {
            literal_period: true,
            ..Config::default()
        };
        let p = Pattern::parse_with_config(without_escape("*file"), config).unwrap();
        assert!(p.is_match("file"));
        assert!(p.is_match("profile"));
        assert!(!p.is_match(".file"));

        let p = Pattern::parse_with_config(without_escape(".file"), config).unwrap();
        assert!(p.is_match(".file"));
    }

    #[test]
    fn literal_period_after_slash_in_pathname_mode() {
        let config = Config {
            literal_period: true,
            pathname: true,
            ..Config::default()
        };
        let p = Pattern::parse_with_config(without_escape("dir/*"), config).unwrap();
        assert!(p.is_match("dir/file"));
        assert!(!p.is_match("dir/.file"));
    }
}
