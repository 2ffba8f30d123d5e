// This file is part of zash, a POSIX-compatible shell.
// Copyright (C) 2026 The zash authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Attributed characters
//!
//! The initial expansion step annotates every produced character with where
//! it came from and how it was quoted. Field splitting and pathname
//! expansion consult the annotations: only characters from unquoted soft
//! expansions can be separators, and only unquoted characters keep their
//! special meaning in a glob pattern.

/// Origin of an attributed character
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Origin {
    /// The character was literally in the source word.
    Literal,

    /// The character resulted from a parameter expansion, command
    /// substitution or arithmetic expansion, and is subject to field
    /// splitting where unquoted.
    SoftExpansion,

    /// The character resulted from an expansion that is never subject to
    /// field splitting, like tilde expansion.
    HardExpansion,
}

/// Character with attributes about its origin and quoting
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AttrChar {
    /// Character value
    pub value: char,
    /// Where the character came from
    pub origin: Origin,
    /// Whether the character is quoted
    pub is_quoted: bool,
    /// Whether this character is a quotation mark rather than content
    ///
    /// Quoting characters keep otherwise-empty quoted fields alive through
    /// field splitting and are removed by quote removal.
    pub is_quoting: bool,
}

/// Converts expansion output to soft-expansion characters.
#[must_use]
pub fn soft_chars(value: &str, is_quoted: bool) -> Vec<AttrChar> {
    value
        .chars()
        .map(|c| AttrChar {
            value: c,
            origin: Origin::SoftExpansion,
            is_quoted,
            is_quoting: false,
        })
        .collect()
}

/// Appends a quoting marker to an empty quoted field so that it survives
/// field splitting instead of vanishing.
pub fn retain_if_quoted(chars: &mut Vec<AttrChar>, quoted: bool) {
    if quoted && chars.is_empty() {
        chars.push(AttrChar {
            value: '"',
            origin: Origin::SoftExpansion,
            is_quoted: false,
            is_quoting: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_chars_record_quoting() {
        let chars = soft_chars("ab", true);
        assert_eq!(chars.len(), 2);
        assert!(chars.iter().all(|c| c.is_quoted));
        assert!(chars.iter().all(|c| c.origin == Origin::SoftExpansion));
    }

    #[test]
    fn retain_marker_only_when_quoted_and_empty() {
        let mut chars = Vec::new();
        retain_if_quoted(&mut chars, false);
        assert!(chars.is_empty());

        retain_if_quoted(&mut chars, true);
        assert_eq!(chars.len(), 1);
        assert!(chars[0].is_quoting);

        let mut nonempty = soft_chars("x", true);
        retain_if_quoted(&mut nonempty, true);
        assert_eq!(nonempty.len(), 1);
    }
}
