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

//! Shell script source code positions
//!
//! The lexer owns one growable buffer of source text and keeps track of the
//! line and column of every character it scans. Tokens, words and errors
//! carry a [`Location`], a plain line/column pair counted from 1.

use std::fmt;
use std::num::NonZeroU64;

/// Position of a character in source code.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Location {
    /// Line number, counted from 1.
    pub line: NonZeroU64,

    /// Character position in the line, counted from 1.
    ///
    /// Characters are counted in the number of Unicode scalar values, not
    /// bytes.
    pub column: NonZeroU64,
}

impl Location {
    /// Creates a location for the given line and column.
    ///
    /// # Panics
    ///
    /// If `line` or `column` is zero.
    #[must_use]
    pub fn new(line: u64, column: u64) -> Location {
        Location {
            line: NonZeroU64::new(line).expect("line number must be positive"),
            column: NonZeroU64::new(column).expect("column number must be positive"),
        }
    }

    /// Creates a dummy location with line and column both 1.
    ///
    /// This function is mainly for use in testing.
    #[must_use]
    pub fn dummy() -> Location {
        Location::new(1, 1)
    }

    /// Returns the location of the next character on the same line.
    #[must_use]
    pub fn next_column(&self) -> Location {
        Location {
            line: self.line,
            column: self.column.checked_add(1).expect("column number overflow"),
        }
    }

    /// Returns the location of the first character of the next line.
    #[must_use]
    pub fn next_line(&self) -> Location {
        Location {
            line: self.line.checked_add(1).expect("line number overflow"),
            column: NonZeroU64::new(1).unwrap(),
        }
    }
}

/// Locations are rendered as `line:column`.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display() {
        assert_eq!(Location::new(3, 14).to_string(), "3:14");
    }

    #[test]
    fn location_advancing() {
        let location = Location::dummy();
        assert_eq!(location.next_column(), Location::new(1, 2));
        assert_eq!(location.next_line(), Location::new(2, 1));
        assert_eq!(location.next_line().next_column(), Location::new(2, 2));
    }
}
