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

//! IFS parser

/// Collection of input field separator characters
///
/// The separators are classified into whitespace and non-whitespace, which
/// the [splitting algorithm](super::split) treats differently.
#[derive(Clone, Debug, Eq)]
pub struct Ifs<'a> {
    chars: &'a str,
}

impl<'a> Ifs<'a> {
    /// Creates a new IFS consisting of the given separators.
    ///
    /// The argument is treated as a list of separator characters.
    #[must_use]
    pub fn new(chars: &'a str) -> Ifs<'a> {
        Ifs { chars }
    }

    /// Creates a new IFS containing no separators.
    ///
    /// With an empty IFS, no splitting occurs at all.
    #[must_use]
    pub fn empty() -> Ifs<'static> {
        Ifs { chars: "" }
    }

    /// String containing the default separators.
    ///
    /// The default separators are a space, tab, and newline (`" \t\n"`).
    /// The default applies when the `IFS` variable is unset.
    pub const DEFAULT: &'static str = " \t\n";
}

/// The default IFS contains a space, tab, and newline (`" \t\n"`).
impl Default for Ifs<'_> {
    fn default() -> Self {
        Ifs::new(Ifs::DEFAULT)
    }
}

/// The `==` operator compares [`self.chars()`](Ifs::chars) as a string.
impl PartialEq for Ifs<'_> {
    #[inline]
    fn eq(&self, other: &Ifs) -> bool {
        self.chars == other.chars
    }
}

impl Ifs<'_> {
    /// Returns a string slice containing the separator characters.
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &str {
        self.chars
    }

    /// Tests if the given character is a separator contained in this IFS.
    #[inline]
    #[must_use]
    pub fn is_ifs(&self, c: char) -> bool {
        self.chars.contains(c)
    }

    /// Tests if the given character is an IFS whitespace separator.
    #[inline]
    #[must_use]
    pub fn is_ifs_whitespace(&self, c: char) -> bool {
        self.is_ifs(c) && c.is_whitespace()
    }

    /// Tests if the given character is an IFS non-whitespace separator.
    #[inline]
    #[must_use]
    pub fn is_ifs_non_whitespace(&self, c: char) -> bool {
        self.is_ifs(c) && !c.is_whitespace()
    }

    /// Returns the character a quoted `$*` joins fields with: the first IFS
    /// character. `None` means an empty IFS, which joins with nothing.
    #[must_use]
    pub fn joiner(&self) -> Option<char> {
        self.chars.chars().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let ifs = Ifs::new(" a");
        assert!(ifs.is_ifs(' '));
        assert!(ifs.is_ifs('a'));
        assert!(!ifs.is_ifs('b'));
        assert!(ifs.is_ifs_whitespace(' '));
        assert!(!ifs.is_ifs_whitespace('a'));
        assert!(ifs.is_ifs_non_whitespace('a'));
        assert!(!ifs.is_ifs_non_whitespace(' '));
    }

    #[test]
    fn default_is_space_tab_newline() {
        let ifs = Ifs::default();
        assert_eq!(ifs.chars(), " \t\n");
        assert!(ifs.is_ifs_whitespace('\t'));
        assert!(ifs.is_ifs_whitespace('\n'));
    }

    #[test]
    fn joiner_is_first_character() {
        assert_eq!(Ifs::default().joiner(), Some(' '));
        assert_eq!(Ifs::new(":x").joiner(), Some(':'));
        assert_eq!(Ifs::empty().joiner(), None);
    }
}
