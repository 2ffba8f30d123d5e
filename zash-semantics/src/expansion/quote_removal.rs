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

//! Quote removal
//!
//! The last step of expansion drops the characters that only represent
//! quoting, leaving the field's value.

use super::attr::AttrChar;

/// Removes the quoting characters from a field.
#[must_use]
pub(super) fn strip(chars: &[AttrChar]) -> String {
    chars
        .iter()
        .filter(|c| !c.is_quoting)
        .map(|c| c.value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::attr::{soft_chars, AttrChar, Origin};
    use super::*;

    #[test]
    fn strips_quoting_characters_only() {
        let mut chars = soft_chars("ab", true);
        chars.push(AttrChar {
            value: '"',
            origin: Origin::SoftExpansion,
            is_quoted: false,
            is_quoting: true,
        });
        assert_eq!(strip(&chars), "ab");
    }

    #[test]
    fn empty_field_strips_to_empty_string() {
        assert_eq!(strip(&[]), "");
    }
}
