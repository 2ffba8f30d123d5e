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

//! Field splitting
//!
//! Splitting applies to the characters an unquoted expansion produced;
//! literal and quoted characters are never separators. A run of
//! IFS-whitespace separators delimits one field boundary; an
//! IFS-non-whitespace character is a separator of its own and produces an
//! empty field when it adjoins another separator.

mod ifs;

pub use self::ifs::Ifs;

use super::attr::{AttrChar, Origin};

/// Tests whether a character is subject to splitting at all.
fn is_separator_candidate(c: &AttrChar) -> bool {
    c.origin == Origin::SoftExpansion && !c.is_quoted && !c.is_quoting
}

/// Splits one field at the separators defined by the given IFS.
///
/// Splitting an empty character sequence yields no fields, which is how an
/// unquoted expansion of an empty value vanishes.
#[must_use]
pub fn split(chars: Vec<AttrChar>, ifs: &Ifs) -> Vec<Vec<AttrChar>> {
    let is_ws_sep =
        |c: &AttrChar| is_separator_candidate(c) && ifs.is_ifs_whitespace(c.value);
    let is_non_ws_sep =
        |c: &AttrChar| is_separator_candidate(c) && ifs.is_ifs_non_whitespace(c.value);
    let is_sep = |c: &AttrChar| is_ws_sep(c) || is_non_ws_sep(c);

    let mut fields = Vec::new();
    let mut i = 0;

    // Leading IFS whitespace is skipped, not a field boundary.
    while i < chars.len() && is_ws_sep(&chars[i]) {
        i += 1;
    }

    while i < chars.len() {
        // Gather one field.
        let start = i;
        while i < chars.len() && !is_sep(&chars[i]) {
            i += 1;
        }
        fields.push(chars[start..i].to_vec());

        // Consume one separator: whitespace, at most one non-whitespace
        // separator, and the whitespace around it.
        while i < chars.len() && is_ws_sep(&chars[i]) {
            i += 1;
        }
        if i < chars.len() && is_non_ws_sep(&chars[i]) {
            i += 1;
            while i < chars.len() && is_ws_sep(&chars[i]) {
                i += 1;
            }
        }
    }

    fields
}
