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

//! Tilde expansion semantics
//!
//! A tilde prefix resolves to a directory: `~` to `HOME`, `~+` to `PWD`,
//! `~-` to `OLDPWD`, and `~user` to the user's home directory from the
//! password database. When a lookup fails, the original text stands. The
//! result is never subject to field splitting or pathname expansion.

use super::attr::{AttrChar, Origin};
use zash_env::Frame;

/// Computes the replacement text of a tilde prefix.
fn expand_body(name: &str, frame: &Frame) -> Option<String> {
    match name {
        "" => frame.variables.get_scalar("HOME").map(ToOwned::to_owned),
        "+" => frame.variables.get_scalar("PWD").map(ToOwned::to_owned),
        "-" => frame.variables.get_scalar("OLDPWD").map(ToOwned::to_owned),
        name => frame.system.getpwnam_dir(name),
    }
}

/// Performs tilde expansion.
///
/// The `name` is the text between the tilde and the first `/` (or the end
/// of the word). The result characters are hard-expansion output, immune to
/// field splitting.
#[must_use]
pub fn expand(name: &str, frame: &Frame) -> Vec<AttrChar> {
    let value = match expand_body(name, frame) {
        Some(value) => value,
        // Failed lookups leave the original text in place.
        None => format!("~{name}"),
    };

    let mut chars: Vec<AttrChar> = value
        .chars()
        .map(|c| AttrChar {
            value: c,
            origin: Origin::HardExpansion,
            is_quoted: false,
            is_quoting: false,
        })
        .collect();

    if chars.is_empty() {
        // A quoting marker keeps the empty result from vanishing in field
        // splitting.
        chars.push(AttrChar {
            value: '"',
            origin: Origin::HardExpansion,
            is_quoted: false,
            is_quoting: true,
        });
    }

    chars
}
