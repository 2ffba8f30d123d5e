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

//! Intermediate result of the initial expansion
//!
//! Most expansions produce characters within one field, but `"$@"` produces
//! one field per positional parameter. A phrase is the list of fields
//! accumulated so far; appending a multi-field phrase joins at the seam, so
//! `x"$@"y` attaches `x` to the first parameter and `y` to the last.

use super::attr::AttrChar;

/// Fields produced by expanding a prefix of a word's parts
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Phrase(Vec<Vec<AttrChar>>);

impl Phrase {
    /// Creates a phrase of one empty field.
    #[must_use]
    pub fn one_empty_field() -> Phrase {
        Phrase(vec![Vec::new()])
    }

    /// Creates a phrase of one field.
    #[must_use]
    pub fn field(chars: Vec<AttrChar>) -> Phrase {
        Phrase(vec![chars])
    }

    /// Creates a phrase of arbitrarily many fields.
    #[must_use]
    pub fn fields(fields: Vec<Vec<AttrChar>>) -> Phrase {
        Phrase(fields)
    }

    /// Appends another phrase, joining at the seam.
    ///
    /// The first field of `other` is concatenated onto the last field of
    /// `self`; the remaining fields of `other` follow as their own fields.
    /// Appending a zero-field phrase (an unquoted `$@` with no positional
    /// parameters) leaves `self` unchanged.
    pub fn append(&mut self, other: Phrase) {
        let mut fields = other.0.into_iter();
        let Some(first) = fields.next() else { return };
        self.0
            .last_mut()
            .expect("a phrase always has at least one field")
            .extend(first);
        self.0.extend(fields);
    }

    /// Unwraps the fields.
    #[must_use]
    pub fn into_fields(self) -> Vec<Vec<AttrChar>> {
        self.0
    }

    /// Marks every character as quoted.
    ///
    /// A switch word expanded inside a quoted parameter expansion (as in
    /// `"${x:-$y}"`) inherits the outer quoting, so its output must not be
    /// field split. Empty fields receive a quoting marker so they survive
    /// splitting like any other quoted empty.
    #[must_use]
    pub fn into_quoted(self) -> Phrase {
        Phrase(
            self.0
                .into_iter()
                .map(|field| {
                    let mut field: Vec<AttrChar> = field
                        .into_iter()
                        .map(|mut c| {
                            c.is_quoted = true;
                            c
                        })
                        .collect();
                    super::attr::retain_if_quoted(&mut field, true);
                    field
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::attr::soft_chars;
    use super::*;

    #[test]
    fn appending_single_fields_concatenates() {
        let mut phrase = Phrase::one_empty_field();
        phrase.append(Phrase::field(soft_chars("ab", false)));
        phrase.append(Phrase::field(soft_chars("cd", false)));
        let fields = phrase.into_fields();
        assert_eq!(fields.len(), 1);
        let text: String = fields[0].iter().map(|c| c.value).collect();
        assert_eq!(text, "abcd");
    }

    #[test]
    fn appending_multi_field_phrase_joins_at_seam() {
        let mut phrase = Phrase::field(soft_chars("x", false));
        phrase.append(Phrase::fields(vec![
            soft_chars("a", true),
            soft_chars("b", true),
        ]));
        phrase.append(Phrase::field(soft_chars("y", false)));
        let fields = phrase.into_fields();
        assert_eq!(fields.len(), 2);
        let texts: Vec<String> = fields
            .iter()
            .map(|f| f.iter().map(|c| c.value).collect())
            .collect();
        assert_eq!(texts, ["xa", "by"]);
    }

    #[test]
    fn appending_zero_fields_is_a_no_op() {
        let mut phrase = Phrase::field(soft_chars("x", false));
        phrase.append(Phrase::fields(Vec::new()));
        assert_eq!(phrase.into_fields().len(), 1);
    }
}
