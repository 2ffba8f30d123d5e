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

//! Here-document body scanning
//!
//! When the lexer emits a `<<` or `<<-` operator it queues an entry for the
//! delimiter word read from the same line. The queue is drained at the first
//! newline token: the lexer switches to body scanning and consumes raw lines,
//! one committed line at a time, until the delimiter line of each entry is
//! found. Each completed entry becomes a synthetic end-of-here-document token
//! carrying the delimiter, flags, and accumulated body.

use super::core::{Cursor, Scanner, ScanResult};
use crate::syntax::HereDocMarker;
use crate::syntax::Token;
use crate::syntax::TokenId;
use crate::syntax::Word;
use std::collections::VecDeque;

/// Queued here-document whose body has not been fully read
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct HereDocEntry {
    /// Delimiter with quotation marks removed
    pub delimiter: String,
    /// Whether the operator was `<<-`
    pub remove_tabs: bool,
    /// Whether any portion of the delimiter was quoted
    pub quoted: bool,
    /// Body lines accumulated so far
    pub body: String,
}

impl HereDocEntry {
    pub(super) fn new(delimiter: String, remove_tabs: bool, quoted: bool) -> HereDocEntry {
        HereDocEntry {
            delimiter,
            remove_tabs,
            quoted,
            body: String::new(),
        }
    }

    /// Converts this entry into the token that carries its finished body.
    fn into_token(self, location: crate::source::Location) -> Token {
        let marker = HereDocMarker {
            delimiter: self.delimiter,
            remove_tabs: self.remove_tabs,
            quoted: self.quoted,
            body: Some(self.body),
        };
        let mut token = Token::new(TokenId::EndOfHereDoc, Word::empty(location));
        token.here_doc = Some(Box::new(marker));
        token
    }
}

/// Result of advancing here-document scanning by one line
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum Step {
    /// The current body line is not complete in the buffer.
    Blocked,
    /// One body line was consumed and appended.
    BodyLine,
    /// The front entry's delimiter line was found; the entry is done.
    Complete(Token),
    /// The input definitely ended with the delimiter missing.
    ///
    /// The parser reports the missing body when pairing markers to their
    /// redirections.
    Abandoned,
}

/// Advances the committed cursor over one here-document body line.
pub(super) fn advance_body(
    src: &str,
    cursor: &mut Cursor,
    finished: bool,
    queue: &mut VecDeque<HereDocEntry>,
) -> Step {
    let entry = queue.front_mut().expect("here-document queue must not be empty");
    let rest = &src[cursor.index..];
    let (line, has_newline) = match rest.find('\n') {
        Some(index) => (&rest[..index], true),
        None => (rest, false),
    };
    if !has_newline && !finished {
        return Step::Blocked;
    }

    let stripped = if entry.remove_tabs {
        line.trim_start_matches('\t')
    } else {
        line
    };

    if stripped == entry.delimiter {
        let location = cursor.location;
        advance_over_line(cursor, line, has_newline);
        let entry = queue.pop_front().unwrap();
        return Step::Complete(entry.into_token(location));
    }

    if !has_newline {
        // Definite end of input without the delimiter.
        advance_over_line(cursor, line, false);
        return Step::Abandoned;
    }

    entry.body.push_str(stripped);
    entry.body.push('\n');
    advance_over_line(cursor, line, true);
    Step::BodyLine
}

/// Moves the cursor past a line and its optional terminating newline.
fn advance_over_line(cursor: &mut Cursor, line: &str, has_newline: bool) {
    cursor.index += line.len();
    if has_newline {
        cursor.index += 1;
        cursor.location = cursor.location.next_line();
    } else {
        for _ in line.chars() {
            cursor.location = cursor.location.next_column();
        }
    }
}

impl Scanner<'_> {
    /// Reads the body of one here-document queued inside a command
    /// substitution.
    ///
    /// Unlike top-level here-documents, nothing is committed line by line:
    /// the whole enclosing word token is retried if the buffer runs out.
    pub(super) fn here_doc_body(&mut self, mut entry: HereDocEntry) -> ScanResult<Token> {
        loop {
            let rest = self.rest();
            let Some(index) = rest.find('\n') else {
                return Err(self.suspend());
            };
            let line = &rest[..index];
            let stripped = if entry.remove_tabs {
                line.trim_start_matches('\t')
            } else {
                line
            };
            let matched = stripped == entry.delimiter;
            if !matched {
                entry.body.push_str(stripped);
                entry.body.push('\n');
            }
            let location = self.location();
            for _ in 0..=index {
                self.advance();
            }
            if matched {
                return Ok(entry.into_token(location));
            }
        }
    }
}
