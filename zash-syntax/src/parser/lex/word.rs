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

//! Part of the lexer that scans words
//!
//! A word is accumulated part by part. Adjacent literal pieces with the same
//! quoting coalesce into one part; quotations and expansions produce parts of
//! their own, each recording the quoting in effect where it appeared.

use super::core::{Blocked, Cursor, LexError, Mode, Scanner, ScanResult};
use crate::syntax::PartUnit;
use crate::syntax::Word;
use crate::syntax::WordPart;

/// Appends a literal string to the part list, coalescing with the previous
/// part when the quoting matches.
pub(super) fn push_literal(
    parts: &mut Vec<WordPart>,
    text: &str,
    single_quoted: bool,
    double_quoted: bool,
) {
    if let Some(WordPart {
        unit: PartUnit::Literal(prev),
        single_quoted: s,
        double_quoted: d,
    }) = parts.last_mut()
    {
        if *s == single_quoted && *d == double_quoted {
            prev.push_str(text);
            return;
        }
    }
    parts.push(WordPart {
        unit: PartUnit::Literal(text.to_string()),
        single_quoted,
        double_quoted,
    });
}

/// Tests whether a character terminates an unquoted literal run.
fn ends_literal(c: char) -> bool {
    matches!(c, '\'' | '"' | '\\' | '$' | '`')
}

impl Scanner<'_> {
    /// Scans a word.
    ///
    /// The word ends at the first unquoted character for which `delimiter`
    /// returns true, at an unquoted quotation or expansion boundary handled
    /// internally, or at the definite end of input.
    pub(super) fn word(&mut self, delimiter: fn(char) -> bool) -> ScanResult<Word> {
        let location = self.location();
        let mut parts = Vec::new();

        if self.peek() == Some('~') {
            if let Some(part) = self.tilde(delimiter)? {
                parts.push(part);
            }
        }

        loop {
            self.skip_line_continuations()?;
            let Some(c) = self.peek() else {
                if self.finished {
                    break;
                }
                return Err(self.suspend());
            };
            if delimiter(c) {
                break;
            }
            match c {
                '\'' => parts.push(self.single_quote()?),
                '"' => self.double_quote(&mut parts)?,
                '\\' => {
                    self.advance();
                    match self.peek() {
                        // A backslash at the definite end of input is literal.
                        None => push_literal(&mut parts, "\\", false, false),
                        Some(escaped) => {
                            self.advance();
                            push_literal(&mut parts, &escaped.to_string(), true, false);
                        }
                    }
                }
                '$' => parts.push(self.dollar_unit(false)?),
                '`' => parts.push(self.backquote(false)?),
                _ => {
                    let mut run = String::new();
                    while let Some(c) = self.peek() {
                        if delimiter(c) || ends_literal(c) {
                            break;
                        }
                        run.push(c);
                        self.advance();
                    }
                    push_literal(&mut parts, &run, false, false);
                }
            }
        }

        if parts.is_empty() {
            parts.push(WordPart::unquoted(PartUnit::Literal(String::new())));
        }
        Ok(Word { parts, location })
    }

    /// Scans a tilde prefix at the start of a word.
    ///
    /// Returns `Ok(None)`, with the cursor restored, when the tilde is
    /// followed by a quotation or expansion and is therefore a literal.
    fn tilde(&mut self, delimiter: fn(char) -> bool) -> ScanResult<Option<WordPart>> {
        let save = self.cursor;
        self.advance(); // '~'
        let mut name = String::new();
        loop {
            match self.peek() {
                None if !self.finished => return Err(self.suspend()),
                None | Some('/') => break,
                Some(c) if delimiter(c) => break,
                Some(c) if ends_literal(c) => {
                    // Quoting disables tilde expansion for the whole prefix.
                    self.cursor = save;
                    return Ok(None);
                }
                Some(c) => {
                    name.push(c);
                    self.advance();
                }
            }
        }
        Ok(Some(WordPart::unquoted(PartUnit::Tilde(name))))
    }

    /// Scans a single-quoted string.
    ///
    /// Every character between the quotes, including backslashes, dollars
    /// and newlines, is literal.
    fn single_quote(&mut self) -> ScanResult<WordPart> {
        self.push_mode(Mode::SingleQuote);
        self.advance(); // '
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(self.suspend()),
                Some('\'') => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
        self.pop_mode();
        Ok(WordPart {
            unit: PartUnit::Literal(value),
            single_quoted: true,
            double_quoted: false,
        })
    }

    /// Scans a double-quoted string, appending its parts.
    ///
    /// Inside double quotes, `$` and backquote stay active and a backslash
    /// escapes only `$`, backquote, `"`, `\` and the newline (which is
    /// removed as a line continuation). Other backslashes are literal.
    fn double_quote(&mut self, parts: &mut Vec<WordPart>) -> ScanResult<()> {
        self.push_mode(Mode::DoubleQuote);
        self.advance(); // "
        let mut empty = true;
        loop {
            match self.peek() {
                None => return Err(self.suspend()),
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('$') => {
                    parts.push(self.dollar_unit(true)?);
                    empty = false;
                }
                Some('`') => {
                    parts.push(self.backquote(true)?);
                    empty = false;
                }
                Some('\\') => {
                    let mut chars = self.rest().chars();
                    chars.next(); // the backslash
                    match chars.next() {
                        None => return Err(self.suspend()),
                        Some('\n') => {
                            self.advance();
                            self.advance();
                        }
                        Some(c @ ('$' | '`' | '"' | '\\')) => {
                            self.advance();
                            self.advance();
                            push_literal(parts, &c.to_string(), false, true);
                            empty = false;
                        }
                        Some(_) => {
                            self.advance();
                            push_literal(parts, "\\", false, true);
                            empty = false;
                        }
                    }
                }
                Some(_) => {
                    let mut run = String::new();
                    while let Some(c) = self.peek() {
                        if matches!(c, '"' | '$' | '`' | '\\') {
                            break;
                        }
                        run.push(c);
                        self.advance();
                    }
                    push_literal(parts, &run, false, true);
                    empty = false;
                }
            }
        }
        self.pop_mode();
        if empty {
            parts.push(WordPart {
                unit: PartUnit::Literal(String::new()),
                single_quoted: false,
                double_quoted: true,
            });
        }
        Ok(())
    }
}

/// Parses a string the way here-document bodies and other expandable text
/// are parsed.
///
/// The text is scanned like double-quoted content without the quotes: `$`
/// expansions and backquote substitutions are recognized, a backslash escapes
/// `$`, backquote and `\` (and is removed before a newline), and everything
/// else is literal. The input must be complete; an unclosed expansion is an
/// error.
pub fn parse_text(source: &str) -> Result<Vec<WordPart>, LexError> {
    let mut scanner = Scanner::new(source, Cursor::start(), true);
    let mut parts = Vec::new();
    loop {
        let result = (|| -> ScanResult<bool> {
            match scanner.peek() {
                None => return Ok(true),
                Some('$') => parts.push(scanner.dollar_unit(false)?),
                Some('`') => parts.push(scanner.backquote(false)?),
                Some('\\') => {
                    let mut chars = scanner.rest().chars();
                    chars.next();
                    match chars.next() {
                        None => {
                            scanner.advance();
                            push_literal(&mut parts, "\\", false, false);
                        }
                        Some('\n') => {
                            scanner.advance();
                            scanner.advance();
                        }
                        Some(c @ ('$' | '`' | '\\')) => {
                            scanner.advance();
                            scanner.advance();
                            push_literal(&mut parts, &c.to_string(), true, false);
                        }
                        Some(_) => {
                            scanner.advance();
                            push_literal(&mut parts, "\\", false, false);
                        }
                    }
                }
                Some(_) => {
                    let mut run = String::new();
                    while let Some(c) = scanner.peek() {
                        if matches!(c, '$' | '`' | '\\') {
                            break;
                        }
                        run.push(c);
                        scanner.advance();
                    }
                    push_literal(&mut parts, &run, false, false);
                }
            }
            Ok(false)
        })();
        match result {
            Ok(true) => return Ok(parts),
            Ok(false) => {}
            Err(Blocked::Error(error)) => return Err(error),
            Err(Blocked::NeedMore(_)) => unreachable!("finished scanner cannot suspend"),
        }
    }
}
