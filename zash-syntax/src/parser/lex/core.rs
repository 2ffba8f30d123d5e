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

//! Fundamental part of the lexer
//!
//! The [`Lexer`] accumulates source text in one growable buffer and keeps a
//! committed cursor behind which every character has been turned into a
//! token. [`Lexer::scan`] runs a scratch [`Scanner`] from the committed
//! cursor; each completely scanned token advances the commitment, and a
//! token cut short by the end of the buffer leaves the cursor untouched so
//! that the next `scan` retries it with more input. Scanning the same bytes
//! therefore yields the same tokens no matter how the input was chunked.

use super::heredoc::{self, HereDocEntry, Step};
use super::op::is_operator_start;
use crate::source::Location;
use crate::syntax::Token;
use crate::syntax::TokenId;
use crate::syntax::Word;
use std::collections::VecDeque;
use thiserror::Error;

/// Tests whether a character is a blank, that is, a space or tab.
#[must_use]
pub const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// Types of errors that may happen in lexical analysis
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("{}", self.message())]
#[non_exhaustive]
pub enum LexErrorKind {
    /// A single quotation lacks a closing `'`.
    UnclosedSingleQuote,
    /// A double quotation lacks a closing `"`.
    UnclosedDoubleQuote,
    /// A parameter expansion lacks a closing `}`.
    UnclosedParam,
    /// A command substitution started with `$(` lacks a closing `)`.
    UnclosedCommandSubstitution,
    /// A command substitution started with `` ` `` lacks a closing `` ` ``.
    UnclosedBackquote,
    /// An arithmetic expansion lacks a closing `))`.
    UnclosedArith,
    /// A parameter expansion lacks a name.
    EmptyParam,
    /// A parameter expansion has an invalid name.
    InvalidParam,
    /// A parameter expansion contains a malformed modifier.
    InvalidModifier,
    /// An IO-location prefix attached to a redirection is malformed.
    InvalidIoLocation,
    /// The file descriptor number preceding a redirection is too large.
    IoNumberOutOfRange,
}

impl LexErrorKind {
    /// Returns an error message describing the error.
    #[must_use]
    pub fn message(&self) -> &'static str {
        use LexErrorKind::*;
        match self {
            UnclosedSingleQuote => "the single quote is not closed",
            UnclosedDoubleQuote => "the double quote is not closed",
            UnclosedParam => "the parameter expansion is not closed",
            UnclosedCommandSubstitution => "the command substitution is not closed",
            UnclosedBackquote => "the backquote is not closed",
            UnclosedArith => "the arithmetic expansion is not closed",
            EmptyParam => "the parameter name is missing",
            InvalidParam => "the parameter name is invalid",
            InvalidModifier => "the parameter expansion contains a malformed modifier",
            InvalidIoLocation => "the IO-location prefix is not valid",
            IoNumberOutOfRange => "the file descriptor number is too large",
        }
    }
}

/// Lexical error with the location of the offending construct
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("{kind} (at {location})")]
pub struct LexError {
    /// Type of the error
    pub kind: LexErrorKind,
    /// Position of the offending construct
    pub location: Location,
}

/// Result of a call to [`Lexer::scan`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LexStatus {
    /// All buffered input up to the last complete token has been consumed.
    ///
    /// More tokens may follow when more input is pushed, including the
    /// completion of a word cut short by the end of the buffer.
    Ok,
    /// The lexer is suspended inside a quotation, a nested expansion, or a
    /// line continuation, and needs more input to make progress.
    Incomplete,
    /// One or more queued here-document bodies are not fully delimited.
    NeedHereDoc,
    /// The input is invalid.
    Error(LexError),
}

/// Reason a scan attempt stopped before completing a token
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Pending {
    /// A plain token was cut short; not a suspension point.
    Token,
    /// The cut happened inside a quotation or nested expansion.
    Construct,
    /// The buffer ends in (or right after) a line continuation.
    LineContinuation,
}

/// Outcome of a scan attempt that did not produce a token
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Blocked {
    /// More input is needed.
    NeedMore(Pending),
    /// The input is invalid.
    Error(LexError),
}

pub(super) type ScanResult<T> = Result<T, Blocked>;

/// Lexer mode representing one unclosed quotation or expansion
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Mode {
    SingleQuote,
    DoubleQuote,
    BracedParam,
    CommandSubst,
    Backquote,
    Arith,
}

impl Mode {
    /// Returns the error kind reported when this mode is still open at the
    /// definite end of input.
    pub(super) fn unclosed_error(self) -> LexErrorKind {
        use LexErrorKind::*;
        match self {
            Mode::SingleQuote => UnclosedSingleQuote,
            Mode::DoubleQuote => UnclosedDoubleQuote,
            Mode::BracedParam => UnclosedParam,
            Mode::CommandSubst => UnclosedCommandSubstitution,
            Mode::Backquote => UnclosedBackquote,
            Mode::Arith => UnclosedArith,
        }
    }
}

/// Position in the source buffer
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Cursor {
    /// Byte index into the buffer
    pub index: usize,
    /// Line and column of the character at `index`
    pub location: Location,
}

impl Cursor {
    pub(super) fn start() -> Cursor {
        Cursor {
            index: 0,
            location: Location::dummy(),
        }
    }
}

/// Scratch cursor over the source buffer
///
/// A scanner borrows the buffer and walks it from the committed cursor. All
/// scanning functions are written over the scanner; the [`Lexer`] commits the
/// scanner's position only after a whole token has been produced.
pub(super) struct Scanner<'a> {
    pub(super) src: &'a str,
    pub(super) cursor: Cursor,
    pub(super) finished: bool,
    /// Stack of unclosed quotations and expansions
    pub(super) modes: Vec<(Mode, Location)>,
}

impl<'a> Scanner<'a> {
    pub(super) fn new(src: &'a str, cursor: Cursor, finished: bool) -> Scanner<'a> {
        Scanner {
            src,
            cursor,
            finished,
            modes: Vec::new(),
        }
    }

    /// Returns the unscanned remainder of the buffer.
    pub(super) fn rest(&self) -> &'a str {
        &self.src[self.cursor.index..]
    }

    pub(super) fn at_end(&self) -> bool {
        self.cursor.index == self.src.len()
    }

    pub(super) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(super) fn location(&self) -> Location {
        self.cursor.location
    }

    /// Consumes and returns the next character.
    pub(super) fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor.index += c.len_utf8();
        self.cursor.location = if c == '\n' {
            self.cursor.location.next_line()
        } else {
            self.cursor.location.next_column()
        };
        Some(c)
    }

    /// Enters a quotation or expansion mode.
    pub(super) fn push_mode(&mut self, mode: Mode) {
        self.modes.push((mode, self.cursor.location));
    }

    /// Leaves the innermost quotation or expansion mode.
    pub(super) fn pop_mode(&mut self) {
        self.modes.pop().expect("unbalanced lexer mode stack");
    }

    /// Returns the blocker to report when the buffer ends inside the current
    /// construct.
    ///
    /// Before the input is finished this is a request for more input; the
    /// request is a suspension point only when the mode stack is non-empty.
    /// After the input is finished, an open mode is an unclosed-construct
    /// error.
    pub(super) fn suspend(&self) -> Blocked {
        match self.modes.last() {
            Some(&(mode, opening)) if self.finished => Blocked::Error(LexError {
                kind: mode.unclosed_error(),
                location: opening,
            }),
            Some(_) => Blocked::NeedMore(Pending::Construct),
            None => Blocked::NeedMore(Pending::Token),
        }
    }

    /// Reports an error at the given location.
    pub(super) fn error<T>(&self, kind: LexErrorKind, location: Location) -> ScanResult<T> {
        Err(Blocked::Error(LexError { kind, location }))
    }

    /// Removes line continuations at the cursor.
    ///
    /// A backslash-newline pair outside quotations is removed from the input.
    /// If the buffer ends in a backslash that may yet pair with a newline, or
    /// right after a removed continuation, the scan suspends.
    pub(super) fn skip_line_continuations(&mut self) -> ScanResult<()> {
        loop {
            let rest = self.rest();
            if rest.starts_with("\\\n") {
                self.advance();
                self.advance();
                if self.at_end() && !self.finished {
                    return Err(Blocked::NeedMore(Pending::LineContinuation));
                }
            } else if rest == "\\" && !self.finished {
                return Err(Blocked::NeedMore(Pending::LineContinuation));
            } else {
                return Ok(());
            }
        }
    }

    /// Skips blanks and a comment before a token.
    ///
    /// A `#` at the start of a token position begins a comment that runs to
    /// (but does not include) the next newline.
    fn skip_blanks_and_comment(&mut self) -> ScanResult<()> {
        loop {
            self.skip_line_continuations()?;
            match self.peek() {
                Some(c) if is_blank(c) => {
                    self.advance();
                }
                Some('#') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                    if self.at_end() && !self.finished {
                        // The comment may continue in the next chunk.
                        return Err(Blocked::NeedMore(Pending::Token));
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Scans one token.
    ///
    /// Returns `Ok(None)` when the buffer is exhausted at a token boundary.
    pub(super) fn next_token(&mut self) -> ScanResult<Option<Token>> {
        self.skip_blanks_and_comment()?;
        let start = self.location();
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let token = match c {
            '\n' => {
                self.advance();
                Token::new(TokenId::Operator(super::Operator::Newline), Word::empty(start))
            }
            c if is_operator_start(c) => self.operator(start)?,
            '0'..='9' => match self.io_number(start)? {
                Some(token) => token,
                None => self.word_token(start)?,
            },
            '{' => match self.io_location(start)? {
                Some(token) => token,
                None => self.word_token(start)?,
            },
            _ => self.word_token(start)?,
        };
        Ok(Some(token))
    }

    /// Scans a word and wraps it in a token.
    fn word_token(&mut self, start: Location) -> ScanResult<Token> {
        debug_assert_eq!(start, self.location());
        let word = self.word(normal_word_delimiter)?;
        Ok(Token::new(TokenId::Word, word))
    }

    /// Scans an operator token using greedy recognition.
    fn operator(&mut self, start: Location) -> ScanResult<Token> {
        use super::Operator::*;
        let c = self.advance().expect("operator start character must exist");
        let op = match c {
            '&' => self.extend_operator(And, &[('&', AndAnd)])?,
            '|' => self.extend_operator(Bar, &[('|', BarBar)])?,
            ';' => {
                self.extend_operator(Semicolon, &[(';', SemicolonSemicolon), ('&', SemicolonAnd)])?
            }
            '(' => OpenParen,
            ')' => CloseParen,
            '<' => {
                let op = self.extend_operator(
                    Less,
                    &[('<', LessLess), ('&', LessAnd), ('>', LessGreater)],
                )?;
                if op == LessLess {
                    self.extend_operator(LessLess, &[('-', LessLessDash)])?
                } else {
                    op
                }
            }
            '>' => self.extend_operator(
                Greater,
                &[('>', GreaterGreater), ('&', GreaterAnd), ('|', GreaterBar)],
            )?,
            _ => unreachable!("not an operator start: {c:?}"),
        };
        Ok(Token::new(TokenId::Operator(op), Word::empty(start)))
    }

    /// Extends a partially recognized operator with its next character.
    ///
    /// If the buffer ends where the operator could still grow, the scan is
    /// cut short so that the token is retried with more input.
    fn extend_operator(
        &mut self,
        base: super::Operator,
        continuations: &[(char, super::Operator)],
    ) -> ScanResult<super::Operator> {
        self.skip_line_continuations()?;
        match self.peek() {
            None if !self.finished => Err(Blocked::NeedMore(Pending::Token)),
            None => Ok(base),
            Some(c) => match continuations.iter().find(|&&(key, _)| key == c) {
                Some(&(_, extended)) => {
                    self.advance();
                    Ok(extended)
                }
                None => Ok(base),
            },
        }
    }

    /// Scans an IO number: digits immediately preceding a redirection
    /// operator.
    ///
    /// Returns `Ok(None)`, with the cursor restored, when the digits are not
    /// followed by a redirection operator and thus belong to a word.
    fn io_number(&mut self, start: Location) -> ScanResult<Option<Token>> {
        let save = self.cursor;
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.advance();
            } else {
                break;
            }
        }
        match self.peek() {
            None if !self.finished => Err(Blocked::NeedMore(Pending::Token)),
            Some('<' | '>') => match digits.parse() {
                Ok(value) => {
                    let word = Word::from_literal(digits, start);
                    Ok(Some(Token::new(TokenId::IoNumber(value), word)))
                }
                Err(_) => self.error(LexErrorKind::IoNumberOutOfRange, start),
            },
            _ => {
                self.cursor = save;
                Ok(None)
            }
        }
    }

    /// Scans an IO location: `{name}` immediately preceding a redirection
    /// operator.
    ///
    /// Returns `Ok(None)`, with the cursor restored, when the braces do not
    /// form an IO location, in which case the `{` belongs to a word. A
    /// `{...}` directly followed by a redirection operator whose content is
    /// neither an identifier nor decimal digits is an error.
    fn io_location(&mut self, start: Location) -> ScanResult<Option<Token>> {
        let save = self.cursor;
        self.advance(); // '{'
        let mut name = String::new();
        loop {
            match self.peek() {
                None if !self.finished => return Err(Blocked::NeedMore(Pending::Token)),
                Some('}') => {
                    self.advance();
                    break;
                }
                Some(c) if !is_blank(c) && c != '\n' && !is_operator_start(c) && c != '\'' && c != '"' => {
                    name.push(c);
                    self.advance();
                }
                _ => {
                    self.cursor = save;
                    return Ok(None);
                }
            }
        }
        match self.peek() {
            None if !self.finished => Err(Blocked::NeedMore(Pending::Token)),
            Some('<' | '>') => {
                let valid = crate::syntax::is_name(&name)
                    || (!name.is_empty() && name.chars().all(|c| c.is_ascii_digit()));
                if valid {
                    let word = Word::from_literal(format!("{{{name}}}"), start);
                    Ok(Some(Token::new(TokenId::IoLocation(name), word)))
                } else {
                    self.error(LexErrorKind::InvalidIoLocation, start)
                }
            }
            _ => {
                self.cursor = save;
                Ok(None)
            }
        }
    }
}

/// Delimiter predicate for words in normal context
pub(super) fn normal_word_delimiter(c: char) -> bool {
    is_blank(c) || is_operator_start(c)
}

/// State of the [`Lexer`] between scans
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Scanning ordinary tokens
    Scanning,
    /// Draining queued here-document bodies
    HereDocBody,
}

/// Resumable lexical analyzer
///
/// See the [module documentation](super) for an overview and [`scan`]
/// (Lexer::scan) for the contract.
#[derive(Debug)]
pub struct Lexer {
    source: String,
    committed: Cursor,
    finished: bool,
    eof_emitted: bool,
    state: State,
    here_docs: VecDeque<HereDocEntry>,
    /// Set after a here-document operator token; the next word token is its
    /// delimiter.
    awaiting_delimiter: Option<bool>,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    /// Creates a lexer with an empty buffer.
    #[must_use]
    pub fn new() -> Lexer {
        Lexer {
            source: String::new(),
            committed: Cursor::start(),
            finished: false,
            eof_emitted: false,
            state: State::Scanning,
            here_docs: VecDeque::new(),
            awaiting_delimiter: None,
        }
    }

    /// Appends source text to the buffer.
    ///
    /// # Panics
    ///
    /// If the input has been [finished](Self::finish).
    pub fn push_source(&mut self, source: &str) {
        assert!(!self.finished, "cannot push source after finish");
        self.source.push_str(source);
    }

    /// Marks the input stream as definitely finished.
    ///
    /// After this call, the next [`scan`](Self::scan) flushes any pending
    /// word, reports unclosed quotations and expansions as errors, and emits
    /// the end-of-input token.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Whether the input stream has been marked finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Scans the buffered input, appending complete tokens to `sink`.
    ///
    /// Tokens already emitted by previous calls are not emitted again. The
    /// return status tells whether the lexer consumed everything available
    /// (`Ok`), is suspended inside an unfinished construct (`Incomplete`),
    /// is waiting for here-document bodies (`NeedHereDoc`), or found invalid
    /// input (`Error`).
    pub fn scan(&mut self, sink: &mut Vec<Token>) -> LexStatus {
        loop {
            match self.state {
                State::HereDocBody => {
                    match heredoc::advance_body(
                        &self.source,
                        &mut self.committed,
                        self.finished,
                        &mut self.here_docs,
                    ) {
                        Step::Blocked => return LexStatus::NeedHereDoc,
                        Step::BodyLine => {}
                        Step::Complete(token) => {
                            sink.push(token);
                            if self.here_docs.is_empty() {
                                self.state = State::Scanning;
                            }
                        }
                        Step::Abandoned => {
                            self.here_docs.clear();
                            self.state = State::Scanning;
                        }
                    }
                }
                State::Scanning => {
                    let mut scanner = Scanner::new(&self.source, self.committed, self.finished);
                    match scanner.next_token() {
                        Ok(Some(token)) => {
                            self.committed = scanner.cursor;
                            self.note_token(&token);
                            sink.push(token);
                        }
                        Ok(None) => {
                            if self.finished && !self.eof_emitted {
                                self.committed = scanner.cursor;
                                self.eof_emitted = true;
                                let location = self.committed.location;
                                sink.push(Token::new(TokenId::EndOfInput, Word::empty(location)));
                            }
                            return LexStatus::Ok;
                        }
                        Err(Blocked::NeedMore(Pending::Token)) => return LexStatus::Ok,
                        Err(Blocked::NeedMore(_)) => return LexStatus::Incomplete,
                        Err(Blocked::Error(error)) => return LexStatus::Error(error),
                    }
                }
            }
        }
    }

    /// Updates the here-document bookkeeping for an emitted token.
    fn note_token(&mut self, token: &Token) {
        match &token.id {
            TokenId::Operator(op) if op.is_here_doc() => {
                self.awaiting_delimiter = Some(*op == super::Operator::LessLessDash);
            }
            TokenId::Word => {
                if let Some(remove_tabs) = self.awaiting_delimiter.take() {
                    let (delimiter, quoted) = token.word.unquote();
                    self.here_docs
                        .push_back(HereDocEntry::new(delimiter, remove_tabs, quoted));
                }
            }
            TokenId::Operator(super::Operator::Newline) => {
                self.awaiting_delimiter = None;
                if !self.here_docs.is_empty() {
                    self.state = State::HereDocBody;
                }
            }
            _ => self.awaiting_delimiter = None,
        }
    }

    /// Tokenizes a complete source string.
    ///
    /// This is a convenience wrapper that pushes the whole string, finishes
    /// the input, and scans it. The returned token list ends with the
    /// end-of-input token.
    pub fn tokenize_all(source: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new();
        lexer.push_source(source);
        lexer.finish();
        let mut tokens = Vec::new();
        match lexer.scan(&mut tokens) {
            LexStatus::Ok => Ok(tokens),
            LexStatus::Error(error) => Err(error),
            status => unreachable!("finished lexer cannot suspend: {status:?}"),
        }
    }
}
