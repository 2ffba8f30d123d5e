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

//! Lexical elements of the shell command language
//!
//! This module defines the token model produced by the
//! [lexer](crate::parser::lex::Lexer) and consumed by the
//! [parser](crate::parser::Parser).
//!
//! The canonical syntactic unit is the [`Word`], a finite ordered sequence of
//! [parts](WordPart). A part is a tagged [unit](PartUnit) — a literal run, a
//! tilde prefix, a parameter expansion, a command substitution or an
//! arithmetic expansion — and records whether it appeared under single or
//! double quotes. The quoting history of each part governs whether the output
//! of its later expansion is subject to field splitting and pathname
//! expansion.
//!
//! A [`Token`] wraps a word together with a [`TokenId`] that classifies it as
//! a plain word, an operator, a promoted reserved word, an IO number, an IO
//! location, the synthetic end-of-here-document marker, or the end of input.

use crate::parser::lex::Keyword;
use crate::parser::lex::Operator;
use crate::source::Location;

/// Special parameter
///
/// This enum value identifies a special parameter in the shell language.
/// Each special parameter is a single character that has a special meaning in
/// the shell language. For example, `@` represents all positional parameters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SpecialParam {
    /// `@` (all positional parameters)
    At,
    /// `*` (all positional parameters)
    Asterisk,
    /// `#` (number of positional parameters)
    Number,
    /// `?` (exit status of the last command)
    Question,
    /// `-` (active shell options)
    Hyphen,
    /// `$` (process ID of the shell)
    Dollar,
    /// `!` (process ID of the last asynchronous command)
    Exclamation,
    /// `0` (name of the shell or shell script)
    Zero,
}

impl SpecialParam {
    /// Returns the special parameter for the given character, if any.
    #[must_use]
    pub fn from_char(c: char) -> Option<SpecialParam> {
        use SpecialParam::*;
        match c {
            '@' => Some(At),
            '*' => Some(Asterisk),
            '#' => Some(Number),
            '?' => Some(Question),
            '-' => Some(Hyphen),
            '$' => Some(Dollar),
            '!' => Some(Exclamation),
            '0' => Some(Zero),
            _ => None,
        }
    }
}

/// Type of a parameter
///
/// This enum distinguishes the three kinds of [parameters](Param): named,
/// special and positional. The value does not include the actual parameter
/// name as a string; the name is stored in the `id` field of the `Param` that
/// contains this value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ParamKind {
    /// Named parameter (a variable)
    Variable,
    /// Special parameter
    Special(SpecialParam),
    /// Positional parameter
    ///
    /// Positional parameters are indexed starting from 1. If the string form
    /// represents an index too large to fit in a `usize`, the index is
    /// `usize::MAX`, which is guaranteed to name a non-existent parameter.
    Positional(usize),
}

/// Flag that specifies how the value is substituted in a [switch](Switch)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwitchKind {
    /// Alter an existing value, if any. (`+`)
    Alter,
    /// Substitute a missing value with a default. (`-`)
    Default,
    /// Assign a default to the variable if the value is missing. (`=`)
    Assign,
    /// Error out if the value is missing. (`?`)
    Error,
}

/// Condition that triggers a [switch](Switch)
///
/// In the lexical grammar of the shell language, a switch condition is an
/// optional colon that precedes a switch kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwitchCondition {
    /// Without a colon, the switch is triggered if the parameter is unset.
    Unset,
    /// With a colon, the switch is triggered if the parameter is unset or
    /// empty.
    UnsetOrEmpty,
}

/// Parameter expansion [modifier](Modifier) that conditionally substitutes
/// the value being expanded
///
/// Examples of switches include `+foo`, `:-bar` and `:=baz`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Switch {
    /// How the value is substituted
    pub kind: SwitchKind,
    /// Condition that determines whether the value is substituted or not
    pub condition: SwitchCondition,
    /// Word that substitutes the parameter value
    pub word: Word,
}

/// Flag that specifies which side of the expanded value is removed in a
/// [trim](Trim)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TrimSide {
    /// Beginning of the value (`#`)
    Prefix,
    /// End of the value (`%`)
    Suffix,
}

/// Flag that specifies the pattern matching strategy in a [trim](Trim)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TrimLength {
    /// Match as small a number of characters as possible.
    Shortest,
    /// Match as large a number of characters as possible.
    Longest,
}

/// Parameter expansion [modifier](Modifier) that removes the beginning or
/// end of the value being expanded
///
/// Examples of trims include `#foo`, `##bar` and `%%baz*`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trim {
    /// Which side of the value should be removed?
    pub side: TrimSide,
    /// How long the pattern should match?
    pub length: TrimLength,
    /// Pattern to be matched with the expanded value.
    pub pattern: Word,
}

/// Attribute that modifies a parameter expansion
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Modifier {
    /// No modifier
    None,
    /// `#` prefix (`${#foo}`)
    Length,
    /// `+`, `-`, `=` or `?` suffix, optionally with `:` (`${foo:-bar}`)
    Switch(Switch),
    /// `#`, `##`, `%` or `%%` suffix
    Trim(Trim),
}

/// Parameter expansion
///
/// A parameter expansion names a [parameter](ParamKind) and an optional
/// [modifier](Modifier). The `kind` field is precomputed from `id` by the
/// lexer so that the expander does not re-parse the name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Param {
    /// Literal representation of the parameter name
    ///
    /// This is the raw string form of the parameter as it appears in the
    /// source code. Examples include `foo`, `@`, `#`, `0`, and `12`.
    pub id: String,

    /// Type of the parameter
    ///
    /// It is the lexer's responsibility to keep this consistent with `id`.
    pub kind: ParamKind,

    /// Modifier applied when the parameter is expanded
    pub modifier: Modifier,
}

impl Param {
    /// Creates a parameter with the kind computed from the name.
    #[must_use]
    pub fn from_id<I: Into<String>>(id: I) -> Param {
        fn with_id(id: String) -> Param {
            let kind = if let [c] = id.chars().collect::<Vec<char>>()[..] {
                match SpecialParam::from_char(c) {
                    Some(special) => ParamKind::Special(special),
                    None if c.is_ascii_digit() => {
                        ParamKind::Positional(c.to_digit(10).unwrap() as usize)
                    }
                    None => ParamKind::Variable,
                }
            } else if id.chars().all(|c| c.is_ascii_digit()) && !id.is_empty() {
                ParamKind::Positional(id.parse().unwrap_or(usize::MAX))
            } else {
                ParamKind::Variable
            };
            Param {
                id,
                kind,
                modifier: Modifier::None,
            }
        }
        with_id(id.into())
    }
}

/// Element of a [`WordPart`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PartUnit {
    /// Literal character run
    Literal(String),

    /// Tilde expansion
    ///
    /// The `String` value does not contain the initial tilde.
    Tilde(String),

    /// Parameter expansion
    Param(Box<Param>),

    /// Command substitution (`$(...)` or backquotes)
    ///
    /// The lexer tokenizes the content of the substitution; the expander
    /// parses and lowers the captured token list on demand and hands the
    /// result to the command-running capability. The raw content text is kept
    /// for displaying the word back as source code.
    CommandSubst {
        /// Source text between the parentheses
        content: String,
        /// Tokenized content
        tokens: Vec<Token>,
    },

    /// Arithmetic expansion (`$((...))`)
    ///
    /// Like command substitution, the content is captured both as raw text
    /// and as a token list.
    Arith {
        /// Source text between the double parentheses
        content: String,
        /// Tokenized content
        tokens: Vec<Token>,
    },
}

/// One segment of a [`Word`]
///
/// A part pairs a [unit](PartUnit) with the quoting that was in effect where
/// the part appeared. The output of expanding a part is subject to field
/// splitting only when both flags are false. A backslash-escaped character
/// outside quotes is recorded as a literal part with `single_quoted` set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WordPart {
    /// Content of the part
    pub unit: PartUnit,
    /// Whether the part was inside single quotes (or backslash-escaped)
    pub single_quoted: bool,
    /// Whether the part was inside double quotes
    pub double_quoted: bool,
}

impl WordPart {
    /// Creates an unquoted part.
    #[must_use]
    pub fn unquoted(unit: PartUnit) -> WordPart {
        WordPart {
            unit,
            single_quoted: false,
            double_quoted: false,
        }
    }

    /// Whether this part was quoted in any way.
    #[must_use]
    pub fn is_quoted(&self) -> bool {
        self.single_quoted || self.double_quoted
    }
}

/// Token that may involve expansions and quotes
///
/// A word is a sequence of [parts](WordPart). The empty word consists of one
/// `Literal("")` part; the parser relies on every word having at least one
/// part.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Word {
    /// Parts that constitute the word
    pub parts: Vec<WordPart>,
    /// Position of the first character of the word in the source code
    pub location: Location,
}

impl Word {
    /// Creates the empty word.
    #[must_use]
    pub fn empty(location: Location) -> Word {
        Word {
            parts: vec![WordPart::unquoted(PartUnit::Literal(String::new()))],
            location,
        }
    }

    /// Creates a word of one unquoted literal part.
    #[must_use]
    pub fn from_literal<S: Into<String>>(value: S, location: Location) -> Word {
        Word {
            parts: vec![WordPart::unquoted(PartUnit::Literal(value.into()))],
            location,
        }
    }

    /// Whether any part of this word was quoted.
    #[must_use]
    pub fn is_quoted(&self) -> bool {
        self.parts.iter().any(WordPart::is_quoted)
    }

    /// Returns the literal string value of this word if it consists of
    /// unquoted literal parts only.
    ///
    /// This function is used to test a word against reserved words, alias
    /// names and other syntactic constructs that require an unquoted literal.
    #[must_use]
    pub fn to_string_if_literal(&self) -> Option<String> {
        self.parts
            .iter()
            .map(|part| match &part.unit {
                PartUnit::Literal(value) if !part.is_quoted() => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns the text of this word with quotation marks removed, and
    /// whether any portion was quoted.
    ///
    /// Expansions render as their source form. This function computes the
    /// delimiter of a here-document operator, where quoting decides whether
    /// the body will be subject to expansion.
    #[must_use]
    pub fn unquote(&self) -> (String, bool) {
        let mut quoted = false;
        let text = self
            .parts
            .iter()
            .map(|part| {
                quoted |= part.is_quoted();
                match &part.unit {
                    PartUnit::Literal(value) => value.clone(),
                    PartUnit::Tilde(name) => format!("~{name}"),
                    other => {
                        // Render expansions back to source form.
                        let part = WordPart::unquoted(other.clone());
                        part.to_string()
                    }
                }
            })
            .collect();
        (text, quoted)
    }

    /// Splits this word into an assignment name and value if it has the form
    /// `name=value`.
    ///
    /// The name must be a non-empty unquoted literal identifier preceding the
    /// first `=`, which must not itself be quoted. The returned value word
    /// covers everything after the `=`.
    #[must_use]
    pub fn split_assignment(&self) -> Option<(String, Word)> {
        let first = self.parts.first()?;
        if first.is_quoted() {
            return None;
        }
        let PartUnit::Literal(text) = &first.unit else {
            return None;
        };
        let index = text.find('=')?;
        let name = &text[..index];
        if !is_name(name) {
            return None;
        }

        let rest = &text[index + 1..];
        let mut parts = Vec::new();
        if !rest.is_empty() || self.parts.len() == 1 {
            parts.push(WordPart::unquoted(PartUnit::Literal(rest.to_string())));
        }
        parts.extend(self.parts[1..].iter().cloned());
        if parts.is_empty() {
            parts.push(WordPart::unquoted(PartUnit::Literal(String::new())));
        }
        Some((
            name.to_string(),
            Word {
                parts,
                location: self.location,
            },
        ))
    }
}

/// Tests whether a string is a valid shell variable name.
///
/// A name is a non-empty sequence of ASCII letters, digits and underscores
/// not starting with a digit.
#[must_use]
pub fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Here-document metadata attached to an end-of-here-document token
///
/// When the lexer sees a `<<` or `<<-` operator, it queues the delimiter read
/// from the same line. At the next newline it drains the queue in order,
/// reading raw body lines until the delimiter, and emits one
/// [`EndOfHereDoc`](TokenId::EndOfHereDoc) token per queue entry carrying
/// this marker. The parser then pairs the markers back to their redirection
/// operators.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HereDocMarker {
    /// Delimiter word with quotation marks removed
    pub delimiter: String,

    /// Whether leading tab characters are stripped from body lines
    ///
    /// This value is `true` for the `<<-` operator and `false` for `<<`.
    pub remove_tabs: bool,

    /// Whether any portion of the delimiter was quoted
    ///
    /// If the delimiter was quoted, every body byte is literal. Otherwise the
    /// body is subject to parameter, command and arithmetic expansion when
    /// the redirection is performed.
    pub quoted: bool,

    /// Accumulated body of the here-document
    ///
    /// The body ends with a newline unless it is empty. `None` until the
    /// delimiter line has been matched.
    pub body: Option<String>,
}

/// Token identifier
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenId {
    /// Normal word token
    Word,
    /// Operator token
    Operator(Operator),
    /// Reserved word
    ///
    /// Keyword tokens are produced by the parser promoting word tokens at
    /// known grammar positions, never by the lexer.
    Keyword(Keyword),
    /// Decimal digits immediately preceding a redirection operator
    IoNumber(i32),
    /// `{name}` immediately preceding a redirection operator
    IoLocation(String),
    /// Synthetic token carrying a finished here-document body
    EndOfHereDoc,
    /// End of input
    ///
    /// This token is emitted only after the driver has marked the input
    /// stream as definitely finished.
    EndOfInput,
}

/// Result of lexical analysis
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    /// Token identifier
    pub id: TokenId,

    /// Word value of the token
    ///
    /// For operator and end-of-input tokens, the word is empty and only
    /// provides the token's location.
    pub word: Word,

    /// Here-document metadata
    ///
    /// `Some(_)` only for [`EndOfHereDoc`](TokenId::EndOfHereDoc) tokens.
    pub here_doc: Option<Box<HereDocMarker>>,
}

impl Token {
    /// Creates a token without here-document metadata.
    #[must_use]
    pub fn new(id: TokenId, word: Word) -> Token {
        Token {
            id,
            word,
            here_doc: None,
        }
    }

    /// Returns the location of the first character of this token.
    #[must_use]
    pub fn location(&self) -> Location {
        self.word.location
    }

    /// Returns the reserved word this token could be promoted to, if any.
    ///
    /// Promotion requires the token to be a plain word consisting of a single
    /// unquoted literal part matching a reserved-word string.
    #[must_use]
    pub fn promotable_keyword(&self) -> Option<Keyword> {
        if self.id != TokenId::Word {
            return None;
        }
        match &self.word.parts[..] {
            [part] if !part.is_quoted() => match &part.unit {
                PartUnit::Literal(value) => value.parse().ok(),
                _ => None,
            },
            _ => None,
        }
    }
}

mod impl_display;
