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

//! Part of the lexer that defines operators

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Operator token identifier
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    /// Newline
    Newline,
    /// `&`
    And,
    /// `&&`
    AndAnd,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `;`
    Semicolon,
    /// `;;`
    SemicolonSemicolon,
    /// `;&`
    SemicolonAnd,
    /// `<`
    Less,
    /// `<&`
    LessAnd,
    /// `<<`
    LessLess,
    /// `<<-`
    LessLessDash,
    /// `<>`
    LessGreater,
    /// `>`
    Greater,
    /// `>&`
    GreaterAnd,
    /// `>>`
    GreaterGreater,
    /// `>|`
    GreaterBar,
    /// `|`
    Bar,
    /// `||`
    BarBar,
}

impl Operator {
    /// Returns the string representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        use Operator::*;
        match self {
            Newline => "\n",
            And => "&",
            AndAnd => "&&",
            OpenParen => "(",
            CloseParen => ")",
            Semicolon => ";",
            SemicolonSemicolon => ";;",
            SemicolonAnd => ";&",
            Less => "<",
            LessAnd => "<&",
            LessLess => "<<",
            LessLessDash => "<<-",
            LessGreater => "<>",
            Greater => ">",
            GreaterAnd => ">&",
            GreaterGreater => ">>",
            GreaterBar => ">|",
            Bar => "|",
            BarBar => "||",
        }
    }

    /// Whether this operator is a redirection operator.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        use Operator::*;
        matches!(
            self,
            Less | LessAnd
                | LessLess
                | LessLessDash
                | LessGreater
                | Greater
                | GreaterAnd
                | GreaterGreater
                | GreaterBar
        )
    }

    /// Whether this operator introduces a here-document.
    #[must_use]
    pub const fn is_here_doc(&self) -> bool {
        matches!(self, Operator::LessLess | Operator::LessLessDash)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error value indicating that a string is not an operator
///
/// This error is returned by [`Operator::from_str`].
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[error("not an operator")]
pub struct ParseOperatorError;

impl FromStr for Operator {
    type Err = ParseOperatorError;
    fn from_str(s: &str) -> Result<Operator, ParseOperatorError> {
        use Operator::*;
        match s {
            "\n" => Ok(Newline),
            "&" => Ok(And),
            "&&" => Ok(AndAnd),
            "(" => Ok(OpenParen),
            ")" => Ok(CloseParen),
            ";" => Ok(Semicolon),
            ";;" => Ok(SemicolonSemicolon),
            ";&" => Ok(SemicolonAnd),
            "<" => Ok(Less),
            "<&" => Ok(LessAnd),
            "<<" => Ok(LessLess),
            "<<-" => Ok(LessLessDash),
            "<>" => Ok(LessGreater),
            ">" => Ok(Greater),
            ">&" => Ok(GreaterAnd),
            ">>" => Ok(GreaterGreater),
            ">|" => Ok(GreaterBar),
            "|" => Ok(Bar),
            "||" => Ok(BarBar),
            _ => Err(ParseOperatorError),
        }
    }
}

/// Tests whether a character can start an operator token.
#[must_use]
pub(crate) const fn is_operator_start(c: char) -> bool {
    matches!(c, '&' | '|' | ';' | '<' | '>' | '(' | ')' | '\n')
}
