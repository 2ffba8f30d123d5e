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

//! Syntax parser for commands: the dispatch between simple commands,
//! compound commands and function definitions

use super::core::{Parser, Result};
use super::error::SyntaxError;
use super::lex::{Keyword, Operator};
use crate::grammar::GNode;
use crate::syntax::is_name;
use crate::syntax::TokenId;

impl Parser<'_> {
    /// Parses one command.
    ///
    /// The caller must have established that a command can start at the
    /// current token.
    pub(super) fn command(&mut self) -> Result<GNode> {
        while self.substitute_alias()? {}
        let id = self.peek()?.id.clone();
        match id {
            TokenId::Operator(Operator::OpenParen) => self.compound_with_redirects(),
            TokenId::Operator(_) | TokenId::IoNumber(_) | TokenId::IoLocation(_) => {
                self.simple_command()
            }
            TokenId::Word => match self.peek_keyword() {
                Some(
                    Keyword::If
                    | Keyword::While
                    | Keyword::Until
                    | Keyword::For
                    | Keyword::Case
                    | Keyword::OpenBrace,
                ) => self.compound_with_redirects(),
                Some(Keyword::In) => self.error(SyntaxError::InAsCommandName),
                Some(_) => self.error(SyntaxError::InvalidCommandToken),
                None => match self.function_definition()? {
                    Some(function) => Ok(function),
                    None => self.simple_command(),
                },
            },
            _ => self.error(SyntaxError::InvalidCommandToken),
        }
    }

    /// Parses a function definition command, speculatively.
    ///
    /// The current token must be a word. If the word is not followed by
    /// `( )`, or is not a valid function name, the cursor is restored and
    /// `Ok(None)` is returned so the caller parses a simple command instead.
    fn function_definition(&mut self) -> Result<Option<GNode>> {
        let save = self.save();
        let name = self.take()?;
        if !self.take_operator(Operator::OpenParen) {
            self.rewind(save);
            return Ok(None);
        }
        match name.word.to_string_if_literal() {
            Some(literal) if is_name(&literal) => {}
            _ => {
                self.rewind(save);
                return Ok(None);
            }
        }
        if !self.take_operator(Operator::CloseParen) {
            self.peek()?;
            return self.error(SyntaxError::UnmatchedParenthesis);
        }
        self.skip_newlines_within()?;

        let id = self.peek()?.id.clone();
        let body_is_compound = match id {
            TokenId::Operator(Operator::OpenParen) => true,
            TokenId::Word => matches!(
                self.peek_keyword(),
                Some(
                    Keyword::If
                        | Keyword::While
                        | Keyword::Until
                        | Keyword::For
                        | Keyword::Case
                        | Keyword::OpenBrace
                )
            ),
            TokenId::EndOfInput => return self.error(SyntaxError::MissingFunctionBody),
            _ => false,
        };
        if !body_is_compound {
            return self.error(SyntaxError::InvalidFunctionBody);
        }

        let compound = self.compound_with_redirects()?;
        let GNode::CompoundCommand { command, redirects } = compound else {
            unreachable!("compound_with_redirects must return a compound command")
        };
        Ok(Some(GNode::FunctionDefinition {
            name,
            body: Box::new(GNode::FunctionBody { command, redirects }),
        }))
    }
}
