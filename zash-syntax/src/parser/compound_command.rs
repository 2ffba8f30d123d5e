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

//! Syntax parser for compound commands: the dispatch, subshells and brace
//! groupings

use super::core::{Parser, Result};
use super::error::SyntaxError;
use super::lex::{Keyword, Operator};
use crate::grammar::GNode;

impl Parser<'_> {
    /// Parses a compound command and its trailing redirections, and pairs
    /// any here-document bodies of the redirections.
    pub(super) fn compound_with_redirects(&mut self) -> Result<GNode> {
        let command = self.compound_command()?;
        let redirects = self.redirect_list()?;
        let mut node = GNode::CompoundCommand {
            command: Box::new(command),
            redirects: redirects.map(Box::new),
        };
        self.pair_here_docs(&mut node)?;
        Ok(node)
    }

    fn compound_command(&mut self) -> Result<GNode> {
        if self.at_operator(Operator::OpenParen) {
            return self.subshell();
        }
        match self.peek_keyword() {
            Some(Keyword::If) => self.if_clause(),
            Some(Keyword::While) => self.while_clause(),
            Some(Keyword::Until) => self.until_clause(),
            Some(Keyword::For) => self.for_clause(),
            Some(Keyword::Case) => self.case_clause(),
            Some(Keyword::OpenBrace) => self.brace_group(),
            other => unreachable!("not a compound command head: {other:?}"),
        }
    }

    /// Parses a subshell: `( compound_list )`.
    fn subshell(&mut self) -> Result<GNode> {
        let opening_location = self.location();
        self.take_operator(Operator::OpenParen);
        let body = self.compound_list()?;
        if !self.take_operator(Operator::CloseParen) {
            self.peek()?;
            return self.error(SyntaxError::UnclosedSubshell { opening_location });
        }
        if body.is_empty_list() {
            return self.error_at(SyntaxError::EmptySubshell, opening_location);
        }
        Ok(GNode::Subshell(Box::new(body)))
    }

    /// Parses a brace grouping: `{ compound_list }`.
    fn brace_group(&mut self) -> Result<GNode> {
        let opening_location = self.location();
        self.take_keyword(Keyword::OpenBrace);
        let body = self.compound_list()?;
        if !self.take_keyword(Keyword::CloseBrace) {
            self.peek()?;
            return self.error(SyntaxError::UnclosedGrouping { opening_location });
        }
        if body.is_empty_list() {
            return self.error_at(SyntaxError::EmptyGrouping, opening_location);
        }
        Ok(GNode::BraceGroup(Box::new(body)))
    }
}
