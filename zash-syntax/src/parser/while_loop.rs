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

//! Syntax parser for while and until loops

use super::core::{Parser, Result};
use super::error::SyntaxError;
use super::lex::Keyword;
use crate::grammar::GNode;
use crate::source::Location;

impl Parser<'_> {
    /// Parses a `while` loop from the `while` keyword through `done`.
    pub(super) fn while_clause(&mut self) -> Result<GNode> {
        let opening_location = self.location();
        self.take_keyword(Keyword::While);

        let condition = self.compound_list()?;
        if condition.is_empty_list() {
            return self.error(SyntaxError::EmptyWhileCondition);
        }
        if !self.take_keyword(Keyword::Do) {
            self.peek()?;
            return self.error(SyntaxError::UnclosedWhileClause { opening_location });
        }
        let body = self.do_clause_body(opening_location)?;

        Ok(GNode::WhileClause {
            condition: Box::new(condition),
            body: Box::new(body),
        })
    }

    /// Parses an `until` loop from the `until` keyword through `done`.
    pub(super) fn until_clause(&mut self) -> Result<GNode> {
        let opening_location = self.location();
        self.take_keyword(Keyword::Until);

        let condition = self.compound_list()?;
        if condition.is_empty_list() {
            return self.error(SyntaxError::EmptyUntilCondition);
        }
        if !self.take_keyword(Keyword::Do) {
            self.peek()?;
            return self.error(SyntaxError::UnclosedUntilClause { opening_location });
        }
        let body = self.do_clause_body(opening_location)?;

        Ok(GNode::UntilClause {
            condition: Box::new(condition),
            body: Box::new(body),
        })
    }

    /// Parses the command list of a `do` clause whose `do` keyword has been
    /// consumed, through `done`.
    pub(super) fn do_clause_body(&mut self, opening_location: Location) -> Result<GNode> {
        let body = self.compound_list()?;
        if !self.take_keyword(Keyword::Done) {
            self.peek()?;
            return self.error(SyntaxError::UnclosedDoClause { opening_location });
        }
        if body.is_empty_list() {
            return self.error_at(SyntaxError::EmptyDoClause, opening_location);
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::Parse;
    use super::super::lex::Lexer;
    use super::super::Parser;
    use super::*;
    use assert_matches::assert_matches;

    fn parse_loop(source: &str) -> GNode {
        let tokens = Lexer::tokenize_all(source).unwrap();
        let parse = Parser::new(tokens).parse_program().unwrap();
        let program = assert_matches!(parse, Parse::Complete(p) => p);
        find_loop(program).expect("no loop found")
    }

    fn find_loop(node: GNode) -> Option<GNode> {
        match node {
            GNode::WhileClause { .. } | GNode::UntilClause { .. } => Some(node),
            GNode::Program(items) => items.into_iter().find_map(find_loop),
            GNode::CompleteCommand { list, .. } => find_loop(*list),
            GNode::List { items, .. } => items.into_iter().find_map(find_loop),
            GNode::AndOr { first, .. } => find_loop(*first),
            GNode::Pipeline { sequence, .. } => find_loop(*sequence),
            GNode::PipeSequence(items) => items.into_iter().find_map(find_loop),
            GNode::CompoundCommand { command, .. } => find_loop(*command),
            _ => None,
        }
    }

    #[test]
    fn while_loop() {
        let node = parse_loop("while test -f lock; do sleep 1; done\n");
        assert_matches!(node, GNode::WhileClause { .. });
    }

    #[test]
    fn until_loop() {
        let node = parse_loop("until test -f ready\ndo\n  sleep 1\ndone\n");
        assert_matches!(node, GNode::UntilClause { .. });
    }

    #[test]
    fn missing_do_is_an_error() {
        let tokens = Lexer::tokenize_all("while true; sleep 1; done\n").unwrap();
        let error = Parser::new(tokens).parse_program().unwrap_err();
        assert_matches!(error.cause, SyntaxError::UnclosedWhileClause { .. });
    }

    #[test]
    fn missing_done_is_an_error_at_end_of_input() {
        let tokens = Lexer::tokenize_all("while true; do sleep 1\n").unwrap();
        let error = Parser::new(tokens).parse_program().unwrap_err();
        assert_matches!(error.cause, SyntaxError::UnclosedDoClause { .. });
    }

    #[test]
    fn empty_body_is_an_error() {
        let tokens = Lexer::tokenize_all("while true; do done\n").unwrap();
        let error = Parser::new(tokens).parse_program().unwrap_err();
        assert_eq!(error.cause, SyntaxError::EmptyDoClause);
    }
}
