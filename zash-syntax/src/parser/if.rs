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

//! Syntax parser for the if command

use super::core::{Parser, Result};
use super::error::SyntaxError;
use super::lex::Keyword;
use crate::grammar::GNode;
use crate::source::Location;

impl Parser<'_> {
    /// Parses an `if` construct from the `if` keyword through `fi`.
    pub(super) fn if_clause(&mut self) -> Result<GNode> {
        let opening_location = self.location();
        self.take_keyword(Keyword::If);

        let condition = self.compound_list()?;
        if condition.is_empty_list() {
            return self.error(SyntaxError::EmptyIfCondition);
        }
        if !self.take_keyword(Keyword::Then) {
            self.peek()?;
            return self.error(SyntaxError::IfMissingThen {
                if_location: opening_location,
            });
        }
        let then_body = self.compound_list()?;
        if then_body.is_empty_list() {
            return self.error(SyntaxError::EmptyIfBody);
        }
        let else_part = self.else_part(opening_location)?;

        Ok(GNode::IfClause {
            condition: Box::new(condition),
            then_body: Box::new(then_body),
            else_part,
        })
    }

    /// Parses the `elif`/`else`/`fi` tail of an `if` construct, consuming
    /// the final `fi`.
    fn else_part(&mut self, opening_location: Location) -> Result<Option<Box<GNode>>> {
        if self.take_keyword(Keyword::Fi) {
            return Ok(None);
        }

        if self.peek_keyword() == Some(Keyword::Elif) {
            let elif_location = self.location();
            self.take_keyword(Keyword::Elif);
            let condition = self.compound_list()?;
            if condition.is_empty_list() {
                return self.error(SyntaxError::EmptyElifCondition);
            }
            if !self.take_keyword(Keyword::Then) {
                self.peek()?;
                return self.error(SyntaxError::ElifMissingThen { elif_location });
            }
            let body = self.compound_list()?;
            if body.is_empty_list() {
                return self.error(SyntaxError::EmptyElifBody);
            }
            let else_part = self.else_part(opening_location)?;
            return Ok(Some(Box::new(GNode::ElsePart {
                condition: Some(Box::new(condition)),
                body: Box::new(body),
                else_part,
            })));
        }

        if self.take_keyword(Keyword::Else) {
            let body = self.compound_list()?;
            if body.is_empty_list() {
                return self.error(SyntaxError::EmptyElse);
            }
            if !self.take_keyword(Keyword::Fi) {
                self.peek()?;
                return self.error(SyntaxError::UnclosedIf { opening_location });
            }
            return Ok(Some(Box::new(GNode::ElsePart {
                condition: None,
                body: Box::new(body),
                else_part: None,
            })));
        }

        self.peek()?;
        self.error(SyntaxError::UnclosedIf { opening_location })
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::Parse;
    use super::super::lex::Lexer;
    use super::super::Parser;
    use super::*;
    use assert_matches::assert_matches;

    fn parse_if(source: &str) -> GNode {
        let tokens = Lexer::tokenize_all(source).unwrap();
        let parse = Parser::new(tokens).parse_program().unwrap();
        let program = assert_matches!(parse, Parse::Complete(p) => p);
        find_if(program).expect("no if clause found")
    }

    fn find_if(node: GNode) -> Option<GNode> {
        match node {
            GNode::IfClause { .. } => Some(node),
            GNode::Program(items) | GNode::PipeSequence(items) => {
                items.into_iter().find_map(find_if)
            }
            GNode::CompleteCommand { list, .. } => find_if(*list),
            GNode::List { items, .. } => items.into_iter().find_map(find_if),
            GNode::AndOr { first, .. } => find_if(*first),
            GNode::Pipeline { sequence, .. } => find_if(*sequence),
            GNode::CompoundCommand { command, .. } => find_if(*command),
            _ => None,
        }
    }

    #[test]
    fn if_then_fi() {
        let node = parse_if("if true; then echo yes; fi\n");
        assert_matches!(node, GNode::IfClause { else_part: None, .. });
    }

    #[test]
    fn if_with_else() {
        let node = parse_if("if true\nthen echo yes\nelse echo no\nfi\n");
        assert_matches!(node, GNode::IfClause { else_part: Some(else_part), .. } => {
            assert_matches!(*else_part, GNode::ElsePart { condition: None, else_part: None, .. });
        });
    }

    #[test]
    fn elif_chain() {
        let node = parse_if("if a; then b; elif c; then d; elif e; then f; else g; fi\n");
        assert_matches!(node, GNode::IfClause { else_part: Some(else_part), .. } => {
            assert_matches!(*else_part, GNode::ElsePart { condition: Some(_), else_part: Some(next), .. } => {
                assert_matches!(*next, GNode::ElsePart { condition: Some(_), else_part: Some(last), .. } => {
                    assert_matches!(*last, GNode::ElsePart { condition: None, else_part: None, .. });
                });
            });
        });
    }

    #[test]
    fn empty_condition_is_an_error() {
        let tokens = Lexer::tokenize_all("if then echo; fi\n").unwrap();
        let error = Parser::new(tokens).parse_program().unwrap_err();
        assert_eq!(error.cause, SyntaxError::EmptyIfCondition);
    }

    #[test]
    fn missing_then_is_an_error() {
        let tokens = Lexer::tokenize_all("if true; echo; fi\n").unwrap();
        let error = Parser::new(tokens).parse_program().unwrap_err();
        assert_matches!(error.cause, SyntaxError::IfMissingThen { .. });
    }

    #[test]
    fn missing_fi_is_incomplete_without_end_of_input() {
        let mut tokens = Lexer::tokenize_all("if true; then echo yes\n").unwrap();
        tokens.pop();
        let parse = Parser::new(tokens).parse_program().unwrap();
        assert_eq!(parse, Parse::Incomplete);
    }
}
