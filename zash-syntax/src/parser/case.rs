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

//! Syntax parser for the case command

use super::core::{Parser, Result};
use super::error::SyntaxError;
use super::lex::{Keyword, Operator};
use crate::grammar::GNode;
use crate::syntax::TokenId;

impl Parser<'_> {
    /// Parses a `case` construct from the `case` keyword through `esac`.
    pub(super) fn case_clause(&mut self) -> Result<GNode> {
        let opening_location = self.location();
        self.take_keyword(Keyword::Case);

        let subject = match self.peek_opt() {
            None => return Err(super::core::Interrupt::Incomplete),
            Some(token) if token.id == TokenId::Word => self.take()?,
            Some(token) if token.id == TokenId::Operator(Operator::Newline) => {
                return self.error(SyntaxError::MissingCaseSubject)
            }
            Some(_) => return self.error(SyntaxError::InvalidCaseSubject),
        };

        self.skip_newlines_within()?;
        if !self.take_keyword(Keyword::In) {
            return self.error(SyntaxError::MissingIn { opening_location });
        }

        let mut items = Vec::new();
        loop {
            self.skip_newlines_within()?;
            if self.take_keyword(Keyword::Esac) {
                break;
            }
            if self.peek()?.id == TokenId::EndOfInput {
                return self.error(SyntaxError::UnclosedCase { opening_location });
            }
            items.push(self.case_item()?);
        }

        Ok(GNode::CaseClause { subject, items })
    }

    /// Parses one case branch: patterns, body, and the terminating `;;` or
    /// `;&` if present.
    fn case_item(&mut self) -> Result<GNode> {
        // An optional `(` may precede the pattern list; after it, `esac` is
        // an ordinary pattern word.
        self.take_operator(Operator::OpenParen);

        let mut patterns = Vec::new();
        loop {
            match self.peek_opt() {
                None => return Err(super::core::Interrupt::Incomplete),
                Some(token) if token.id == TokenId::Word => {
                    patterns.push(self.take()?);
                }
                Some(token) if token.id == TokenId::Operator(Operator::Bar) => {
                    return self.error(SyntaxError::MissingPattern)
                }
                Some(_) if patterns.is_empty() => {
                    return self.error(SyntaxError::MissingPattern)
                }
                Some(_) => return self.error(SyntaxError::InvalidPattern),
            }
            if !self.take_operator(Operator::Bar) {
                break;
            }
        }

        if !self.take_operator(Operator::CloseParen) {
            self.peek()?;
            return self.error(SyntaxError::UnclosedPatternList);
        }

        let body = self.case_item_body()?;
        let separator = if self.take_operator(Operator::SemicolonSemicolon) {
            Some(Operator::SemicolonSemicolon)
        } else if self.take_operator(Operator::SemicolonAnd) {
            Some(Operator::SemicolonAnd)
        } else {
            None
        };

        Ok(GNode::CaseItem {
            patterns: Box::new(GNode::PatternList(patterns)),
            body: body.map(Box::new),
            separator,
        })
    }

    /// Parses the possibly empty command list of a case branch.
    fn case_item_body(&mut self) -> Result<Option<GNode>> {
        let body = self.compound_list()?;
        Ok(if body.is_empty_list() { None } else { Some(body) })
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::Parse;
    use super::super::lex::Lexer;
    use super::super::Parser;
    use super::*;
    use assert_matches::assert_matches;

    fn parse_case(source: &str) -> GNode {
        let tokens = Lexer::tokenize_all(source).unwrap();
        let parse = Parser::new(tokens).parse_program().unwrap();
        let program = assert_matches!(parse, Parse::Complete(p) => p);
        find_case(program).expect("no case clause found")
    }

    fn find_case(node: GNode) -> Option<GNode> {
        match node {
            GNode::CaseClause { .. } => Some(node),
            GNode::Program(items) => items.into_iter().find_map(find_case),
            GNode::CompleteCommand { list, .. } => find_case(*list),
            GNode::List { items, .. } => items.into_iter().find_map(find_case),
            GNode::AndOr { first, .. } => find_case(*first),
            GNode::Pipeline { sequence, .. } => find_case(*sequence),
            GNode::PipeSequence(items) => items.into_iter().find_map(find_case),
            GNode::CompoundCommand { command, .. } => find_case(*command),
            _ => None,
        }
    }

    #[test]
    fn case_with_two_items() {
        let node = parse_case("case $x in\n  a|b) echo ab;;\n  *) echo other;;\nesac\n");
        assert_matches!(node, GNode::CaseClause { subject, items } => {
            assert_eq!(subject.to_string(), "${x}");
            assert_eq!(items.len(), 2);
            assert_matches!(&items[0], GNode::CaseItem { patterns, separator, .. } => {
                assert_matches!(&**patterns, GNode::PatternList(patterns) => {
                    assert_eq!(patterns.len(), 2);
                });
                assert_eq!(*separator, Some(Operator::SemicolonSemicolon));
            });
        });
    }

    #[test]
    fn fall_through_separator() {
        let node = parse_case("case x in a) echo a;& b) echo b;; esac\n");
        assert_matches!(node, GNode::CaseClause { items, .. } => {
            assert_matches!(&items[0], GNode::CaseItem { separator, .. } => {
                assert_eq!(*separator, Some(Operator::SemicolonAnd));
            });
        });
    }

    #[test]
    fn last_item_without_separator() {
        let node = parse_case("case x in a) echo a\nesac\n");
        assert_matches!(node, GNode::CaseClause { items, .. } => {
            assert_eq!(items.len(), 1);
            assert_matches!(&items[0], GNode::CaseItem { separator: None, body: Some(_), .. });
        });
    }

    #[test]
    fn empty_body_item() {
        let node = parse_case("case x in a) ;; esac\n");
        assert_matches!(node, GNode::CaseClause { items, .. } => {
            assert_matches!(&items[0], GNode::CaseItem { body: None, .. });
        });
    }

    #[test]
    fn parenthesized_pattern_may_be_esac() {
        let node = parse_case("case x in (esac) echo weird;; esac\n");
        assert_matches!(node, GNode::CaseClause { items, .. } => {
            assert_matches!(&items[0], GNode::CaseItem { patterns, .. } => {
                assert_matches!(&**patterns, GNode::PatternList(patterns) => {
                    assert_eq!(patterns[0].to_string(), "esac");
                });
            });
        });
    }

    #[test]
    fn empty_case() {
        let node = parse_case("case x in esac\n");
        assert_matches!(node, GNode::CaseClause { items, .. } => assert!(items.is_empty()));
    }

    #[test]
    fn missing_in_is_an_error() {
        let tokens = Lexer::tokenize_all("case x esac\n").unwrap();
        let error = Parser::new(tokens).parse_program().unwrap_err();
        assert_matches!(error.cause, SyntaxError::MissingIn { .. });
    }

    #[test]
    fn unclosed_case_at_end_of_input() {
        let tokens = Lexer::tokenize_all("case x in a) echo a;;\n").unwrap();
        let error = Parser::new(tokens).parse_program().unwrap_err();
        assert_matches!(error.cause, SyntaxError::UnclosedCase { .. });
    }
}
