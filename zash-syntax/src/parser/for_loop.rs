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

//! Syntax parser for the for loop

use super::core::{Parser, Result};
use super::error::SyntaxError;
use super::lex::{Keyword, Operator};
use crate::grammar::GNode;
use crate::syntax::is_name;
use crate::syntax::TokenId;

impl Parser<'_> {
    /// Parses a `for` loop from the `for` keyword through `done`.
    pub(super) fn for_clause(&mut self) -> Result<GNode> {
        let opening_location = self.location();
        self.take_keyword(Keyword::For);

        let name = match self.peek_opt() {
            None => return Err(super::core::Interrupt::Incomplete),
            Some(token) if token.id == TokenId::Word => {
                match token.word.to_string_if_literal() {
                    Some(literal) if is_name(&literal) => self.take()?,
                    _ => return self.error(SyntaxError::InvalidForName),
                }
            }
            Some(_) => return self.error(SyntaxError::MissingForName),
        };

        self.skip_newlines_within()?;
        let words = if self.take_keyword(Keyword::In) {
            let mut words = Vec::new();
            while let Some(token) = self.peek_opt() {
                if token.id != TokenId::Word {
                    break;
                }
                words.push(self.take()?);
            }
            // A sequential separator is required between the word list and
            // the `do` clause.
            if self.take_operator(Operator::Semicolon) || self.at_operator(Operator::Newline) {
                self.skip_newlines_within()?;
            } else {
                self.peek()?;
                return self.error(SyntaxError::MissingForBody { opening_location });
            }
            Some(Box::new(GNode::Wordlist(words)))
        } else {
            if self.take_operator(Operator::Semicolon) {
                self.skip_newlines_within()?;
            }
            None
        };

        if !self.take_keyword(Keyword::Do) {
            self.peek()?;
            return self.error(SyntaxError::MissingForBody { opening_location });
        }
        let body = self.do_clause_body(opening_location)?;

        Ok(GNode::ForClause {
            name,
            words,
            body: Box::new(body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::Parse;
    use super::super::lex::Lexer;
    use super::super::Parser;
    use super::*;
    use assert_matches::assert_matches;

    fn parse_for(source: &str) -> GNode {
        let tokens = Lexer::tokenize_all(source).unwrap();
        let parse = Parser::new(tokens).parse_program().unwrap();
        let program = assert_matches!(parse, Parse::Complete(p) => p);
        find_for(program).expect("no for loop found")
    }

    fn find_for(node: GNode) -> Option<GNode> {
        match node {
            GNode::ForClause { .. } => Some(node),
            GNode::Program(items) => items.into_iter().find_map(find_for),
            GNode::CompleteCommand { list, .. } => find_for(*list),
            GNode::List { items, .. } => items.into_iter().find_map(find_for),
            GNode::AndOr { first, .. } => find_for(*first),
            GNode::Pipeline { sequence, .. } => find_for(*sequence),
            GNode::PipeSequence(items) => items.into_iter().find_map(find_for),
            GNode::CompoundCommand { command, .. } => find_for(*command),
            _ => None,
        }
    }

    #[test]
    fn for_with_word_list() {
        let node = parse_for("for x in a b c; do echo $x; done\n");
        assert_matches!(node, GNode::ForClause { name, words: Some(words), .. } => {
            assert_eq!(name.to_string(), "x");
            assert_matches!(*words, GNode::Wordlist(words) => {
                let words: Vec<_> = words.iter().map(|w| w.to_string()).collect();
                assert_eq!(words, ["a", "b", "c"]);
            });
        });
    }

    #[test]
    fn for_with_empty_word_list() {
        let node = parse_for("for x in; do echo $x; done\n");
        assert_matches!(node, GNode::ForClause { words: Some(words), .. } => {
            assert_matches!(*words, GNode::Wordlist(words) => assert!(words.is_empty()));
        });
    }

    #[test]
    fn for_without_in_iterates_positional_parameters() {
        let node = parse_for("for arg do echo $arg; done\n");
        assert_matches!(node, GNode::ForClause { words: None, .. });

        let node = parse_for("for arg; do echo $arg; done\n");
        assert_matches!(node, GNode::ForClause { words: None, .. });
    }

    #[test]
    fn for_with_newlines() {
        let node = parse_for("for x\nin a b\ndo echo $x\ndone\n");
        assert_matches!(node, GNode::ForClause { words: Some(_), .. });
    }

    #[test]
    fn invalid_name_is_an_error() {
        let tokens = Lexer::tokenize_all("for a-b in x; do echo; done\n").unwrap();
        let error = Parser::new(tokens).parse_program().unwrap_err();
        assert_eq!(error.cause, SyntaxError::InvalidForName);
    }

    #[test]
    fn missing_do_is_an_error() {
        let tokens = Lexer::tokenize_all("for x in a b\necho $x\n").unwrap();
        let error = Parser::new(tokens).parse_program().unwrap_err();
        assert_matches!(error.cause, SyntaxError::MissingForBody { .. });
    }
}
