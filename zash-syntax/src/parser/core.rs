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

//! Fundamentals for implementing the parser
//!
//! This module defines the [`Parser`] itself: the movable token cursor, the
//! save/rewind mechanism used by speculative sub-parses, keyword promotion,
//! and alias substitution.

use super::error::{Error, SyntaxError};
use super::lex::{Keyword, Lexer, Operator};
use crate::alias::Glossary;
use crate::grammar::GNode;
use crate::source::Location;
use crate::syntax::Token;
use crate::syntax::TokenId;

/// Why a parse could not run to completion
///
/// Parsing functions return this in their error position. `Incomplete` is
/// not an error: it means the token list ended where the grammar allows more
/// tokens, so the caller should retry with more input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum Interrupt {
    /// More tokens may finish this construct.
    Incomplete,
    /// The input is structurally invalid.
    Error(Error),
}

pub(super) type Result<T> = std::result::Result<T, Interrupt>;

/// Overall result of parsing a program
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Parse {
    /// The tokens form a complete program.
    Complete(GNode),
    /// The tokens contain nothing but blank lines.
    Empty,
    /// The tokens ran out in the middle of a construct.
    Incomplete,
}

/// Empty glossary used when no aliases are supplied.
const NO_ALIASES: crate::alias::EmptyGlossary = crate::alias::EmptyGlossary;

/// Recursive-descent parser over a token list
pub struct Parser<'a> {
    pub(super) tokens: Vec<Token>,
    pub(super) index: usize,
    aliases: &'a dyn Glossary,
    /// Names of aliases substituted since the last consumed token, used to
    /// stop recursive substitution
    active_aliases: Vec<String>,
    /// Whether the last substituted alias value ended in a blank, which
    /// subjects the following word to alias substitution as well
    pub(super) alias_blank_carry: bool,
}

impl<'a> Parser<'a> {
    /// Creates a parser for the given tokens with no aliases defined.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Parser<'a> {
        Parser {
            tokens,
            index: 0,
            aliases: &NO_ALIASES,
            active_aliases: Vec::new(),
            alias_blank_carry: false,
        }
    }

    /// Creates a parser that substitutes aliases from the given glossary.
    #[must_use]
    pub fn with_aliases(tokens: Vec<Token>, aliases: &'a dyn Glossary) -> Parser<'a> {
        Parser {
            tokens,
            index: 0,
            aliases,
            active_aliases: Vec::new(),
            alias_blank_carry: false,
        }
    }

    /// Returns the current token index for a later [`rewind`](Self::rewind).
    pub(super) fn save(&self) -> usize {
        self.index
    }

    /// Moves the cursor back to a previously saved position.
    pub(super) fn rewind(&mut self, index: usize) {
        self.index = index;
    }

    /// Returns the current token, or `None` at the end of the token list.
    pub(super) fn peek_opt(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    /// Returns the current token, or `Incomplete` at the end of the list.
    pub(super) fn peek(&self) -> Result<&Token> {
        self.tokens.get(self.index).ok_or(Interrupt::Incomplete)
    }

    /// Returns the location of the current token, or of the end of the list.
    pub(super) fn location(&self) -> Location {
        match self.tokens.get(self.index) {
            Some(token) => token.location(),
            None => self
                .tokens
                .last()
                .map_or_else(Location::dummy, Token::location),
        }
    }

    /// Consumes and clones the current token.
    pub(super) fn take(&mut self) -> Result<Token> {
        let token = self.peek()?.clone();
        self.index += 1;
        self.active_aliases.clear();
        Ok(token)
    }

    /// Reports a syntax error at the current token.
    pub(super) fn error<T>(&self, cause: SyntaxError) -> Result<T> {
        Err(Interrupt::Error(Error {
            cause,
            location: self.location(),
        }))
    }

    /// Reports a syntax error at a given location.
    pub(super) fn error_at<T>(&self, cause: SyntaxError, location: Location) -> Result<T> {
        Err(Interrupt::Error(Error { cause, location }))
    }

    /// Tests whether the current token is the given operator.
    pub(super) fn at_operator(&self, op: Operator) -> bool {
        matches!(self.peek_opt(), Some(token) if token.id == TokenId::Operator(op))
    }

    /// Consumes the current token if it is the given operator.
    pub(super) fn take_operator(&mut self, op: Operator) -> bool {
        if self.at_operator(op) {
            self.index += 1;
            self.active_aliases.clear();
            true
        } else {
            false
        }
    }

    /// Returns the keyword the current token can be promoted to, if any.
    ///
    /// This function does not modify the token; promotion happens when the
    /// keyword is [consumed](Self::take_keyword).
    pub(super) fn peek_keyword(&self) -> Option<Keyword> {
        self.peek_opt()?.promotable_keyword()
    }

    /// Promotes and consumes the current token if it is the given keyword.
    pub(super) fn take_keyword(&mut self, keyword: Keyword) -> bool {
        if self.peek_keyword() == Some(keyword) {
            self.tokens[self.index].id = TokenId::Keyword(keyword);
            self.index += 1;
            self.active_aliases.clear();
            true
        } else {
            false
        }
    }

    /// Consumes newline tokens.
    pub(super) fn skip_newlines(&mut self) {
        while self.take_operator(Operator::Newline) {}
    }

    /// Consumes newline tokens, requiring at least one more token to exist.
    ///
    /// This is the `linebreak` position inside a construct, where running
    /// out of tokens means the input is incomplete.
    pub(super) fn skip_newlines_within(&mut self) -> Result<()> {
        self.skip_newlines();
        self.peek()?;
        Ok(())
    }

    /// Tests whether a command can start at the current token.
    ///
    /// Clause-delimiting keywords (`then`, `done`, `fi`, `}` and the like)
    /// do not start a command; they terminate the enclosing list.
    pub(super) fn starts_command(&self) -> bool {
        let Some(token) = self.peek_opt() else {
            return false;
        };
        match &token.id {
            TokenId::Word => match token.promotable_keyword() {
                Some(keyword) => !keyword.is_clause_delimiter(),
                None => true,
            },
            TokenId::Operator(op) => *op == Operator::OpenParen || op.is_redirection(),
            TokenId::IoNumber(_) | TokenId::IoLocation(_) => true,
            TokenId::Keyword(keyword) => !keyword.is_clause_delimiter(),
            TokenId::EndOfHereDoc | TokenId::EndOfInput => false,
        }
    }

    /// Substitutes an alias for the current command word.
    ///
    /// If the current token is an unquoted literal word naming an alias that
    /// is not already being substituted, the token is replaced by the tokens
    /// of the alias value and `true` is returned so the caller re-examines
    /// the current position. A value ending in a blank subjects the next
    /// word to substitution as well, which the simple-command parser honors
    /// through [`alias_blank_carry`](Self::alias_blank_carry).
    pub(super) fn substitute_alias(&mut self) -> Result<bool> {
        if self.aliases.is_empty() {
            return Ok(false);
        }
        let Some(token) = self.peek_opt() else {
            return Ok(false);
        };
        if token.id != TokenId::Word {
            return Ok(false);
        }
        let Some(name) = token.word.to_string_if_literal() else {
            return Ok(false);
        };
        if self.active_aliases.iter().any(|active| *active == name) {
            return Ok(false);
        }
        let Some(alias) = self.aliases.look_up(&name) else {
            return Ok(false);
        };

        let mut replacement = match Lexer::tokenize_all(&alias.replacement) {
            Ok(tokens) => tokens,
            // An alias whose value does not lex cleanly is treated as
            // opaque; the word stands as it is.
            Err(_) => return Ok(false),
        };
        if replacement.last().is_some_and(|t| t.id == TokenId::EndOfInput) {
            replacement.pop();
        }
        self.alias_blank_carry = alias
            .replacement
            .ends_with(|c: char| super::lex::is_blank(c));
        self.active_aliases.push(name);
        self.tokens
            .splice(self.index..self.index + 1, replacement);
        Ok(true)
    }

    /// Parses a whole program.
    ///
    /// This is the parser's entry point. The grammar tree is returned when
    /// the tokens form one or more complete commands; [`Parse::Empty`] when
    /// there is nothing but newlines; [`Parse::Incomplete`] when the tokens
    /// end inside a construct.
    pub fn parse_program(&mut self) -> std::result::Result<Parse, Error> {
        match self.program() {
            Ok(Some(program)) => Ok(Parse::Complete(program)),
            Ok(None) => Ok(Parse::Empty),
            Err(Interrupt::Incomplete) => Ok(Parse::Incomplete),
            Err(Interrupt::Error(error)) => Err(error),
        }
    }

    fn program(&mut self) -> Result<Option<GNode>> {
        let mut commands = Vec::new();
        loop {
            self.skip_newlines();
            match self.peek_opt() {
                None => break,
                Some(token) if token.id == TokenId::EndOfInput => break,
                Some(_) => {
                    commands.push(self.complete_command()?);
                    match self.peek_opt() {
                        None => {}
                        Some(token) => match token.id {
                            TokenId::Operator(Operator::Newline) | TokenId::EndOfInput => {}
                            _ => return self.error(SyntaxError::MissingSeparator),
                        },
                    }
                }
            }
        }
        if commands.is_empty() {
            Ok(None)
        } else {
            Ok(Some(GNode::Program(commands)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::lex::Lexer;
    use super::*;
    use assert_matches::assert_matches;

    pub(crate) fn parse(source: &str) -> std::result::Result<Parse, Error> {
        let tokens = Lexer::tokenize_all(source).expect("lexing must succeed");
        Parser::new(tokens).parse_program()
    }

    #[test]
    fn empty_program() {
        assert_eq!(parse("").unwrap(), Parse::Empty);
        assert_eq!(parse("\n\n\n").unwrap(), Parse::Empty);
    }

    #[test]
    fn incomplete_when_tokens_run_out() {
        // No end-of-input token: the source may continue.
        let mut tokens = Lexer::tokenize_all("if true\nthen echo yes\n").unwrap();
        assert_eq!(tokens.pop().unwrap().id, TokenId::EndOfInput);
        let parse = Parser::new(tokens).parse_program().unwrap();
        assert_eq!(parse, Parse::Incomplete);
    }

    #[test]
    fn error_when_construct_open_at_end_of_input() {
        let error = parse("if true\nthen echo yes\n").unwrap_err();
        assert_matches!(error.cause, SyntaxError::UnclosedIf { .. });
    }

    #[test]
    fn resumed_parse_completes() {
        let mut lexer = Lexer::new();
        lexer.push_source("if true\nthen echo yes\n");
        let mut tokens = Vec::new();
        lexer.scan(&mut tokens);
        assert_eq!(
            Parser::new(tokens.clone()).parse_program().unwrap(),
            Parse::Incomplete
        );

        lexer.push_source("fi\n");
        lexer.finish();
        lexer.scan(&mut tokens);
        assert_matches!(
            Parser::new(tokens).parse_program().unwrap(),
            Parse::Complete(_)
        );
    }

    #[test]
    fn alias_substitution_applies_at_command_word() {
        use crate::alias::{AliasSet, HashEntry};
        let mut aliases = AliasSet::new();
        aliases.insert(HashEntry::new(
            "ll".to_string(),
            "ls -l".to_string(),
            Location::dummy(),
        ));
        let tokens = Lexer::tokenize_all("ll /tmp\n").unwrap();
        let program = assert_matches!(
            Parser::with_aliases(tokens, &aliases).parse_program().unwrap(),
            Parse::Complete(p) => p
        );
        assert_matches!(program, GNode::Program(commands) => {
            let words = simple_command_words(&commands[0]);
            assert_eq!(words, ["ls", "-l", "/tmp"]);
        });
    }

    #[test]
    fn recursive_alias_does_not_loop() {
        use crate::alias::{AliasSet, HashEntry};
        let mut aliases = AliasSet::new();
        aliases.insert(HashEntry::new(
            "ls".to_string(),
            "ls --color".to_string(),
            Location::dummy(),
        ));
        let tokens = Lexer::tokenize_all("ls\n").unwrap();
        let program = assert_matches!(
            Parser::with_aliases(tokens, &aliases).parse_program().unwrap(),
            Parse::Complete(p) => p
        );
        assert_matches!(program, GNode::Program(commands) => {
            let words = simple_command_words(&commands[0]);
            assert_eq!(words, ["ls", "--color"]);
        });
    }

    /// Digs the command words out of a complete command over one simple
    /// command.
    fn simple_command_words(node: &GNode) -> Vec<String> {
        fn unwrap_simple(node: &GNode) -> &GNode {
            match node {
                GNode::CompleteCommand { list, .. } => unwrap_simple(list),
                GNode::List { items, .. } => unwrap_simple(&items[0]),
                GNode::AndOr { first, .. } => unwrap_simple(first),
                GNode::Pipeline { sequence, .. } => unwrap_simple(sequence),
                GNode::PipeSequence(commands) => unwrap_simple(&commands[0]),
                node => node,
            }
        }
        match unwrap_simple(node) {
            GNode::SimpleCommand { name, suffix, .. } => {
                let mut words = vec![name.as_ref().unwrap().to_string()];
                if let GNode::CmdSuffix(items) = &**suffix {
                    for item in items {
                        if let GNode::Word(token) = item {
                            words.push(token.to_string());
                        }
                    }
                }
                words
            }
            other => panic!("not a simple command: {other:?}"),
        }
    }
}
