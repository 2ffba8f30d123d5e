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

//! Syntax parser for command lists, and-or lists, and pipelines

use super::core::{Parser, Result};
use super::error::SyntaxError;
use super::lex::{Keyword, Operator};
use crate::grammar::GNode;

impl Parser<'_> {
    /// Parses a complete command: a list and its optional trailing `;` or
    /// `&`.
    pub(super) fn complete_command(&mut self) -> Result<GNode> {
        let list = self.list()?;
        let separator = if self.take_operator(Operator::Semicolon) {
            Some(Operator::Semicolon)
        } else if self.take_operator(Operator::And) {
            Some(Operator::And)
        } else {
            None
        };
        Ok(GNode::CompleteCommand {
            list: Box::new(list),
            separator,
        })
    }

    /// Parses a list: and-or lists separated by `;` or `&`.
    ///
    /// The trailing separator, if any, is left for the caller.
    fn list(&mut self) -> Result<GNode> {
        let mut items = vec![self.and_or()?];
        let mut separators = Vec::new();
        loop {
            let save = self.save();
            let op = if self.take_operator(Operator::Semicolon) {
                Operator::Semicolon
            } else if self.take_operator(Operator::And) {
                Operator::And
            } else {
                break;
            };
            if !self.starts_command() {
                self.rewind(save);
                break;
            }
            separators.push(op);
            items.push(self.and_or()?);
        }
        Ok(GNode::List { items, separators })
    }

    /// Parses a compound list: the newline-tolerant command list inside
    /// compound commands.
    ///
    /// The returned list may be empty; callers report the construct-specific
    /// error for an empty body. Separators include newline tokens.
    pub(super) fn compound_list(&mut self) -> Result<GNode> {
        let mut items = Vec::new();
        let mut separators = Vec::new();
        self.skip_newlines_within()?;
        loop {
            // Give aliases a chance before probing for a command start.
            while self.substitute_alias()? {}
            if !self.starts_command() {
                break;
            }
            items.push(self.and_or()?);

            let mut separator = None;
            if self.take_operator(Operator::Semicolon) {
                separator = Some(Operator::Semicolon);
            } else if self.take_operator(Operator::And) {
                separator = Some(Operator::And);
            }
            if self.at_operator(Operator::Newline) {
                separator.get_or_insert(Operator::Newline);
                self.skip_newlines_within()?;
            } else if separator == Some(Operator::Semicolon)
                || separator == Some(Operator::And)
            {
                self.skip_newlines_within()?;
            }
            match separator {
                Some(op) => separators.push(op),
                None => break,
            }
        }
        Ok(GNode::List { items, separators })
    }

    /// Parses an and-or list: pipelines joined by `&&` and `||`.
    pub(super) fn and_or(&mut self) -> Result<GNode> {
        let first = self.pipeline()?;
        let mut rest = Vec::new();
        loop {
            let op = if self.at_operator(Operator::AndAnd) {
                Operator::AndAnd
            } else if self.at_operator(Operator::BarBar) {
                Operator::BarBar
            } else {
                break;
            };
            self.take_operator(op);
            self.skip_newlines_within()?;
            while self.substitute_alias()? {}
            if !self.starts_command() {
                self.peek()?;
                return self.error(SyntaxError::MissingPipeline);
            }
            rest.push((op, self.pipeline()?));
        }
        Ok(GNode::AndOr {
            first: Box::new(first),
            rest,
        })
    }

    /// Parses a pipeline: an optional `!` and commands joined by `|`.
    pub(super) fn pipeline(&mut self) -> Result<GNode> {
        let negated = self.take_keyword(Keyword::Bang);
        if negated {
            if self.peek_keyword() == Some(Keyword::Bang) {
                return self.error(SyntaxError::DoubleNegation);
            }
            while self.substitute_alias()? {}
            if !self.starts_command() {
                self.peek()?;
                return self.error(SyntaxError::MissingCommandAfterBang);
            }
        }

        let mut commands = vec![self.command()?];
        while self.take_operator(Operator::Bar) {
            self.skip_newlines_within()?;
            if self.peek_keyword() == Some(Keyword::Bang) {
                return self.error(SyntaxError::BangAfterBar);
            }
            while self.substitute_alias()? {}
            if !self.starts_command() {
                self.peek()?;
                return self.error(SyntaxError::MissingCommandAfterBar);
            }
            commands.push(self.command()?);
        }

        Ok(GNode::Pipeline {
            negated,
            sequence: Box::new(GNode::PipeSequence(commands)),
        })
    }
}
