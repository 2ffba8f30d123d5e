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

//! Syntax parser for simple commands
//!
//! A simple command is a sequence of assignment words, redirections and
//! ordinary words. Assignments and redirections before the first ordinary
//! word form the command prefix; everything after it forms the suffix.

use super::core::{Parser, Result};
use crate::grammar::GNode;
use crate::syntax::Token;
use crate::syntax::TokenId;

impl Parser<'_> {
    /// Parses a simple command and pairs its here-document bodies.
    pub(super) fn simple_command(&mut self) -> Result<GNode> {
        let mut prefix = Vec::new();
        let mut name: Option<Token> = None;
        let mut suffix = Vec::new();

        loop {
            if self.at_redirect() {
                let redirect = self.io_redirect()?;
                if name.is_none() {
                    prefix.push(redirect);
                } else {
                    suffix.push(redirect);
                }
                continue;
            }

            let Some(token) = self.peek_opt() else { break };
            if token.id != TokenId::Word {
                break;
            }

            if name.is_none() {
                if let Some((assign_name, value)) = token.word.split_assignment() {
                    self.take()?;
                    prefix.push(GNode::Assignment {
                        name: assign_name,
                        value: Token::new(TokenId::Word, value),
                    });
                    continue;
                }
                // The command-name position moves past assignments, so the
                // word here may still name an alias.
                if self.substitute_alias()? {
                    continue;
                }
                name = Some(self.take()?);
            } else {
                // An alias value ending in a blank subjects the next word to
                // substitution as well.
                if self.alias_blank_carry {
                    self.alias_blank_carry = false;
                    if self.substitute_alias()? {
                        continue;
                    }
                }
                suffix.push(GNode::Word(self.take()?));
            }
        }

        let mut node = GNode::SimpleCommand {
            prefix: Box::new(GNode::CmdPrefix(prefix)),
            name,
            suffix: Box::new(GNode::CmdSuffix(suffix)),
        };
        self.pair_here_docs(&mut node)?;
        Ok(node)
    }
}
