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

//! Lowering pass from the grammar tree to the execution AST
//!
//! Lowering is a total function over well-formed grammar trees. It performs
//! the normalizations the executor relies on:
//!
//! - a pipeline of one command with no `!` is flattened to the command, and
//!   a command list of one item with at most a trailing terminator is
//!   flattened to the item;
//! - separators become explicit [`Sep`] values, with a trailing `&` turning
//!   into [`Sep::Background`] on the last item and other trailing
//!   terminators into [`Sep::End`];
//! - `elif` chains become nested [`IfClause`](AstNode::IfClause) nodes in
//!   the `else_body` slot;
//! - every redirection becomes a [`Redirection`] with its operator kind and
//!   classified target, and here-document markers become
//!   [`RedirTarget::Buffer`] values with their expansion flag;
//! - grammar-only tokens (`then`, `do`, braces, parentheses) disappear; the
//!   structure encodes them.
//!
//! Feeding a malformed grammar tree (one the [parser](crate::parser) cannot
//! produce) panics.

use crate::ast::{
    AndOrOp, Assignment, AstNode, CaseAction, CaseItem, HereDocBody, RedirKind, RedirTarget,
    Redirection, Sep,
};
use crate::grammar::GNode;
use crate::parser::lex::{LexError, Lexer, Operator};
use crate::parser::{Parse, Parser};
use crate::syntax::Word;
use std::str::FromStr;
use thiserror::Error;

/// Converts a parsed program into the execution AST.
///
/// The input must be a [`GNode::Program`].
#[must_use]
pub fn lower(program: &GNode) -> AstNode {
    let GNode::Program(commands) = program else {
        unreachable!("lowering starts at a program node")
    };

    let mut items = Vec::new();
    let mut separators = Vec::new();
    for (i, command) in commands.iter().enumerate() {
        let GNode::CompleteCommand { list, separator } = command else {
            unreachable!("program nodes contain complete commands")
        };
        let last = i + 1 == commands.len();
        lower_list_into(list, &mut items, &mut separators);
        // The list itself never carries a trailing separator at this level;
        // the boundary separator comes from the complete command.
        let boundary = match separator {
            Some(Operator::And) => Sep::Background,
            _ if last => Sep::End,
            _ => Sep::Sequential,
        };
        separators.push(boundary);
    }
    flatten_list(items, separators)
}

/// Appends the lowered items of a list node, leaving the final item without
/// a trailing separator.
fn lower_list_into(list: &GNode, items: &mut Vec<AstNode>, separators: &mut Vec<Sep>) {
    let GNode::List {
        items: list_items,
        separators: list_separators,
    } = list
    else {
        unreachable!("expected a list node")
    };
    for (i, item) in list_items.iter().enumerate() {
        items.push(lower_and_or(item));
        if i + 1 < list_items.len() {
            let sep = match list_separators[i] {
                Operator::And => Sep::Background,
                _ => Sep::Sequential,
            };
            separators.push(sep);
        }
    }
}

/// Lowers the command list of a compound command body.
fn lower_body(list: &GNode) -> AstNode {
    let GNode::List { items, separators } = list else {
        unreachable!("expected a list node")
    };
    let mut lowered = Vec::new();
    let mut seps = Vec::new();
    for (i, item) in items.iter().enumerate() {
        lowered.push(lower_and_or(item));
        match separators.get(i) {
            Some(Operator::And) => seps.push(Sep::Background),
            Some(_) if i + 1 == items.len() => seps.push(Sep::End),
            Some(_) => seps.push(Sep::Sequential),
            None => {}
        }
    }
    flatten_list(lowered, seps)
}

/// Builds a command list, flattening the one-item case.
fn flatten_list(items: Vec<AstNode>, separators: Vec<Sep>) -> AstNode {
    if items.len() == 1 && matches!(separators[..], [] | [Sep::End]) {
        return items.into_iter().next().unwrap();
    }
    AstNode::CommandList { items, separators }
}

fn lower_and_or(node: &GNode) -> AstNode {
    let GNode::AndOr { first, rest } = node else {
        unreachable!("expected an and-or node")
    };
    let mut lowered = lower_pipeline(first);
    for (op, next) in rest {
        let op = match op {
            Operator::AndAnd => AndOrOp::And,
            Operator::BarBar => AndOrOp::Or,
            _ => unreachable!("invalid and-or operator"),
        };
        lowered = AstNode::AndOrList {
            op,
            left: Box::new(lowered),
            right: Box::new(lower_pipeline(next)),
        };
    }
    lowered
}

fn lower_pipeline(node: &GNode) -> AstNode {
    let GNode::Pipeline { negated, sequence } = node else {
        unreachable!("expected a pipeline node")
    };
    let GNode::PipeSequence(commands) = &**sequence else {
        unreachable!("expected a pipe sequence node")
    };
    let mut lowered: Vec<AstNode> = commands.iter().map(lower_command).collect();
    if lowered.len() == 1 && !negated {
        return lowered.pop().unwrap();
    }
    AstNode::Pipeline {
        commands: lowered,
        negated: *negated,
    }
}

fn lower_command(node: &GNode) -> AstNode {
    match node {
        GNode::SimpleCommand { .. } => lower_simple_command(node),
        GNode::CompoundCommand { command, redirects } => {
            let body = lower_compound(command);
            let redirections = redirects.as_deref().map_or_else(Vec::new, lower_redirect_list);
            if redirections.is_empty() {
                body
            } else {
                AstNode::RedirectedCommand {
                    body: Some(Box::new(body)),
                    redirections,
                }
            }
        }
        GNode::FunctionDefinition { name, body } => {
            let GNode::FunctionBody { command, redirects } = &**body else {
                unreachable!("expected a function body node")
            };
            let Some(name) = name.word.to_string_if_literal() else {
                unreachable!("function name must be a literal word")
            };
            AstNode::FunctionDef {
                name,
                body: Box::new(lower_compound(command)),
                redirections: redirects.as_deref().map_or_else(Vec::new, lower_redirect_list),
            }
        }
        other => unreachable!("not a command node: {other:?}"),
    }
}

fn lower_compound(node: &GNode) -> AstNode {
    match node {
        GNode::Subshell(body) => AstNode::Subshell {
            body: Box::new(lower_body(body)),
        },
        GNode::BraceGroup(body) => AstNode::BraceGroup {
            body: Box::new(lower_body(body)),
        },
        GNode::IfClause {
            condition,
            then_body,
            else_part,
        } => AstNode::IfClause {
            condition: Box::new(lower_body(condition)),
            then_body: Box::new(lower_body(then_body)),
            else_body: else_part.as_deref().map(|e| Box::new(lower_else_part(e))),
        },
        GNode::WhileClause { condition, body } => AstNode::WhileClause {
            condition: Box::new(lower_body(condition)),
            body: Box::new(lower_body(body)),
        },
        GNode::UntilClause { condition, body } => AstNode::UntilClause {
            condition: Box::new(lower_body(condition)),
            body: Box::new(lower_body(body)),
        },
        GNode::ForClause { name, words, body } => {
            let Some(name) = name.word.to_string_if_literal() else {
                unreachable!("for-loop variable name must be a literal word")
            };
            let words = words.as_deref().map(|wordlist| {
                let GNode::Wordlist(tokens) = wordlist else {
                    unreachable!("expected a wordlist node")
                };
                tokens.iter().map(|token| token.word.clone()).collect()
            });
            AstNode::ForClause {
                name,
                words,
                body: Box::new(lower_body(body)),
            }
        }
        GNode::CaseClause { subject, items } => AstNode::CaseClause {
            subject: subject.word.clone(),
            items: items.iter().map(lower_case_item).collect(),
        },
        other => unreachable!("not a compound command node: {other:?}"),
    }
}

fn lower_else_part(node: &GNode) -> AstNode {
    let GNode::ElsePart {
        condition,
        body,
        else_part,
    } = node
    else {
        unreachable!("expected an else-part node")
    };
    match condition {
        // An elif becomes a nested if clause.
        Some(condition) => AstNode::IfClause {
            condition: Box::new(lower_body(condition)),
            then_body: Box::new(lower_body(body)),
            else_body: else_part.as_deref().map(|e| Box::new(lower_else_part(e))),
        },
        None => lower_body(body),
    }
}

fn lower_case_item(node: &GNode) -> CaseItem {
    let GNode::CaseItem {
        patterns,
        body,
        separator,
    } = node
    else {
        unreachable!("expected a case item node")
    };
    let GNode::PatternList(tokens) = &**patterns else {
        unreachable!("expected a pattern list node")
    };
    CaseItem {
        patterns: tokens.iter().map(|token| token.word.clone()).collect(),
        body: body.as_deref().map(lower_body),
        action: match separator {
            Some(Operator::SemicolonSemicolon) => CaseAction::Break,
            Some(Operator::SemicolonAnd) => CaseAction::FallThrough,
            None => CaseAction::None,
            Some(other) => unreachable!("invalid case separator: {other:?}"),
        },
    }
}

fn lower_simple_command(node: &GNode) -> AstNode {
    let GNode::SimpleCommand {
        prefix,
        name,
        suffix,
    } = node
    else {
        unreachable!("expected a simple command node")
    };
    let GNode::CmdPrefix(prefix) = &**prefix else {
        unreachable!("expected a command prefix node")
    };
    let GNode::CmdSuffix(suffix) = &**suffix else {
        unreachable!("expected a command suffix node")
    };

    let mut assignments = Vec::new();
    let mut words = Vec::new();
    let mut redirections = Vec::new();

    for item in prefix {
        match item {
            GNode::Assignment { name, value } => assignments.push(Assignment {
                name: name.clone(),
                value: value.word.clone(),
            }),
            GNode::IoRedirect { .. } => redirections.push(lower_io_redirect(item)),
            other => unreachable!("invalid command prefix item: {other:?}"),
        }
    }
    if let Some(name) = name {
        words.push(name.word.clone());
    }
    for item in suffix {
        match item {
            GNode::Word(token) => words.push(token.word.clone()),
            GNode::IoRedirect { .. } => redirections.push(lower_io_redirect(item)),
            other => unreachable!("invalid command suffix item: {other:?}"),
        }
    }

    AstNode::SimpleCommand {
        assignments,
        words,
        redirections,
    }
}

fn lower_redirect_list(node: &GNode) -> Vec<Redirection> {
    let GNode::RedirectList(items) = node else {
        unreachable!("expected a redirect list node")
    };
    items.iter().map(lower_io_redirect).collect()
}

fn lower_io_redirect(node: &GNode) -> Redirection {
    let GNode::IoRedirect {
        io_number,
        io_location,
        body,
    } = node
    else {
        unreachable!("expected a redirection node")
    };

    let (kind, target) = match &**body {
        GNode::IoFile { operator, target } => {
            let kind = match operator {
                Operator::Less => RedirKind::Read,
                Operator::Greater => RedirKind::Write,
                Operator::GreaterGreater => RedirKind::Append,
                Operator::LessGreater => RedirKind::ReadWrite,
                Operator::GreaterBar => RedirKind::WriteForce,
                Operator::LessAnd => RedirKind::FdDupIn,
                Operator::GreaterAnd => RedirKind::FdDupOut,
                other => unreachable!("invalid file redirection operator: {other:?}"),
            };
            let target = classify_target(kind, &target.word);
            (kind, target)
        }
        GNode::IoHere {
            operator,
            body: Some(token),
            ..
        } => {
            let kind = match operator {
                Operator::LessLess => RedirKind::FromBuffer,
                Operator::LessLessDash => RedirKind::FromBufferStripTabs,
                other => unreachable!("invalid here-document operator: {other:?}"),
            };
            let marker = token
                .here_doc
                .as_deref()
                .expect("end-of-here-document token must carry its marker");
            let target = RedirTarget::Buffer(HereDocBody {
                delimiter: marker.delimiter.clone(),
                content: marker.body.clone().unwrap_or_default(),
                needs_expansion: !marker.quoted,
            });
            (kind, target)
        }
        GNode::IoHere { body: None, .. } => {
            unreachable!("here-document body must be attached before lowering")
        }
        other => unreachable!("invalid redirection body: {other:?}"),
    };

    Redirection {
        kind,
        io_number: *io_number,
        io_location: io_location.clone(),
        target,
    }
}

/// Classifies the target word of a file redirection.
///
/// For descriptor duplication, a literal `-` means close and literal digits
/// name a descriptor; other literals cannot name a descriptor and are marked
/// invalid. Everything else, including words with expansions, is a file
/// target resolved when the redirection is performed.
fn classify_target(kind: RedirKind, word: &Word) -> RedirTarget {
    if kind != RedirKind::FdDupIn && kind != RedirKind::FdDupOut {
        return RedirTarget::File(word.clone());
    }
    match word.to_string_if_literal() {
        Some(text) if text == "-" => RedirTarget::Close,
        Some(text) if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) => {
            match text.parse() {
                Ok(fd) => RedirTarget::Fd(fd),
                Err(_) => RedirTarget::Invalid(word.clone()),
            }
        }
        Some(_) => RedirTarget::Invalid(word.clone()),
        None => RedirTarget::File(word.clone()),
    }
}

/// Error from parsing a complete source string into an AST
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FromStrError {
    /// The source is lexically invalid.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The source is syntactically invalid.
    #[error(transparent)]
    Syntax(#[from] crate::parser::Error),
}

/// Runs the whole front end over a complete source string.
///
/// The empty program lowers to an [empty command list](AstNode::empty).
pub fn parse_and_lower(source: &str) -> Result<AstNode, FromStrError> {
    let tokens = Lexer::tokenize_all(source)?;
    match Parser::new(tokens).parse_program()? {
        Parse::Complete(program) => Ok(lower(&program)),
        Parse::Empty => Ok(AstNode::empty()),
        Parse::Incomplete => unreachable!("a finished token list cannot be incomplete"),
    }
}

impl FromStr for AstNode {
    type Err = FromStrError;
    fn from_str(source: &str) -> Result<AstNode, FromStrError> {
        parse_and_lower(source)
    }
}
