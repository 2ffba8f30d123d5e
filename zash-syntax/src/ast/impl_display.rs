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

//! Implementations of [`std::fmt::Display`] for the execution AST
//!
//! The output is single-line source code that parses back to an equivalent
//! tree. Here-document redirections render as their operator and delimiter;
//! the body is omitted, so a tree containing one does not survive reparsing.

use super::*;
use itertools::Itertools as _;
use std::fmt;

impl fmt::Display for Redirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.io_number {
            write!(f, "{n}")?;
        }
        if let Some(name) = &self.io_location {
            write!(f, "{{{name}}}")?;
        }
        use RedirKind::*;
        let op = match self.kind {
            Read => "<",
            Write => ">",
            Append => ">>",
            ReadWrite => "<>",
            WriteForce => ">|",
            FdDupIn => "<&",
            FdDupOut => ">&",
            FromBuffer => "<<",
            FromBufferStripTabs => "<<-",
        };
        f.write_str(op)?;
        match &self.target {
            RedirTarget::File(word) | RedirTarget::Invalid(word) => write!(f, "{word}"),
            RedirTarget::Fd(n) => write!(f, "{n}"),
            RedirTarget::Close => f.write_str("-"),
            RedirTarget::Buffer(body) => f.write_str(&body.delimiter),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl fmt::Display for CaseItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.patterns.iter().format(" | "))?;
        if let Some(body) = &self.body {
            write!(f, " {body}")?;
        }
        match self.action {
            CaseAction::Break | CaseAction::None => f.write_str(";;"),
            CaseAction::FallThrough => f.write_str(";&"),
        }
    }
}

/// Writes a command list followed by a separator, unless the list already
/// ends with `&`.
fn write_clause(f: &mut fmt::Formatter<'_>, body: &AstNode) -> fmt::Result {
    let body = body.to_string();
    f.write_str(&body)?;
    if !body.ends_with('&') {
        f.write_str(";")?;
    }
    f.write_str(" ")
}

/// Writes the `else`/`elif` tail of an `if` construct.
fn write_else(f: &mut fmt::Formatter<'_>, else_body: &AstNode) -> fmt::Result {
    if let AstNode::IfClause {
        condition,
        then_body,
        else_body,
    } = else_body
    {
        write!(f, "elif ")?;
        write_clause(f, condition)?;
        write!(f, "then ")?;
        write_clause(f, then_body)?;
        if let Some(else_body) = else_body {
            write_else(f, else_body)?;
        }
        Ok(())
    } else {
        write!(f, "else ")?;
        write_clause(f, else_body)
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AstNode::*;
        match self {
            CommandList { items, separators } => {
                for (i, item) in items.iter().enumerate() {
                    item.fmt(f)?;
                    match separators.get(i) {
                        Some(Sep::Sequential) => {
                            if i + 1 < items.len() {
                                f.write_str("; ")?;
                            } else {
                                f.write_str(";")?;
                            }
                        }
                        Some(Sep::Background) => {
                            f.write_str("&")?;
                            if i + 1 < items.len() {
                                f.write_str(" ")?;
                            }
                        }
                        Some(Sep::End) | None => {}
                    }
                }
                Ok(())
            }
            AndOrList { op, left, right } => {
                let op = match op {
                    AndOrOp::And => "&&",
                    AndOrOp::Or => "||",
                };
                write!(f, "{left} {op} {right}")
            }
            Pipeline { commands, negated } => {
                if *negated {
                    f.write_str("! ")?;
                }
                write!(f, "{}", commands.iter().format(" | "))
            }
            SimpleCommand {
                assignments,
                words,
                redirections,
            } => {
                let mut first = true;
                for assignment in assignments {
                    if !first {
                        f.write_str(" ")?;
                    }
                    first = false;
                    assignment.fmt(f)?;
                }
                for word in words {
                    if !first {
                        f.write_str(" ")?;
                    }
                    first = false;
                    word.fmt(f)?;
                }
                for redirection in redirections {
                    if !first {
                        f.write_str(" ")?;
                    }
                    first = false;
                    redirection.fmt(f)?;
                }
                Ok(())
            }
            IfClause {
                condition,
                then_body,
                else_body,
            } => {
                f.write_str("if ")?;
                write_clause(f, condition)?;
                f.write_str("then ")?;
                write_clause(f, then_body)?;
                if let Some(else_body) = else_body {
                    write_else(f, else_body)?;
                }
                f.write_str("fi")
            }
            WhileClause { condition, body } => {
                f.write_str("while ")?;
                write_clause(f, condition)?;
                f.write_str("do ")?;
                write_clause(f, body)?;
                f.write_str("done")
            }
            UntilClause { condition, body } => {
                f.write_str("until ")?;
                write_clause(f, condition)?;
                f.write_str("do ")?;
                write_clause(f, body)?;
                f.write_str("done")
            }
            ForClause { name, words, body } => {
                write!(f, "for {name}")?;
                if let Some(words) = words {
                    f.write_str(" in")?;
                    for word in words {
                        write!(f, " {word}")?;
                    }
                }
                f.write_str("; do ")?;
                write_clause(f, body)?;
                f.write_str("done")
            }
            CaseClause { subject, items } => {
                write!(f, "case {subject} in")?;
                for item in items {
                    write!(f, " {item}")?;
                }
                f.write_str(" esac")
            }
            Subshell { body } => write!(f, "({body})"),
            BraceGroup { body } => {
                f.write_str("{ ")?;
                write_clause(f, body)?;
                f.write_str("}")
            }
            FunctionDef {
                name,
                body,
                redirections,
            } => {
                write!(f, "{name}() {body}")?;
                for redirection in redirections {
                    write!(f, " {redirection}")?;
                }
                Ok(())
            }
            RedirectedCommand { body, redirections } => {
                if let Some(body) = body {
                    body.fmt(f)?;
                }
                for (i, redirection) in redirections.iter().enumerate() {
                    if body.is_some() || i > 0 {
                        f.write_str(" ")?;
                    }
                    redirection.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}
