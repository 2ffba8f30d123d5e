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

//! Execution abstract syntax tree
//!
//! The types in this module are what the expander and the executor consume.
//! They carry semantic rather than syntactic structure: separators are
//! explicit [`Sep`] values, `elif` chains are nested [`IfClause`]
//! (AstNode::IfClause) nodes, and every redirection is normalized into a
//! [`Redirection`] with a [`RedirKind`] and a classified [`RedirTarget`].
//!
//! Execution ASTs are produced from grammar trees by the
//! [lowering pass](crate::lower) and own their nodes tree-wise. The
//! [`Display`](std::fmt::Display) implementation produces single-line source
//! code that parses back to an equivalent tree, with here-document contents
//! omitted.

use crate::syntax::Word;

/// Separator attached to an item of a [`CommandList`](AstNode::CommandList)
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Sep {
    /// The item completes before the next one starts (`;` or newline).
    Sequential,
    /// The item is started asynchronously (`&`).
    Background,
    /// Trailing terminator that does not imply an execution boundary beyond
    /// the current list.
    End,
}

/// Operator of an [`AndOrList`](AstNode::AndOrList)
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AndOrOp {
    /// `&&`: the right side runs if the left succeeded.
    And,
    /// `||`: the right side runs if the left failed.
    Or,
}

/// Semantic category of a redirection operator
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RedirKind {
    /// `<`
    Read,
    /// `>`
    Write,
    /// `>>`
    Append,
    /// `<>`
    ReadWrite,
    /// `>|`
    WriteForce,
    /// `<&`
    FdDupIn,
    /// `>&`
    FdDupOut,
    /// `<<`
    FromBuffer,
    /// `<<-`
    FromBufferStripTabs,
}

impl RedirKind {
    /// Default file descriptor the redirection applies to when no IO number
    /// is given.
    #[must_use]
    pub fn default_fd(self) -> i32 {
        use RedirKind::*;
        match self {
            Read | ReadWrite | FdDupIn | FromBuffer | FromBufferStripTabs => 0,
            Write | Append | WriteForce | FdDupOut => 1,
        }
    }
}

/// Captured here-document body carried by a [`RedirTarget::Buffer`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HereDocBody {
    /// Delimiter word with quotation marks removed
    pub delimiter: String,
    /// Accumulated body, ending with a newline unless empty
    pub content: String,
    /// Whether the body undergoes parameter, command and arithmetic
    /// expansion when the redirection is performed
    ///
    /// This is `true` exactly when the delimiter was unquoted.
    pub needs_expansion: bool,
}

/// What the operand of a redirection denotes
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RedirTarget {
    /// A pathname to open
    File(Word),
    /// A file descriptor to duplicate
    Fd(i32),
    /// The `-` marker closing the file descriptor
    Close,
    /// An inline here-document body
    Buffer(HereDocBody),
    /// A literal duplication operand that is neither a descriptor number nor
    /// `-`; performing this redirection is an error
    Invalid(Word),
}

/// Redirection descriptor
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redirection {
    /// Operator category
    pub kind: RedirKind,
    /// File descriptor given before the operator, if any
    pub io_number: Option<i32>,
    /// `{name}` prefix given before the operator, if any
    pub io_location: Option<String>,
    /// Classified operand
    pub target: RedirTarget,
}

/// Variable assignment of a simple command
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assignment {
    /// Name of the variable to assign to
    pub name: String,
    /// Word expanded to the assigned value
    pub value: Word,
}

/// What happens after the body of a matched case branch runs
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CaseAction {
    /// `;;`: the case construct completes.
    #[default]
    Break,
    /// `;&`: the next branch's body runs unconditionally.
    FallThrough,
    /// The branch was the last one, with no explicit terminator.
    None,
}

/// Branch of a [`CaseClause`](AstNode::CaseClause)
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CaseItem {
    /// Patterns matched against the expanded subject word
    ///
    /// A well-formed case item has at least one pattern.
    pub patterns: Vec<Word>,
    /// Commands executed if a pattern matches; `None` for an empty branch
    pub body: Option<AstNode>,
    /// What to do after executing the body
    pub action: CaseAction,
}

/// Node of the execution AST
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AstNode {
    /// Sequence of commands with explicit separators
    ///
    /// `separators.len()` is either `items.len() - 1` (the last item has no
    /// trailing terminator) or `items.len()`.
    CommandList {
        items: Vec<AstNode>,
        separators: Vec<Sep>,
    },

    /// Conditional pair of commands; chains associate to the left
    AndOrList {
        op: AndOrOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },

    /// Commands connected by pipes
    ///
    /// A well-formed pipeline has at least one command; a pipeline of one
    /// command that is not negated is flattened away during lowering.
    Pipeline {
        commands: Vec<AstNode>,
        negated: bool,
    },

    /// Simple command
    SimpleCommand {
        assignments: Vec<Assignment>,
        words: Vec<Word>,
        redirections: Vec<Redirection>,
    },

    /// `if` construct; `elif` chains are encoded as a nested `IfClause` in
    /// `else_body`
    IfClause {
        condition: Box<AstNode>,
        then_body: Box<AstNode>,
        else_body: Option<Box<AstNode>>,
    },

    /// `while` loop
    WhileClause {
        condition: Box<AstNode>,
        body: Box<AstNode>,
    },

    /// `until` loop
    UntilClause {
        condition: Box<AstNode>,
        body: Box<AstNode>,
    },

    /// `for` loop
    ///
    /// `words` is `None` when the loop iterates over the positional
    /// parameters.
    ForClause {
        name: String,
        words: Option<Vec<Word>>,
        body: Box<AstNode>,
    },

    /// `case` construct
    CaseClause { subject: Word, items: Vec<CaseItem> },

    /// Commands run in a subshell
    Subshell { body: Box<AstNode> },

    /// Commands grouped in the current shell environment
    BraceGroup { body: Box<AstNode> },

    /// Function definition
    FunctionDef {
        name: String,
        body: Box<AstNode>,
        redirections: Vec<Redirection>,
    },

    /// Compound command carrying trailing redirections
    RedirectedCommand {
        body: Option<Box<AstNode>>,
        redirections: Vec<Redirection>,
    },
}

impl AstNode {
    /// Creates an empty command list, the result of lowering an empty
    /// program.
    #[must_use]
    pub fn empty() -> AstNode {
        AstNode::CommandList {
            items: Vec::new(),
            separators: Vec::new(),
        }
    }

    /// Whether this node is a command list with no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, AstNode::CommandList { items, .. } if items.is_empty())
    }
}

mod impl_display;
