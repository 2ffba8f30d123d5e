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

//! Shell language syntax and parser.
//!
//! This crate implements the front end of the shell: an incremental
//! [lexer](parser::lex::Lexer) that turns source bytes into
//! [tokens](syntax::Token), a recursive-descent [parser](parser::Parser) that
//! builds a concrete [grammar tree](grammar::GNode) mirroring the POSIX shell
//! grammar, and a [lowering pass](lower) that converts the grammar tree into
//! the compact [execution AST](ast::AstNode) consumed by the expander and the
//! executor.
//!
//! Source text may arrive in arbitrary chunks. The lexer suspends inside
//! unfinished quotes, expansions and here-documents and resumes when more
//! input is [pushed](parser::lex::Lexer::push_source); the parser reports
//! [`Incomplete`](parser::Parse::Incomplete) when the tokens run out in the
//! middle of a grammatical construct so that a driver can show a continuation
//! prompt and try again with more input.
//!
//! For whole-string input, most AST types implement
//! [`FromStr`](std::str::FromStr):
//!
//! ```
//! use zash_syntax::ast::AstNode;
//! let ast: AstNode = "echo hello | tr a-z A-Z".parse().unwrap();
//! assert_eq!(ast.to_string(), "echo hello | tr a-z A-Z");
//! ```

pub mod alias;
pub mod ast;
pub mod grammar;
pub mod lower;
pub mod parser;
pub mod source;
pub mod syntax;
