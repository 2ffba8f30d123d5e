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

//! Syntax parser for the shell language
//!
//! The [`Parser`] consumes a token list produced by the
//! [lexer](lex::Lexer) and builds a [grammar tree](crate::grammar::GNode) by
//! strict recursive descent. Reserved words are recognized by promoting word
//! tokens in place at known grammar positions, and here-document bodies are
//! threaded back to their redirection operators after each simple command or
//! redirection list.
//!
//! Parsing a token list that runs out in the middle of a construct yields
//! [`Parse::Incomplete`], telling the driver to collect more input and parse
//! again. A construct left open at the explicit end-of-input token is a
//! syntax [`Error`].

mod case;
mod command;
mod compound_command;
mod core;
mod error;
mod for_loop;
mod r#if;
mod list;
mod redir;
mod simple_command;
mod while_loop;

pub mod lex;

pub use self::core::Parse;
pub use self::core::Parser;
pub use self::error::Error;
pub use self::error::SyntaxError;
