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

//! Lexical analyzer
//!
//! This module implements the resumable [`Lexer`] that turns source bytes
//! into [tokens](crate::syntax::Token). Source text is pushed into the lexer
//! in arbitrary chunks; [`Lexer::scan`] emits every token that is complete in
//! the buffered input and reports whether the lexer is blocked inside an
//! unfinished construct.

mod core;
mod dollar;
mod heredoc;
mod keyword;
mod op;
mod word;

pub use self::core::is_blank;
pub use self::core::LexError;
pub use self::core::LexErrorKind;
pub use self::core::LexStatus;
pub use self::core::Lexer;
pub use self::keyword::Keyword;
pub use self::keyword::ParseKeywordError;
pub use self::op::Operator;
pub use self::op::ParseOperatorError;
pub use self::word::parse_text;
