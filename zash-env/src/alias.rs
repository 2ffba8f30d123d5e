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

//! Defining aliases
//!
//! The alias data types live in the syntax crate because the parser looks
//! aliases up while parsing. This module re-exports them as part of the
//! execution environment; the frame's alias store implements the parser's
//! [`Glossary`] interface directly.

#[doc(no_inline)]
pub use zash_syntax::alias::{Alias, AliasSet, EmptyGlossary, Glossary, HashEntry};
