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

//! Word expansion semantics
//!
//! This crate implements the expansion of [words](zash_syntax::syntax::Word)
//! into [fields](zash_env::semantics::Field): tilde expansion, parameter
//! expansion, command substitution and arithmetic expansion, followed by
//! field splitting and pathname expansion. See the [`expansion`] module for
//! the entry points.

pub mod expansion;

pub use expansion::{Error, ErrorCause, Evaluator, Expander, ExpansionFlag};
