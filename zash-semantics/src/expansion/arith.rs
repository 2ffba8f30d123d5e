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

//! Arithmetic expansion semantics
//!
//! The content of `$((...))` first undergoes parameter expansion, command
//! substitution and arithmetic expansion like a here-document body; the
//! resulting expression text goes to the arithmetic evaluator capability,
//! and the value comes back as its decimal representation.

use super::{Error, ErrorCause, Expander, Result, HEREDOC};
use zash_syntax::source::Location;

/// Evaluates an arithmetic expansion to its decimal result.
pub(super) fn expand(
    expander: &mut Expander,
    content: &str,
    location: Location,
) -> Result<String> {
    let expression = expander.expand_text(content, HEREDOC)?;
    let value = expander
        .evaluator
        .eval_arithmetic(expander.frame, &expression)
        .map_err(|message| Error {
            cause: ErrorCause::ArithFailed(message),
            location,
        })?;
    Ok(value.to_string())
}
