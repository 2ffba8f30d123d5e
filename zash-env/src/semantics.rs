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

//! Type definitions for command execution

use zash_syntax::source::Location;

/// Resultant string of word expansion
///
/// A field is a string accompanied by the location of the word it resulted
/// from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    /// String value of the field
    pub value: String,
    /// Location of the word this field resulted from
    pub origin: Location,
}

impl Field {
    /// Creates a new field with a dummy origin location.
    #[inline]
    #[must_use]
    pub fn dummy<S: Into<String>>(value: S) -> Field {
        Field {
            value: value.into(),
            origin: Location::dummy(),
        }
    }

    /// Creates an array of fields with dummy origin locations.
    #[must_use]
    pub fn dummies<I, S>(values: I) -> Vec<Field>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Self::dummy).collect()
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.value.fmt(f)
    }
}

/// Number that summarizes the result of command execution
///
/// An exit status is an integer returned from a utility when executed. The
/// special parameter `$?` expands to the exit status of the last executed
/// command, and some compound commands branch on it.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExitStatus(pub i32);

impl ExitStatus {
    /// Exit status of a successful command
    pub const SUCCESS: ExitStatus = ExitStatus(0);

    /// Exit status of a generically failed command
    pub const FAILURE: ExitStatus = ExitStatus(1);

    /// Exit status of a built-in used in a wrong way
    pub const ERROR: ExitStatus = ExitStatus(2);

    /// Exit status for a command that was found but could not be executed
    pub const NOT_EXECUTABLE: ExitStatus = ExitStatus(126);

    /// Exit status for a command that could not be found
    pub const NOT_FOUND: ExitStatus = ExitStatus(127);

    /// Whether this exit status denotes success.
    #[must_use]
    pub fn is_successful(self) -> bool {
        self.0 == 0
    }

    /// Returns the exit status of a command terminated by a signal.
    ///
    /// POSIX requires the result to be greater than 128; this implementation
    /// returns `128 + signal_number`.
    #[must_use]
    pub fn of_signal(signal_number: i32) -> ExitStatus {
        ExitStatus(128 + signal_number)
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i32> for ExitStatus {
    fn from(value: i32) -> ExitStatus {
        ExitStatus(value)
    }
}

impl From<ExitStatus> for i32 {
    fn from(exit_status: ExitStatus) -> i32 {
        exit_status.0
    }
}

/// Computes the exit status of a pipeline from its commands' statuses.
///
/// Without `pipefail`, a pipeline exits with its rightmost command's status.
/// With `pipefail`, it exits with the rightmost non-zero status, or success
/// if every command succeeded.
///
/// # Panics
///
/// If `statuses` is empty; a pipeline has at least one command.
#[must_use]
pub fn pipeline_exit_status(pipefail: bool, statuses: &[ExitStatus]) -> ExitStatus {
    let last = *statuses.last().expect("a pipeline has at least one command");
    if !pipefail {
        return last;
    }
    statuses
        .iter()
        .rev()
        .copied()
        .find(|status| !status.is_successful())
        .unwrap_or(ExitStatus::SUCCESS)
}

/// Pending control-flow change
///
/// A divert is set by the `break`, `continue` and `return` built-ins and
/// observed by the executor at statement boundaries within loops and
/// functions. The executor clears the divert when it consumes it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Divert {
    /// Exit the `count` innermost enclosing loops.
    Break {
        /// Number of loops to break out of; at least 1
        count: usize,
    },
    /// Resume the next iteration, skipping out of `count - 1` inner loops.
    Continue {
        /// Nesting level the continue applies to; at least 1
        count: usize,
    },
    /// Return from the innermost function or dot script.
    Return,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_status_constants() {
        assert!(ExitStatus::SUCCESS.is_successful());
        assert!(!ExitStatus::FAILURE.is_successful());
        assert_eq!(ExitStatus::ERROR.0, 2);
        assert_eq!(ExitStatus::NOT_EXECUTABLE.0, 126);
        assert_eq!(ExitStatus::NOT_FOUND.0, 127);
    }

    #[test]
    fn signal_exit_status() {
        assert_eq!(ExitStatus::of_signal(15).0, 143);
        assert_eq!(ExitStatus::of_signal(9).0, 137);
    }

    #[test]
    fn pipeline_status_without_pipefail_is_the_rightmost() {
        // `ls | grep test` with grep failing: the right command decides.
        let statuses = [ExitStatus(0), ExitStatus(1)];
        assert_eq!(pipeline_exit_status(false, &statuses), ExitStatus(1));

        // The left command's failure is invisible without pipefail.
        let statuses = [ExitStatus(1), ExitStatus(0)];
        assert_eq!(pipeline_exit_status(false, &statuses), ExitStatus(0));
    }

    #[test]
    fn pipeline_status_with_pipefail_is_the_rightmost_failure() {
        let statuses = [ExitStatus(0), ExitStatus(1), ExitStatus(0)];
        assert_eq!(pipeline_exit_status(true, &statuses), ExitStatus(1));

        let statuses = [ExitStatus(2), ExitStatus(3), ExitStatus(0)];
        assert_eq!(pipeline_exit_status(true, &statuses), ExitStatus(3));

        let statuses = [ExitStatus(0), ExitStatus(0)];
        assert_eq!(pipeline_exit_status(true, &statuses), ExitStatus(0));
    }
}
