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

//! Interface to the host system
//!
//! The [`System`] trait is the boundary between the shell core and the
//! operating system: environment export, the password database lookup used
//! by tilde expansion, the directory reads used by pathname expansion, and
//! the job reaping delegated to the external process supervisor.
//!
//! [`RealSystem`] implements the interface over the process environment and
//! the filesystem. [`VirtualSystem`] is a fully in-memory implementation
//! used in tests, so no test depends on or modifies the state of the machine
//! it runs on.

mod real;
mod r#virtual;

pub use self::r#virtual::VirtualSystem;
pub use real::RealSystem;

use std::fmt::Debug;

/// Abstraction of the host system
pub trait System: Debug {
    /// Returns the value of an environment variable of the shell process.
    fn getenv(&self, name: &str) -> Option<String>;

    /// Propagates an exported variable to the process environment.
    fn setenv(&mut self, name: &str, value: &str);

    /// Removes a variable from the process environment.
    fn unsetenv(&mut self, name: &str);

    /// Returns the home directory of the named user.
    ///
    /// This is the password-database read behind `~user` expansion. The
    /// result is `None` if the user is unknown.
    fn getpwnam_dir(&self, name: &str) -> Option<String>;

    /// Returns the names of the entries of a directory.
    ///
    /// The result includes the `.` and `..` entries if the underlying
    /// directory reports them; pathname expansion filters them out.
    fn read_dir(&self, path: &str) -> std::io::Result<Vec<String>>;

    /// Whether the path names an existing directory.
    fn is_directory(&self, path: &str) -> bool;

    /// Whether the path names an existing filesystem entry.
    fn exists(&self, path: &str) -> bool;

    /// Collects results of completed background processes.
    ///
    /// Each result is a process ID and its exit status. With `wait` false,
    /// the call polls without blocking. The real implementation is supplied
    /// by the embedding process supervisor.
    fn reap_jobs(&mut self, wait: bool) -> Vec<(i64, i32)>;
}
