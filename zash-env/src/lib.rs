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

//! Shell execution environment
//!
//! This crate defines the [`Frame`], the uniform contract through which the
//! word expander and the executor read and write environmental state:
//! variables, positional parameters, functions, aliases, shell options,
//! traps, background jobs, the last exit status and the pending control-flow
//! divert.
//!
//! Interaction with the host operating system goes through the [`System`]
//! (system::System) trait. [`RealSystem`](system::RealSystem) implements it
//! over the process environment and filesystem; tests use
//! [`VirtualSystem`](system::VirtualSystem), which keeps everything in
//! memory.

pub mod alias;
pub mod function;
pub mod job;
pub mod option;
pub mod semantics;
pub mod signal;
pub mod system;
pub mod trap;
pub mod variable;

use self::alias::AliasSet;
use self::function::FunctionSet;
use self::job::JobSet;
use self::option::OptionSet;
use self::semantics::{Divert, ExitStatus};
use self::system::System;
use self::trap::TrapSet;
use self::variable::{PositionalParams, Scope, VariableSet};
use zash_syntax::source::Location;

/// Whole execution environment of one shell
///
/// The frame aggregates the stores the expander and the executor operate on.
/// Most members are public; the methods on `Frame` cover the operations that
/// touch more than one member, like exporting a variable to the host
/// environment.
///
/// Nested scopes (function calls, dot scripts) are entered and left with
/// [`push_context`](Self::push_context) and [`pop_context`](Self::pop_context).
/// Variable reads walk outward through the contexts; writes target the
/// nearest binding unless a [`Scope`] says otherwise.
#[derive(Debug)]
pub struct Frame {
    /// Variables and positional parameters
    pub variables: VariableSet,
    /// Functions defined in this environment
    pub functions: FunctionSet,
    /// Aliases used by the parser
    pub aliases: AliasSet,
    /// Shell option states
    pub options: OptionSet,
    /// Trap actions
    pub traps: TrapSet,
    /// Background jobs
    pub jobs: JobSet,
    /// Exit status of the last executed command
    pub exit_status: ExitStatus,
    /// Pending control-flow divert, observed by the executor at statement
    /// boundaries and cleared when consumed
    pub divert: Option<Divert>,
    /// Name of the shell or the script being executed (`$0`)
    pub arg0: String,
    /// Process ID of the shell (`$$`)
    pub shell_pid: i64,
    /// Interface to the host system
    pub system: Box<dyn System>,
}

impl Frame {
    /// Creates a frame backed by the given system.
    #[must_use]
    pub fn new(system: Box<dyn System>) -> Frame {
        Frame {
            variables: VariableSet::new(),
            functions: FunctionSet::new(),
            aliases: AliasSet::new(),
            options: option::default_option_set(),
            traps: TrapSet::new(),
            jobs: JobSet::new(),
            exit_status: ExitStatus::SUCCESS,
            divert: None,
            arg0: String::new(),
            shell_pid: 0,
            system,
        }
    }

    /// Creates a frame backed by a [`VirtualSystem`](system::VirtualSystem).
    ///
    /// This is the constructor used in tests.
    #[must_use]
    pub fn new_virtual() -> Frame {
        Frame::new(Box::<system::VirtualSystem>::default())
    }

    /// Assigns a variable, propagating an exported value to the host
    /// environment.
    pub fn assign_variable(
        &mut self,
        scope: Scope,
        name: &str,
        value: String,
        location: Option<Location>,
    ) -> Result<(), variable::AssignError> {
        self.variables.assign(scope, name, value, location)?;
        let variable = self.variables.get(name).unwrap();
        if variable.is_exported {
            if let Some(value) = &variable.value {
                self.system.setenv(name, value);
            }
        }
        if self.options.contains(option::Option::AllExport) {
            self.variables.export(name);
            let variable = self.variables.get(name).unwrap();
            if let Some(value) = &variable.value {
                self.system.setenv(name, value);
            }
        }
        Ok(())
    }

    /// Unsets a variable, removing an exported value from the host
    /// environment.
    pub fn unset_variable(&mut self, name: &str) -> Result<(), variable::UnsetError> {
        let was_exported = self
            .variables
            .get(name)
            .is_some_and(|variable| variable.is_exported);
        self.variables.unset(name)?;
        if was_exported {
            self.system.unsetenv(name);
        }
        Ok(())
    }

    /// Returns the positional parameters of the current context.
    #[must_use]
    pub fn positional_params(&self) -> &PositionalParams {
        self.variables.positional_params()
    }

    /// Returns the positional parameters of the current context for
    /// modification.
    pub fn positional_params_mut(&mut self) -> &mut PositionalParams {
        self.variables.positional_params_mut()
    }

    /// Enters a nested context, optionally with fresh positional parameters
    /// (as a function call does).
    pub fn push_context(&mut self, positional_params: Option<PositionalParams>) {
        self.variables.push_context(positional_params);
    }

    /// Leaves the innermost nested context.
    ///
    /// # Panics
    ///
    /// If the current context is the base context.
    pub fn pop_context(&mut self) {
        self.variables.pop_context();
    }

    /// Reaps completed background jobs.
    ///
    /// With `wait` false, the call polls without blocking; with `wait` true,
    /// it blocks until all jobs have completed. Returns whether any job
    /// changed state.
    pub fn reap_completed_jobs(&mut self, wait: bool) -> bool {
        self.jobs.reap(&mut *self.system, wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exported_assignment_reaches_the_host_environment() {
        let mut frame = Frame::new_virtual();
        frame
            .assign_variable(Scope::Global, "FOO", "bar".to_string(), None)
            .unwrap();
        assert_eq!(frame.system.getenv("FOO"), None);

        frame.variables.export("FOO");
        frame
            .assign_variable(Scope::Global, "FOO", "baz".to_string(), None)
            .unwrap();
        assert_eq!(frame.system.getenv("FOO").as_deref(), Some("baz"));

        frame.unset_variable("FOO").unwrap();
        assert_eq!(frame.system.getenv("FOO"), None);
    }

    #[test]
    fn allexport_exports_on_assignment() {
        let mut frame = Frame::new_virtual();
        frame.options.insert(option::Option::AllExport);
        frame
            .assign_variable(Scope::Global, "X", "1".to_string(), None)
            .unwrap();
        assert_eq!(frame.system.getenv("X").as_deref(), Some("1"));
    }

    #[test]
    fn contexts_nest() {
        let mut frame = Frame::new_virtual();
        frame
            .assign_variable(Scope::Global, "X", "outer".to_string(), None)
            .unwrap();
        frame.push_context(Some(PositionalParams::from_iter(["a", "b"])));
        assert_eq!(frame.positional_params().len(), 2);
        assert_eq!(
            frame.variables.get("X").unwrap().value.as_deref(),
            Some("outer")
        );
        frame.pop_context();
        assert_eq!(frame.positional_params().len(), 0);
    }
}
