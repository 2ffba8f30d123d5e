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

//! Type definitions for trap actions
//!
//! The trap table associates [conditions](Condition) with [actions](Action).
//! The `EXIT` trap fires on normal termination; signal traps are run by the
//! executor between statements at the next safe point after the signal
//! arrives. Delivering signals is the job of the external signal layer; the
//! table only records what to run.

use crate::signal;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;

/// Condition under which a trap action is taken
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Condition {
    /// The shell exits normally.
    Exit,
    /// The signal with the given number is delivered, identified by number.
    Signal(i32),
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Exit => f.write_str("EXIT"),
            Condition::Signal(number) => match signal::Name::from_number(*number) {
                Some(name) => name.fmt(f),
                None => number.fmt(f),
            },
        }
    }
}

/// Error value indicating that a string does not name a trap condition
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[error("not a trap condition")]
pub struct ParseConditionError;

/// Parses `EXIT`, a signal name, or a decimal signal number.
impl FromStr for Condition {
    type Err = ParseConditionError;
    fn from_str(s: &str) -> Result<Condition, ParseConditionError> {
        if s == "EXIT" || s == "0" {
            return Ok(Condition::Exit);
        }
        if let Ok(name) = s.parse::<signal::Name>() {
            return Ok(Condition::Signal(name.number()));
        }
        if let Ok(number) = s.parse::<i32>() {
            if number > 0 {
                return Ok(Condition::Signal(number));
            }
        }
        Err(ParseConditionError)
    }
}

/// Action performed when a [`Condition`] is met
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Action {
    /// Performs the default action for the condition.
    #[default]
    Default,

    /// Pretends as if the condition was not met.
    Ignore,

    /// Executes a command string.
    ///
    /// The string is parsed and executed each time the trap fires. It is
    /// reference-counted so the table and the executor can share it without
    /// cloning.
    Command(Rc<str>),
}

/// Error that may happen when setting a trap
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SetActionError {
    /// Attempt to set a trap for a signal that cannot be caught.
    #[error("the signal cannot be trapped")]
    Untrappable,
}

/// Collection of trap actions, keyed by condition
///
/// Only conditions with a non-default action are stored. The map is ordered
/// so iteration is stable.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrapSet {
    actions: BTreeMap<Condition, Action>,
}

impl TrapSet {
    /// Creates an empty trap set.
    #[must_use]
    pub fn new() -> TrapSet {
        TrapSet::default()
    }

    /// Returns the action for a condition.
    #[must_use]
    pub fn get_action(&self, condition: Condition) -> &Action {
        self.actions.get(&condition).unwrap_or(&Action::Default)
    }

    /// Sets the action for a condition.
    ///
    /// Setting the default action removes the entry. `KILL` and `STOP`
    /// cannot be trapped.
    pub fn set_action(
        &mut self,
        condition: Condition,
        action: Action,
    ) -> Result<(), SetActionError> {
        if let Condition::Signal(number) = condition {
            let untrappable = signal::Name::from_number(number)
                .is_some_and(|name| !name.is_trappable());
            if untrappable {
                return Err(SetActionError::Untrappable);
            }
        }
        if action == Action::Default {
            self.actions.remove(&condition);
        } else {
            self.actions.insert(condition, action);
        }
        Ok(())
    }

    /// Iterates over the conditions with a non-default action.
    pub fn iter(&self) -> impl Iterator<Item = (Condition, &Action)> {
        self.actions.iter().map(|(&condition, action)| (condition, action))
    }

    /// Removes all non-default actions.
    ///
    /// A subshell clears inherited command traps on entry.
    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditions_parse() {
        assert_eq!("EXIT".parse(), Ok(Condition::Exit));
        assert_eq!("0".parse(), Ok(Condition::Exit));
        assert_eq!("INT".parse(), Ok(Condition::Signal(2)));
        assert_eq!("15".parse(), Ok(Condition::Signal(15)));
        assert_eq!("BOGUS".parse::<Condition>(), Err(ParseConditionError));
        assert_eq!("-1".parse::<Condition>(), Err(ParseConditionError));
    }

    #[test]
    fn conditions_display() {
        assert_eq!(Condition::Exit.to_string(), "EXIT");
        assert_eq!(Condition::Signal(2).to_string(), "INT");
        assert_eq!(Condition::Signal(64).to_string(), "64");
    }

    #[test]
    fn set_and_get_actions() {
        let mut traps = TrapSet::new();
        assert_eq!(traps.get_action(Condition::Exit), &Action::Default);

        let action = Action::Command("echo bye".into());
        traps.set_action(Condition::Exit, action.clone()).unwrap();
        assert_eq!(traps.get_action(Condition::Exit), &action);

        traps.set_action(Condition::Signal(2), Action::Ignore).unwrap();
        let entries: Vec<_> = traps.iter().collect();
        assert_eq!(entries.len(), 2);

        traps.set_action(Condition::Exit, Action::Default).unwrap();
        assert_eq!(traps.get_action(Condition::Exit), &Action::Default);
        assert_eq!(traps.iter().count(), 1);
    }

    #[test]
    fn kill_and_stop_cannot_be_trapped() {
        let mut traps = TrapSet::new();
        let result = traps.set_action(Condition::Signal(9), Action::Ignore);
        assert_eq!(result, Err(SetActionError::Untrappable));
        let result = traps.set_action(Condition::Signal(19), Action::Ignore);
        assert_eq!(result, Err(SetActionError::Untrappable));
    }
}
