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

//! Signal names
//!
//! The trap table is keyed by raw signal numbers; this module maps between
//! the portable signal names the user writes (`INT`, `TERM`, ...) and the
//! conventional numbers. Delivering signals is the job of the external
//! signal layer; the numbers here only identify table entries.

use strum::{Display, EnumIter, EnumString};

/// Name of a signal the shell can trap
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "UPPERCASE")]
#[non_exhaustive]
pub enum Name {
    Hup,
    Int,
    Quit,
    Ill,
    Trap,
    Abrt,
    Bus,
    Fpe,
    Kill,
    Usr1,
    Segv,
    Usr2,
    Pipe,
    Alrm,
    Term,
    Chld,
    Cont,
    Stop,
    Tstp,
    Ttin,
    Ttou,
}

impl Name {
    /// Returns the conventional number of the signal.
    #[must_use]
    pub const fn number(self) -> i32 {
        use Name::*;
        match self {
            Hup => 1,
            Int => 2,
            Quit => 3,
            Ill => 4,
            Trap => 5,
            Abrt => 6,
            Bus => 7,
            Fpe => 8,
            Kill => 9,
            Usr1 => 10,
            Segv => 11,
            Usr2 => 12,
            Pipe => 13,
            Alrm => 14,
            Term => 15,
            Chld => 17,
            Cont => 18,
            Stop => 19,
            Tstp => 20,
            Ttin => 21,
            Ttou => 22,
        }
    }

    /// Returns the name for a conventional signal number.
    #[must_use]
    pub fn from_number(number: i32) -> Option<Name> {
        use strum::IntoEnumIterator as _;
        Name::iter().find(|name| name.number() == number)
    }

    /// Whether a trap can be set for this signal.
    ///
    /// `KILL` and `STOP` cannot be caught or ignored.
    #[must_use]
    pub const fn is_trappable(self) -> bool {
        !matches!(self, Name::Kill | Name::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn names_parse_and_print() {
        assert_eq!(Name::from_str("INT"), Ok(Name::Int));
        assert_eq!(Name::from_str("TERM"), Ok(Name::Term));
        assert_eq!(Name::Int.to_string(), "INT");
        assert!(Name::from_str("NOSIG").is_err());
    }

    #[test]
    fn numbers_round_trip() {
        use strum::IntoEnumIterator as _;
        for name in Name::iter() {
            assert_eq!(Name::from_number(name.number()), Some(name));
        }
    }

    #[test]
    fn kill_and_stop_are_untrappable() {
        assert!(!Name::Kill.is_trappable());
        assert!(!Name::Stop.is_trappable());
        assert!(Name::Int.is_trappable());
    }
}
