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

//! Type definitions for shell options
//!
//! Options are named in their positive sense: the POSIX `noclobber`,
//! `noglob` and `noexec` options are the [`Clobber`], [`Glob`] and [`Exec`]
//! options turned off. [`parse_long`] resolves the `no`-prefixed spellings,
//! and [`parse_short`] the single-letter ones.
//!
//! An [`OptionSet`] holds the states of all options. It merely manages the
//! states; honoring them is up to the expander and the executor.

use enumset::EnumSet;
use enumset::EnumSetType;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// State of an option: either enabled or disabled.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum State {
    /// Enabled.
    On,
    /// Disabled.
    Off,
}

pub use State::*;

/// Converts a state to a string (`on` or `off`).
impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            On => "on",
            Off => "off",
        };
        s.fmt(f)
    }
}

impl std::ops::Not for State {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            On => Off,
            Off => On,
        }
    }
}

/// Shell option
#[derive(Clone, Copy, Debug, EnumSetType, Eq, Hash, PartialEq)]
#[enumset(no_super_impls)]
#[non_exhaustive]
pub enum Option {
    /// Makes all variables exported when they are assigned.
    AllExport,
    /// Allows overwriting and truncating an existing file with the `>`
    /// redirection. Off is the POSIX `noclobber` option.
    Clobber,
    /// Makes the shell exit when a command returns a non-zero exit status.
    ErrExit,
    /// Makes the shell actually run commands. Off is the POSIX `noexec`
    /// option.
    Exec,
    /// Enables pathname expansion. Off is the POSIX `noglob` option.
    Glob,
    /// Prevents the interactive shell from exiting when the user enters an
    /// end-of-file.
    IgnoreEof,
    /// Makes a pipeline's exit status the rightmost non-zero exit status of
    /// its commands.
    PipeFail,
    /// Expands unset parameters to empty strings rather than erroring out.
    /// Off is the POSIX `nounset` option.
    Unset,
    /// Echoes the input before parsing and executing.
    Verbose,
    /// Enables vi-like command line editing.
    Vi,
    /// Prints expanded words during command execution.
    XTrace,
}

pub use self::Option::*;

impl Option {
    /// Returns the option name, all in lower case without punctuation.
    #[must_use]
    pub fn long_name(self) -> &'static str {
        match self {
            AllExport => "allexport",
            Clobber => "clobber",
            ErrExit => "errexit",
            Exec => "exec",
            Glob => "glob",
            IgnoreEof => "ignoreeof",
            PipeFail => "pipefail",
            Unset => "unset",
            Verbose => "verbose",
            Vi => "vi",
            XTrace => "xtrace",
        }
    }
}

/// Prints the option name, all in lower case without punctuation.
impl Display for Option {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.long_name().fmt(f)
    }
}

/// Error type indicating that the input string does not name a valid option.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FromStrError {
    /// The input string does not match any option name.
    NoSuchOption,
    /// The input string is a prefix of more than one valid option name.
    Ambiguous,
}

pub use FromStrError::*;

/// Parses an option name.
///
/// The name may be abbreviated as long as it is an unambiguous prefix of a
/// valid option name; a full option name is never considered ambiguous.
impl FromStr for Option {
    type Err = FromStrError;
    fn from_str(name: &str) -> Result<Self, FromStrError> {
        const OPTIONS: &[(&str, Option)] = &[
            ("allexport", AllExport),
            ("clobber", Clobber),
            ("errexit", ErrExit),
            ("exec", Exec),
            ("glob", Glob),
            ("ignoreeof", IgnoreEof),
            ("pipefail", PipeFail),
            ("unset", Unset),
            ("verbose", Verbose),
            ("vi", Vi),
            ("xtrace", XTrace),
        ];

        match OPTIONS.binary_search_by_key(&name, |&(full_name, _option)| full_name) {
            Ok(index) => Ok(OPTIONS[index].1),
            Err(index) => {
                let mut options = OPTIONS[index..]
                    .iter()
                    .filter(|&(full_name, _option)| full_name.starts_with(name));
                match options.next() {
                    Some(first) => match options.next() {
                        Some(_second) => Err(Ambiguous),
                        None => Ok(first.1),
                    },
                    None => Err(NoSuchOption),
                }
            }
        }
    }
}

/// Parses a long option name, allowing a `no` prefix to negate the state.
///
/// ```
/// # use zash_env::option::{parse_long, FromStrError::NoSuchOption, Option::*, State::*};
/// assert_eq!(parse_long("errexit"), Ok((ErrExit, On)));
/// assert_eq!(parse_long("noclobber"), Ok((Clobber, Off)));
/// assert_eq!(parse_long("noglob"), Ok((Glob, Off)));
/// assert_eq!(parse_long("xit"), Err(NoSuchOption));
/// ```
pub fn parse_long(name: &str) -> Result<(self::Option, State), FromStrError> {
    if let Ok(option) = name.parse() {
        return Ok((option, On));
    }
    if let Some(positive) = name.strip_prefix("no") {
        if let Ok(option) = positive.parse() {
            return Ok((option, Off));
        }
    }
    Err(NoSuchOption)
}

/// Parses a short option name.
///
/// This function parses the following single-character option names:
///
/// ```
/// # use zash_env::option::{parse_short, Option::*, State::*};
/// assert_eq!(parse_short('a'), Some((AllExport, On)));
/// assert_eq!(parse_short('C'), Some((Clobber, Off)));
/// assert_eq!(parse_short('e'), Some((ErrExit, On)));
/// assert_eq!(parse_short('f'), Some((Glob, Off)));
/// assert_eq!(parse_short('n'), Some((Exec, Off)));
/// assert_eq!(parse_short('u'), Some((Unset, Off)));
/// assert_eq!(parse_short('v'), Some((Verbose, On)));
/// assert_eq!(parse_short('x'), Some((XTrace, On)));
/// ```
///
/// The name argument is case-sensitive.
#[must_use]
pub fn parse_short(name: char) -> std::option::Option<(self::Option, State)> {
    match name {
        'a' => Some((AllExport, On)),
        'C' => Some((Clobber, Off)),
        'e' => Some((ErrExit, On)),
        'f' => Some((Glob, Off)),
        'n' => Some((Exec, Off)),
        'u' => Some((Unset, Off)),
        'v' => Some((Verbose, On)),
        'x' => Some((XTrace, On)),
        _ => None,
    }
}

/// Returns the single-letter name of an option, with the state in which that
/// letter applies.
#[must_use]
pub fn short_name(option: self::Option) -> std::option::Option<(char, State)> {
    match option {
        AllExport => Some(('a', On)),
        Clobber => Some(('C', Off)),
        ErrExit => Some(('e', On)),
        Glob => Some(('f', Off)),
        Exec => Some(('n', Off)),
        Unset => Some(('u', Off)),
        Verbose => Some(('v', On)),
        XTrace => Some(('x', On)),
        IgnoreEof | PipeFail | Vi => None,
    }
}

/// Set of enabled options
pub type OptionSet = EnumSet<Option>;

/// Returns the option set a new shell starts with.
///
/// [`Clobber`], [`Exec`], [`Glob`] and [`Unset`] are on; everything else is
/// off.
#[must_use]
pub fn default_option_set() -> OptionSet {
    Clobber | Exec | Glob | Unset
}

/// Computes the value of the special parameter `$-` for an option set.
///
/// The result contains the short name of every option whose state matches
/// the letter's meaning.
#[must_use]
pub fn to_flag_string(options: OptionSet) -> String {
    EnumSet::<Option>::all()
        .iter()
        .filter_map(|option| {
            let (letter, state) = short_name(option)?;
            let on = options.contains(option);
            let matches = (state == On) == on;
            matches.then_some(letter)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_name_round_trip() {
        for option in EnumSet::<Option>::all() {
            assert_eq!(option.long_name().parse(), Ok(option));
        }
    }

    #[test]
    fn unambiguous_prefixes() {
        assert_eq!("clob".parse(), Ok(Clobber));
        assert_eq!("pipe".parse(), Ok(PipeFail));
        assert_eq!("v".parse::<Option>(), Err(Ambiguous)); // verbose and vi
        assert_eq!("q".parse::<Option>(), Err(NoSuchOption));
    }

    #[test]
    fn full_name_is_never_ambiguous() {
        // `vi` is a prefix of nothing else, but even if it were, the exact
        // match must win.
        assert_eq!("vi".parse(), Ok(Vi));
    }

    #[test]
    fn negated_long_names() {
        assert_eq!(parse_long("nounset"), Ok((Unset, Off)));
        assert_eq!(parse_long("noexec"), Ok((Exec, Off)));
        assert_eq!(parse_long("nopipefail"), Ok((PipeFail, Off)));
        assert_eq!(parse_long("nosuch"), Err(NoSuchOption));
    }

    #[test]
    fn default_set() {
        let options = default_option_set();
        assert!(options.contains(Clobber));
        assert!(options.contains(Exec));
        assert!(options.contains(Glob));
        assert!(options.contains(Unset));
        assert!(!options.contains(ErrExit));
        assert!(!options.contains(PipeFail));
    }

    #[test]
    fn flag_string_reflects_states() {
        let flags = to_flag_string(default_option_set());
        assert!(!flags.contains('e'));
        assert!(!flags.contains('f'));

        let flags = to_flag_string(default_option_set() | ErrExit | XTrace);
        assert!(flags.contains('e'));
        assert!(flags.contains('x'));

        let flags = to_flag_string(default_option_set() - Glob);
        assert!(flags.contains('f'));
    }
}
