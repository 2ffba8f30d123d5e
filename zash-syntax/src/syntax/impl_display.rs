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

//! Implementations of [`std::fmt::Display`] for the lexical element types
//!
//! The implementations produce canonical single-line source code that parses
//! back to an equivalent word. Quoting is re-rendered from the recorded
//! flags, so a backslash-escaped character comes back single-quoted.

use super::*;
use std::fmt;
use std::fmt::Write as _;

impl fmt::Display for SwitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SwitchKind::*;
        let c = match self {
            Alter => '+',
            Default => '-',
            Assign => '=',
            Error => '?',
        };
        f.write_char(c)
    }
}

impl fmt::Display for SwitchCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchCondition::Unset => Ok(()),
            SwitchCondition::UnsetOrEmpty => f.write_char(':'),
        }
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.condition, self.kind, self.word)
    }
}

impl fmt::Display for Trim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self.side {
            TrimSide::Prefix => '#',
            TrimSide::Suffix => '%',
        };
        f.write_char(c)?;
        if self.length == TrimLength::Longest {
            f.write_char(c)?;
        }
        self.pattern.fmt(f)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.modifier {
            Modifier::None => write!(f, "${{{}}}", self.id),
            Modifier::Length => write!(f, "${{#{}}}", self.id),
            Modifier::Switch(switch) => write!(f, "${{{}{}}}", self.id, switch),
            Modifier::Trim(trim) => write!(f, "${{{}{}}}", self.id, trim),
        }
    }
}

/// Writes a string as a single-quoted token.
///
/// If the value contains a single quote, the double-quoted form is used
/// instead, with the characters that are special inside double quotes
/// backslash-escaped.
fn write_single_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if value.contains('\'') {
        write_double_quoted(f, value)
    } else {
        write!(f, "'{value}'")
    }
}

/// Writes a string as a double-quoted token, escaping the characters that
/// are special inside double quotes.
fn write_double_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        if matches!(c, '$' | '`' | '"' | '\\') {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

impl fmt::Display for PartUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartUnit::Literal(value) => f.write_str(value),
            PartUnit::Tilde(name) => write!(f, "~{name}"),
            PartUnit::Param(param) => param.fmt(f),
            PartUnit::CommandSubst { content, .. } => write!(f, "$({content})"),
            PartUnit::Arith { content, .. } => write!(f, "$(({content}))"),
        }
    }
}

impl fmt::Display for WordPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            PartUnit::Literal(value) if self.single_quoted => write_single_quoted(f, value),
            PartUnit::Literal(value) if self.double_quoted => write_double_quoted(f, value),
            unit if self.double_quoted => write!(f, "\"{unit}\""),
            // A quoted expansion under single quotes cannot be produced by
            // the lexer; render the double-quoted equivalent.
            unit if self.single_quoted => write!(f, "\"{unit}\""),
            unit => unit.fmt(f),
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.parts.iter().try_for_each(|part| part.fmt(f))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            TokenId::Word | TokenId::Keyword(_) => self.word.fmt(f),
            TokenId::Operator(op) => op.fmt(f),
            TokenId::IoNumber(n) => n.fmt(f),
            TokenId::IoLocation(name) => write!(f, "{{{name}}}"),
            TokenId::EndOfHereDoc | TokenId::EndOfInput => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Location;

    fn unquoted_word(unit: PartUnit) -> Word {
        Word {
            parts: vec![WordPart::unquoted(unit)],
            location: Location::dummy(),
        }
    }

    #[test]
    fn plain_param() {
        let param = Param::from_id("foo");
        assert_eq!(param.to_string(), "${foo}");
    }

    #[test]
    fn param_with_switch() {
        let mut param = Param::from_id("foo");
        param.modifier = Modifier::Switch(Switch {
            kind: SwitchKind::Default,
            condition: SwitchCondition::UnsetOrEmpty,
            word: Word::from_literal("bar", Location::dummy()),
        });
        assert_eq!(param.to_string(), "${foo:-bar}");
    }

    #[test]
    fn param_with_trim() {
        let mut param = Param::from_id("foo");
        param.modifier = Modifier::Trim(Trim {
            side: TrimSide::Suffix,
            length: TrimLength::Longest,
            pattern: Word::from_literal("*/", Location::dummy()),
        });
        assert_eq!(param.to_string(), "${foo%%*/}");
    }

    #[test]
    fn param_with_length() {
        let mut param = Param::from_id("#");
        param.modifier = Modifier::Length;
        assert_eq!(param.to_string(), "${##}");
    }

    #[test]
    fn quoted_literals() {
        let mut word = unquoted_word(PartUnit::Literal("a b".to_string()));
        word.parts[0].single_quoted = true;
        assert_eq!(word.to_string(), "'a b'");

        let mut word = unquoted_word(PartUnit::Literal("a\"b".to_string()));
        word.parts[0].double_quoted = true;
        assert_eq!(word.to_string(), "\"a\\\"b\"");

        let mut word = unquoted_word(PartUnit::Literal("don't".to_string()));
        word.parts[0].single_quoted = true;
        assert_eq!(word.to_string(), "\"don't\"");
    }

    #[test]
    fn quoted_param() {
        let mut word = unquoted_word(PartUnit::Param(Box::new(Param::from_id("x"))));
        word.parts[0].double_quoted = true;
        assert_eq!(word.to_string(), "\"${x}\"");
    }

    #[test]
    fn command_substitution() {
        let word = unquoted_word(PartUnit::CommandSubst {
            content: "echo hi".to_string(),
            tokens: Vec::new(),
        });
        assert_eq!(word.to_string(), "$(echo hi)");
    }

    #[test]
    fn arithmetic_expansion() {
        let word = unquoted_word(PartUnit::Arith {
            content: "1+2".to_string(),
            tokens: Vec::new(),
        });
        assert_eq!(word.to_string(), "$((1+2))");
    }
}
