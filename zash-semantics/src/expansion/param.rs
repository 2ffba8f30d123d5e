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

//! Parameter expansion semantics
//!
//! Expansion proceeds in three steps: the parameter name resolves to a raw
//! [value](Value), the modifier (switch, trim, length) transforms it, and
//! the result becomes a [phrase](super::phrase::Phrase). The special
//! parameters `@` and `*` resolve to all positional parameters and differ
//! only in how quoting shapes the phrase: a quoted `$@` keeps one field per
//! parameter while a quoted `$*` joins them with the first IFS character.

use super::attr;
use super::phrase::Phrase;
use super::split::Ifs;
use super::{Error, ErrorCause, Expander, Result};
use zash_env::option;
use zash_env::variable::Scope;
use zash_env::Frame;
use zash_fnmatch::{with_escape, Pattern};
use zash_syntax::source::Location;
use zash_syntax::syntax::{
    Modifier, Param, ParamKind, SpecialParam, Switch, SwitchCondition, SwitchKind, Trim,
    TrimLength, TrimSide,
};

/// Raw value of a parameter before modifiers apply
#[derive(Clone, Debug, Eq, PartialEq)]
enum Value {
    /// The parameter is not set.
    Unset,
    /// One string value
    Scalar(String),
    /// All positional parameters (`$@` or `$*`)
    All(Vec<String>, SpecialParam),
}

/// Expands a parameter with its modifier.
pub(super) fn expand(
    expander: &mut Expander,
    param: &Param,
    quoted: bool,
    location: Location,
) -> Result<Phrase> {
    let value = lookup(expander.frame, param);
    match &param.modifier {
        Modifier::None => {
            check_set(expander.frame, &value, param, location)?;
            Ok(into_phrase(expander.frame, value, quoted))
        }
        Modifier::Length => {
            check_set(expander.frame, &value, param, location)?;
            let length = match &value {
                Value::Unset => 0,
                Value::Scalar(value) => value.chars().count(),
                Value::All(values, _) => values.len(),
            };
            Ok(Phrase::field(attr::soft_chars(&length.to_string(), quoted)))
        }
        Modifier::Switch(switch) => {
            expand_switch(expander, switch, value, param, quoted, location)
        }
        Modifier::Trim(trim) => {
            check_set(expander.frame, &value, param, location)?;
            expand_trim(expander, trim, value, quoted)
        }
    }
}

/// Resolves a parameter to its raw value.
fn lookup(frame: &Frame, param: &Param) -> Value {
    match &param.kind {
        ParamKind::Variable => match frame.variables.get_scalar(&param.id) {
            Some(value) => Value::Scalar(value.to_string()),
            None => Value::Unset,
        },
        ParamKind::Positional(index) => match frame.positional_params().get(*index) {
            Some(value) => Value::Scalar(value.to_string()),
            None => Value::Unset,
        },
        ParamKind::Special(special) => {
            use SpecialParam::*;
            match special {
                At | Asterisk => {
                    Value::All(frame.positional_params().values.clone(), *special)
                }
                Number => Value::Scalar(frame.positional_params().len().to_string()),
                Question => Value::Scalar(frame.exit_status.to_string()),
                Dollar => Value::Scalar(frame.shell_pid.to_string()),
                Exclamation => Value::Scalar(frame.jobs.last_async_pid().to_string()),
                Zero => Value::Scalar(frame.arg0.clone()),
                Hyphen => Value::Scalar(option::to_flag_string(frame.options)),
            }
        }
    }
}

/// Rejects an unset parameter when the `nounset` option is in effect.
fn check_set(frame: &Frame, value: &Value, param: &Param, location: Location) -> Result<()> {
    if *value == Value::Unset && !frame.options.contains(option::Unset) {
        return Err(Error {
            cause: ErrorCause::UnsetParameter {
                name: param.id.clone(),
            },
            location,
        });
    }
    Ok(())
}

/// Converts a raw value into a phrase, honoring the quoting.
fn into_phrase(frame: &Frame, value: Value, quoted: bool) -> Phrase {
    match value {
        Value::Unset => {
            let mut chars = Vec::new();
            attr::retain_if_quoted(&mut chars, quoted);
            Phrase::field(chars)
        }
        Value::Scalar(value) => {
            let mut chars = attr::soft_chars(&value, quoted);
            attr::retain_if_quoted(&mut chars, quoted);
            Phrase::field(chars)
        }
        Value::All(values, special) => {
            if quoted && special == SpecialParam::At {
                // One field per positional parameter, kept even when empty.
                Phrase::fields(
                    values
                        .iter()
                        .map(|value| {
                            let mut chars = attr::soft_chars(value, true);
                            attr::retain_if_quoted(&mut chars, true);
                            chars
                        })
                        .collect(),
                )
            } else if quoted {
                // A quoted `$*` joins with the first IFS character.
                let ifs = frame
                    .variables
                    .get_scalar("IFS")
                    .map_or_else(Ifs::default, Ifs::new);
                let joiner: String = ifs.joiner().into_iter().collect();
                let mut chars = attr::soft_chars(&values.join(&joiner), true);
                attr::retain_if_quoted(&mut chars, true);
                Phrase::field(chars)
            } else {
                // Unquoted, both forms produce soft fields that undergo
                // further splitting; empty parameters vanish there.
                Phrase::fields(
                    values
                        .iter()
                        .map(|value| attr::soft_chars(value, false))
                        .collect(),
                )
            }
        }
    }
}

/// Expands the substitute word of a switch.
///
/// Inside a quoted parameter expansion, the word's output inherits the
/// quoting and is not field split.
fn expand_substitute(
    expander: &mut Expander,
    switch: &Switch,
    quoted: bool,
) -> Result<Phrase> {
    let phrase = expander.expand_parts(&switch.word)?;
    Ok(if quoted { phrase.into_quoted() } else { phrase })
}

/// Whether a switch fires for the given value.
fn is_vacant(condition: SwitchCondition, value: &Value) -> bool {
    match value {
        Value::Unset => true,
        Value::Scalar(value) => {
            condition == SwitchCondition::UnsetOrEmpty && value.is_empty()
        }
        Value::All(values, _) => {
            condition == SwitchCondition::UnsetOrEmpty && values.is_empty()
        }
    }
}

fn expand_switch(
    expander: &mut Expander,
    switch: &Switch,
    value: Value,
    param: &Param,
    quoted: bool,
    location: Location,
) -> Result<Phrase> {
    let vacant = is_vacant(switch.condition, &value);
    match switch.kind {
        SwitchKind::Alter => {
            if vacant {
                let mut chars = Vec::new();
                attr::retain_if_quoted(&mut chars, quoted);
                Ok(Phrase::field(chars))
            } else {
                expand_substitute(expander, switch, quoted)
            }
        }
        SwitchKind::Default => {
            if vacant {
                expand_substitute(expander, switch, quoted)
            } else {
                Ok(into_phrase(expander.frame, value, quoted))
            }
        }
        SwitchKind::Assign => {
            if vacant {
                if param.kind != ParamKind::Variable {
                    return Err(Error {
                        cause: ErrorCause::NonassignableParameter {
                            name: param.id.clone(),
                        },
                        location,
                    });
                }
                let substitute = expander.expand_word_single(&switch.word)?.value;
                expander
                    .frame
                    .assign_variable(
                        Scope::Global,
                        &param.id,
                        substitute.clone(),
                        Some(location),
                    )
                    .map_err(|e| Error {
                        cause: ErrorCause::AssignReadOnly(e),
                        location,
                    })?;
                Ok(into_phrase(
                    expander.frame,
                    Value::Scalar(substitute),
                    quoted,
                ))
            } else {
                Ok(into_phrase(expander.frame, value, quoted))
            }
        }
        SwitchKind::Error => {
            if vacant {
                let message = expander.expand_word_single(&switch.word)?.value;
                let message = if message.is_empty() {
                    match value {
                        Value::Unset => "parameter not set".to_string(),
                        _ => "parameter is null".to_string(),
                    }
                } else {
                    message
                };
                Err(Error {
                    cause: ErrorCause::VacantParameter {
                        name: param.id.clone(),
                        message,
                    },
                    location,
                })
            } else {
                Ok(into_phrase(expander.frame, value, quoted))
            }
        }
    }
}

/// Builds the fnmatch pattern text for a trim pattern word.
///
/// Quoted characters are backslash-escaped so they match literally.
fn pattern_text(expander: &mut Expander, word: &zash_syntax::syntax::Word) -> Result<String> {
    let phrase = expander.expand_parts(word)?;
    let mut text = String::new();
    for field in phrase.into_fields() {
        for c in field {
            if c.is_quoting {
                continue;
            }
            if c.is_quoted {
                text.push('\\');
            }
            text.push(c.value);
        }
    }
    Ok(text)
}

fn expand_trim(
    expander: &mut Expander,
    trim: &Trim,
    value: Value,
    quoted: bool,
) -> Result<Phrase> {
    let text = pattern_text(expander, &trim.pattern)?;
    let pattern = Pattern::parse(with_escape(&text)).ok();

    let apply = |value: &str| match &pattern {
        Some(pattern) => apply_trim(value, pattern, trim.side, trim.length),
        None => value.to_string(),
    };

    let trimmed = match value {
        Value::Unset => Value::Unset,
        Value::Scalar(value) => Value::Scalar(apply(&value)),
        Value::All(values, special) => {
            Value::All(values.iter().map(|v| apply(v)).collect(), special)
        }
    };
    Ok(into_phrase(expander.frame, trimmed, quoted))
}

/// Removes the shortest or longest match of the pattern from one side of the
/// value.
fn apply_trim(value: &str, pattern: &Pattern, side: TrimSide, length: TrimLength) -> String {
    // Candidate boundaries are character boundaries, searched in the order
    // that makes the first match the wanted one.
    let boundaries: Vec<usize> = value
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(value.len()))
        .collect();

    let candidates: Box<dyn Iterator<Item = usize>> = match length {
        TrimLength::Shortest => Box::new(boundaries.iter().copied()),
        TrimLength::Longest => Box::new(boundaries.iter().rev().copied()),
    };

    match side {
        TrimSide::Prefix => {
            for boundary in candidates {
                if pattern.is_match(&value[..boundary]) {
                    return value[boundary..].to_string();
                }
            }
        }
        TrimSide::Suffix => {
            // For a suffix, the shortest match starts nearest the end.
            let candidates: Box<dyn Iterator<Item = usize>> = match length {
                TrimLength::Shortest => Box::new(boundaries.iter().rev().copied()),
                TrimLength::Longest => Box::new(boundaries.iter().copied()),
            };
            for boundary in candidates {
                if pattern.is_match(&value[boundary..]) {
                    return value[..boundary].to_string();
                }
            }
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::super::tests::{word, StubEvaluator};
    use super::super::Expander;
    use super::*;
    use assert_matches::assert_matches;
    use zash_env::semantics::ExitStatus;

    fn fixture() -> (Frame, StubEvaluator) {
        (Frame::new_virtual(), StubEvaluator::default())
    }

    fn expand_str(frame: &mut Frame, source: &str) -> Vec<String> {
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(frame, &mut evaluator);
        expander
            .expand_word(&word(source))
            .unwrap()
            .into_iter()
            .map(|f| f.value)
            .collect()
    }

    #[test]
    fn special_parameters() {
        let (mut frame, _) = fixture();
        frame.exit_status = ExitStatus(42);
        frame.shell_pid = 1234;
        frame.jobs.set_last_async_pid(77);
        frame.arg0 = "zash".to_string();
        frame.positional_params_mut().set_values(["a", "b", "c"]);

        assert_eq!(expand_str(&mut frame, "$?"), ["42"]);
        assert_eq!(expand_str(&mut frame, "$$"), ["1234"]);
        assert_eq!(expand_str(&mut frame, "$!"), ["77"]);
        assert_eq!(expand_str(&mut frame, "$0"), ["zash"]);
        assert_eq!(expand_str(&mut frame, "$#"), ["3"]);
        assert_eq!(expand_str(&mut frame, "$1"), ["a"]);
        assert_eq!(expand_str(&mut frame, "${3}"), ["c"]);
    }

    #[test]
    fn quoted_at_yields_one_field_per_parameter() {
        let (mut frame, _) = fixture();
        frame
            .positional_params_mut()
            .set_values(["one two", "three"]);
        // Even with an exotic IFS, "$@" fields stay intact.
        frame
            .assign_variable(Scope::Global, "IFS", "o".to_string(), None)
            .unwrap();
        assert_eq!(expand_str(&mut frame, "\"$@\""), ["one two", "three"]);
    }

    #[test]
    fn quoted_star_joins_with_first_ifs_character() {
        let (mut frame, _) = fixture();
        frame
            .positional_params_mut()
            .set_values(["one two", "three"]);
        assert_eq!(expand_str(&mut frame, "\"$*\""), ["one two three"]);

        frame
            .assign_variable(Scope::Global, "IFS", ":x".to_string(), None)
            .unwrap();
        assert_eq!(expand_str(&mut frame, "\"$*\""), ["one two:three"]);
    }

    #[test]
    fn unquoted_at_and_star_are_split() {
        let (mut frame, _) = fixture();
        frame
            .positional_params_mut()
            .set_values(["one two", "three"]);
        assert_eq!(expand_str(&mut frame, "$@"), ["one", "two", "three"]);
        assert_eq!(expand_str(&mut frame, "$*"), ["one", "two", "three"]);
    }

    #[test]
    fn quoted_at_with_no_parameters_produces_no_fields() {
        let (mut frame, _) = fixture();
        assert_eq!(expand_str(&mut frame, "\"$@\""), [] as [&str; 0]);
    }

    #[test]
    fn switch_default() {
        let (mut frame, _) = fixture();
        assert_eq!(expand_str(&mut frame, "${x:-fallback}"), ["fallback"]);

        frame
            .assign_variable(Scope::Global, "x", String::new(), None)
            .unwrap();
        assert_eq!(expand_str(&mut frame, "${x:-fallback}"), ["fallback"]);
        assert_eq!(expand_str(&mut frame, "${x-fallback}"), [] as [&str; 0]);

        frame
            .assign_variable(Scope::Global, "x", "value".to_string(), None)
            .unwrap();
        assert_eq!(expand_str(&mut frame, "${x:-fallback}"), ["value"]);
    }

    #[test]
    fn switch_alter() {
        let (mut frame, _) = fixture();
        assert_eq!(expand_str(&mut frame, "${x:+alt}"), [] as [&str; 0]);
        frame
            .assign_variable(Scope::Global, "x", "value".to_string(), None)
            .unwrap();
        assert_eq!(expand_str(&mut frame, "${x:+alt}"), ["alt"]);
    }

    #[test]
    fn quoted_switch_word_inherits_quoting() {
        let (mut frame, _) = fixture();
        frame
            .assign_variable(Scope::Global, "y", "a b".to_string(), None)
            .unwrap();
        assert_eq!(expand_str(&mut frame, "\"${x:-$y}\""), ["a b"]);
        assert_eq!(expand_str(&mut frame, "${x:-$y}"), ["a", "b"]);
        assert_eq!(expand_str(&mut frame, "\"${x:-}\""), [""]);
    }

    #[test]
    fn switch_assign_sets_the_variable() {
        let (mut frame, _) = fixture();
        assert_eq!(expand_str(&mut frame, "${x:=assigned}"), ["assigned"]);
        assert_eq!(
            frame.variables.get_scalar("x"),
            Some("assigned")
        );
    }

    #[test]
    fn switch_assign_rejects_positional_parameters() {
        let (mut frame, mut evaluator) = fixture();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let error = expander.expand_word(&word("${1:=x}")).unwrap_err();
        assert_matches!(error.cause, ErrorCause::NonassignableParameter { name } => {
            assert_eq!(name, "1");
        });
    }

    #[test]
    fn switch_error_reports_message() {
        let (mut frame, mut evaluator) = fixture();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let error = expander
            .expand_word(&word("${x:?custom message}"))
            .unwrap_err();
        assert_matches!(error.cause, ErrorCause::VacantParameter { name, message } => {
            assert_eq!(name, "x");
            assert_eq!(message, "custom message");
        });

        let error = expander.expand_word(&word("${x?}")).unwrap_err();
        assert_matches!(error.cause, ErrorCause::VacantParameter { message, .. } => {
            assert_eq!(message, "parameter not set");
        });
    }

    #[test]
    fn length_modifier() {
        let (mut frame, _) = fixture();
        frame
            .assign_variable(Scope::Global, "x", "hello".to_string(), None)
            .unwrap();
        frame.positional_params_mut().set_values(["a", "b"]);
        assert_eq!(expand_str(&mut frame, "${#x}"), ["5"]);
        assert_eq!(expand_str(&mut frame, "${#@}"), ["2"]);
        assert_eq!(expand_str(&mut frame, "${#unset}"), ["0"]);
    }

    #[test]
    fn trim_prefix_and_suffix() {
        let (mut frame, _) = fixture();
        frame
            .assign_variable(Scope::Global, "path", "/usr/local/bin".to_string(), None)
            .unwrap();
        assert_eq!(expand_str(&mut frame, "${path#*/}"), ["usr/local/bin"]);
        assert_eq!(expand_str(&mut frame, "${path##*/}"), ["bin"]);
        assert_eq!(
            expand_str(&mut frame, "${path%/*}"),
            ["/usr/local"]
        );
        assert_eq!(expand_str(&mut frame, "${path%%/*}"), [] as [&str; 0]);

        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let field = expander
            .expand_word_single(&word("\"${path%%/*}\""))
            .unwrap();
        assert_eq!(field.value, "");
    }

    #[test]
    fn trim_pattern_respects_quoting() {
        let (mut frame, _) = fixture();
        frame
            .assign_variable(Scope::Global, "x", "a*b".to_string(), None)
            .unwrap();
        // A quoted `*` in the pattern is literal.
        assert_eq!(expand_str(&mut frame, "${x#a'*'}"), ["b"]);
        // An unquoted `*` matches anything.
        assert_eq!(expand_str(&mut frame, "${x#a*}"), [] as [&str; 0]);
    }

    #[test]
    fn nounset_rejects_unset_parameters() {
        let (mut frame, mut evaluator) = fixture();
        frame.options.remove(option::Unset);
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let error = expander.expand_word(&word("$nowhere")).unwrap_err();
        assert_matches!(error.cause, ErrorCause::UnsetParameter { name } => {
            assert_eq!(name, "nowhere");
        });

        // A switch that handles the unset case is not an error.
        let fields = expander.expand_word(&word("${nowhere-ok}")).unwrap();
        assert_eq!(fields[0].value, "ok");
    }

    #[test]
    fn option_flags_parameter() {
        let (mut frame, _) = fixture();
        frame.options.insert(option::ErrExit);
        let flags = expand_str(&mut frame, "$-");
        assert!(flags[0].contains('e'));
    }
}
