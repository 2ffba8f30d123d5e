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

//! Word expansion
//!
//! The [`Expander`] turns parsed words into fields in four steps:
//!
//! 1. **Initial expansion** walks the parts of the word and produces a
//!    [phrase](phrase::Phrase) of [attributed characters](attr::AttrChar).
//!    Tilde prefixes, parameters, command substitutions and arithmetic
//!    expansions are resolved here; each produced character records its
//!    origin and quoting, which the later steps consult.
//! 2. **Field splitting** separates the characters that came from unquoted
//!    expansions at the separators named by `IFS`.
//! 3. **Pathname expansion** matches fields containing unquoted `*`, `?` or
//!    `[` against the filesystem, unless the `glob` option is off.
//! 4. **Quote removal** drops the quoting-only characters.
//!
//! Command substitution and arithmetic evaluation are capabilities the
//! expander invokes through the [`Evaluator`] trait, not behavior it
//! implements: the embedding interpreter runs the command and evaluates the
//! expression.

pub mod attr;
mod arith;
mod command_subst;
pub mod glob;
mod param;
mod phrase;
pub mod split;
mod quote_removal;
mod tilde;

use self::attr::{AttrChar, Origin};
use self::phrase::Phrase;
use self::split::Ifs;
use enumset::{enum_set, EnumSet, EnumSetType};
use thiserror::Error as ThisError;
use zash_env::semantics::{ExitStatus, Field};
use zash_env::variable::AssignError;
use zash_env::Frame;
use zash_syntax::ast::AstNode;
use zash_syntax::parser::lex;
use zash_syntax::source::Location;
use zash_syntax::syntax::{PartUnit, Word, WordPart};

/// Types of errors that may happen in word expansion
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[non_exhaustive]
pub enum ErrorCause {
    /// Expansion of an unset parameter with the `nounset` option in effect
    #[error("parameter `{name}` is not set")]
    UnsetParameter {
        /// Name of the parameter
        name: String,
    },

    /// Expansion of an unset or empty parameter with the `?` switch
    #[error("{name}: {message}")]
    VacantParameter {
        /// Name of the parameter
        name: String,
        /// Message from the switch word, or a default
        message: String,
    },

    /// A `=` switch on a parameter that is not a variable
    #[error("parameter `{name}` cannot be assigned")]
    NonassignableParameter {
        /// Name of the parameter
        name: String,
    },

    /// Assignment failed because the variable is read-only.
    #[error(transparent)]
    AssignReadOnly(#[from] AssignError),

    /// The command in a command substitution could not be parsed.
    #[error("cannot parse the command substitution: {0}")]
    BrokenCommandSubstitution(String),

    /// The command-running capability reported a failure.
    #[error("cannot perform the command substitution: {0}")]
    CommandSubstFailed(String),

    /// The arithmetic evaluator reported a failure.
    #[error("arithmetic evaluation failed: {0}")]
    ArithFailed(String),
}

/// Expansion error with the location of the originating word
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{cause} (at {location})")]
pub struct Error {
    /// Type of the error
    pub cause: ErrorCause,
    /// Location of the word being expanded
    pub location: Location,
}

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Capabilities the expander requires from the interpreter
///
/// Command substitution and arithmetic expansion cannot be performed by the
/// expander alone: one runs a command and captures its output, the other
/// evaluates an arithmetic expression. Both are provided by the embedding
/// interpreter through this trait. The methods receive the frame so that a
/// nested interpretation cycle runs against the same environment.
pub trait Evaluator {
    /// Runs a command and captures its standard output.
    fn run_command_capture_stdout(
        &mut self,
        frame: &mut Frame,
        command: &AstNode,
    ) -> std::result::Result<(String, ExitStatus), String>;

    /// Evaluates an arithmetic expression to an integer.
    fn eval_arithmetic(
        &mut self,
        frame: &mut Frame,
        expression: &str,
    ) -> std::result::Result<i64, String>;
}

/// Evaluator that rejects command substitution and arithmetic expansion
///
/// Useful where words are known not to contain substitutions, or where
/// performing them would be wrong (such as expanding a prompt in a
/// restricted context).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvaluator;

impl Evaluator for NoEvaluator {
    fn run_command_capture_stdout(
        &mut self,
        _frame: &mut Frame,
        _command: &AstNode,
    ) -> std::result::Result<(String, ExitStatus), String> {
        Err("command substitution is not supported here".to_string())
    }

    fn eval_arithmetic(
        &mut self,
        _frame: &mut Frame,
        _expression: &str,
    ) -> std::result::Result<i64, String> {
        Err("arithmetic expansion is not supported here".to_string())
    }
}

/// Kinds of processing [`Expander::expand_text`] can apply
#[derive(Clone, Copy, Debug, EnumSetType, Eq, Hash, PartialEq)]
#[enumset(no_super_impls)]
pub enum ExpansionFlag {
    /// Tilde expansion
    Tilde,
    /// Parameter expansion
    Parameter,
    /// Command substitution
    CommandSubst,
    /// Arithmetic expansion
    Arithmetic,
    /// Field splitting (never set by the presets; a text expansion returns
    /// one string)
    FieldSplit,
    /// Pathname expansion (never set by the presets)
    Pathname,
}

/// Preset for assignment values and redirection targets: everything except
/// field splitting and pathname expansion.
pub const NO_SPLIT_GLOB: EnumSet<ExpansionFlag> = enum_set!(
    ExpansionFlag::Tilde
        | ExpansionFlag::Parameter
        | ExpansionFlag::CommandSubst
        | ExpansionFlag::Arithmetic
);

/// Preset for here-document bodies and trap actions: parameter, command and
/// arithmetic expansion only.
pub const HEREDOC: EnumSet<ExpansionFlag> = enum_set!(
    ExpansionFlag::Parameter | ExpansionFlag::CommandSubst | ExpansionFlag::Arithmetic
);

/// Word expander
///
/// An expander borrows the [frame](Frame) it reads and writes and the
/// [evaluator](Evaluator) it delegates substitutions to.
pub struct Expander<'a> {
    /// Environment the expansion runs against
    pub frame: &'a mut Frame,
    /// Capability provider for substitutions
    pub evaluator: &'a mut dyn Evaluator,
}

impl<'a> Expander<'a> {
    /// Creates an expander.
    pub fn new(frame: &'a mut Frame, evaluator: &'a mut dyn Evaluator) -> Expander<'a> {
        Expander { frame, evaluator }
    }

    /// Expands a command word to fields.
    ///
    /// This is the full pipeline: initial expansions, field splitting on the
    /// output of unquoted expansions, pathname expansion on each field, and
    /// quote removal.
    pub fn expand_word(&mut self, word: &Word) -> Result<Vec<Field>> {
        let phrase = self.expand_parts(word)?;

        let ifs = self
            .frame
            .variables
            .get_scalar("IFS")
            .map_or_else(|| Ifs::DEFAULT.to_string(), ToOwned::to_owned);
        let ifs = Ifs::new(&ifs);

        let glob_enabled = self.frame.options.contains(zash_env::option::Glob);
        let mut fields = Vec::new();
        for field in phrase.into_fields() {
            for piece in split::split(field, &ifs) {
                fields.extend(glob::glob(
                    &*self.frame.system,
                    piece,
                    glob_enabled,
                    word.location,
                ));
            }
        }
        Ok(fields)
    }

    /// Expands a slice of command words to fields.
    pub fn expand_words(&mut self, words: &[Word]) -> Result<Vec<Field>> {
        let mut fields = Vec::new();
        for word in words {
            fields.extend(self.expand_word(word)?);
        }
        Ok(fields)
    }

    /// Expands a word to a single field, with no field splitting or
    /// pathname expansion.
    ///
    /// This applies to assignment values, redirection targets, and `case`
    /// subjects. A multi-field expansion (`"$@"`) is joined with spaces.
    pub fn expand_word_single(&mut self, word: &Word) -> Result<Field> {
        let phrase = self.expand_parts(word)?;
        let mut joined: Vec<AttrChar> = Vec::new();
        for (i, field) in phrase.into_fields().into_iter().enumerate() {
            if i > 0 {
                joined.push(AttrChar {
                    value: ' ',
                    origin: Origin::SoftExpansion,
                    is_quoted: true,
                    is_quoting: false,
                });
            }
            joined.extend(field);
        }
        Ok(Field {
            value: quote_removal::strip(&joined),
            origin: word.location,
        })
    }

    /// Applies a subset of expansions to a string.
    ///
    /// The string is parsed the way here-document bodies are parsed and the
    /// expansions named by `flags` are applied; the presets
    /// [`NO_SPLIT_GLOB`] and [`HEREDOC`] cover the two callers in the shell.
    /// The result is a single string: the splitting and globbing flags are
    /// accepted for completeness but a text expansion never produces
    /// multiple fields.
    pub fn expand_text(
        &mut self,
        text: &str,
        flags: EnumSet<ExpansionFlag>,
    ) -> Result<String> {
        let location = Location::dummy();
        let mut result = String::new();

        // Text is scanned without tilde recognition, so a leading tilde
        // prefix is peeled off here when tilde expansion is requested.
        let mut text = text;
        if flags.contains(ExpansionFlag::Tilde) {
            if let Some(rest) = text.strip_prefix('~') {
                let end = rest.find('/').unwrap_or(rest.len());
                let name = &rest[..end];
                if !name.contains(['\\', '$', '`']) {
                    let chars = tilde::expand(name, self.frame);
                    result.extend(chars.iter().filter(|c| !c.is_quoting).map(|c| c.value));
                    text = &rest[end..];
                }
            }
        }

        let parts = lex::parse_text(text).map_err(|e| Error {
            cause: ErrorCause::BrokenCommandSubstitution(e.to_string()),
            location,
        })?;
        for part in &parts {
            match &part.unit {
                PartUnit::Literal(value) => result.push_str(value),
                PartUnit::Tilde(name) => {
                    if flags.contains(ExpansionFlag::Tilde) {
                        let chars = tilde::expand(name, self.frame);
                        result.extend(chars.iter().filter(|c| !c.is_quoting).map(|c| c.value));
                    } else {
                        result.push('~');
                        result.push_str(name);
                    }
                }
                PartUnit::Param(param) => {
                    if flags.contains(ExpansionFlag::Parameter) {
                        let phrase = param::expand(self, param, true, location)?;
                        result.push_str(&strip_phrase(phrase));
                    } else {
                        result.push_str(&part.to_string());
                    }
                }
                PartUnit::CommandSubst { tokens, .. } => {
                    if flags.contains(ExpansionFlag::CommandSubst) {
                        let output =
                            command_subst::capture(self, tokens, location)?;
                        result.push_str(&output);
                    } else {
                        result.push_str(&part.to_string());
                    }
                }
                PartUnit::Arith { content, .. } => {
                    if flags.contains(ExpansionFlag::Arithmetic) {
                        let value = arith::expand(self, content, location)?;
                        result.push_str(&value);
                    } else {
                        result.push_str(&part.to_string());
                    }
                }
            }
        }
        Ok(result)
    }

    /// Performs the initial expansion of every part of a word.
    pub(crate) fn expand_parts(&mut self, word: &Word) -> Result<Phrase> {
        let mut phrase = Phrase::one_empty_field();
        for part in &word.parts {
            let next = self.expand_part(part, word.location)?;
            phrase.append(next);
        }
        Ok(phrase)
    }

    /// Performs the initial expansion of one part.
    fn expand_part(&mut self, part: &WordPart, location: Location) -> Result<Phrase> {
        let quoted = part.is_quoted();
        match &part.unit {
            PartUnit::Literal(value) => {
                let mut chars: Vec<AttrChar> = value
                    .chars()
                    .map(|c| AttrChar {
                        value: c,
                        origin: Origin::Literal,
                        is_quoted: quoted,
                        is_quoting: false,
                    })
                    .collect();
                attr::retain_if_quoted(&mut chars, quoted);
                Ok(Phrase::field(chars))
            }
            PartUnit::Tilde(name) => Ok(Phrase::field(tilde::expand(name, self.frame))),
            PartUnit::Param(param) => param::expand(self, param, quoted, location),
            PartUnit::CommandSubst { tokens, .. } => {
                let output = command_subst::capture(self, tokens, location)?;
                let mut chars = attr::soft_chars(&output, quoted);
                attr::retain_if_quoted(&mut chars, quoted);
                Ok(Phrase::field(chars))
            }
            PartUnit::Arith { content, .. } => {
                let value = arith::expand(self, content, location)?;
                Ok(Phrase::field(attr::soft_chars(&value, quoted)))
            }
        }
    }
}

/// Joins a phrase into one string with quote removal applied.
fn strip_phrase(phrase: Phrase) -> String {
    let fields = phrase.into_fields();
    itertools::Itertools::intersperse(
        fields.iter().map(|field| quote_removal::strip(field)),
        " ".to_string(),
    )
    .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::str::FromStr;
    use zash_env::variable::Scope;

    /// Evaluator stub with a fixed command output and arithmetic results
    /// computed by a trivial adder.
    #[derive(Clone, Debug, Default)]
    pub(crate) struct StubEvaluator {
        pub command_output: String,
        pub command_status: ExitStatus,
        pub commands_run: Vec<String>,
    }

    impl Evaluator for StubEvaluator {
        fn run_command_capture_stdout(
            &mut self,
            _frame: &mut Frame,
            command: &AstNode,
        ) -> std::result::Result<(String, ExitStatus), String> {
            self.commands_run.push(command.to_string());
            Ok((self.command_output.clone(), self.command_status))
        }

        fn eval_arithmetic(
            &mut self,
            _frame: &mut Frame,
            expression: &str,
        ) -> std::result::Result<i64, String> {
            // Supports the `a+b` form, which is all the tests need.
            expression
                .split('+')
                .map(|term| term.trim().parse::<i64>().map_err(|e| e.to_string()))
                .sum()
        }
    }

    /// Parses a word from source text, for tests.
    pub(crate) fn word(source: &str) -> Word {
        use zash_syntax::syntax::TokenId;
        let tokens = lex::Lexer::tokenize_all(source).expect("test word must lex");
        let token = tokens.into_iter().next().expect("test word must exist");
        assert_eq!(token.id, TokenId::Word);
        token.word
    }

    fn values(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|f| f.value.as_str()).collect()
    }

    #[test]
    fn literal_word_expands_to_itself() {
        let mut frame = Frame::new_virtual();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let fields = expander.expand_word(&word("hello")).unwrap();
        assert_eq!(values(&fields), ["hello"]);
    }

    #[test]
    fn scenario_echo_hello() {
        let mut frame = Frame::new_virtual();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let words = [word("echo"), word("hello")];
        let fields = expander.expand_words(&words).unwrap();
        assert_eq!(values(&fields), ["echo", "hello"]);
    }

    #[test]
    fn unquoted_parameter_is_field_split() {
        let mut frame = Frame::new_virtual();
        frame
            .assign_variable(Scope::Global, "x", "a b  c".to_string(), None)
            .unwrap();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let fields = expander.expand_word(&word("$x")).unwrap();
        assert_eq!(values(&fields), ["a", "b", "c"]);
    }

    #[test]
    fn quoted_parameter_is_not_split() {
        let mut frame = Frame::new_virtual();
        frame
            .assign_variable(Scope::Global, "x", "a b".to_string(), None)
            .unwrap();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let fields = expander.expand_word(&word("\"$x\"")).unwrap();
        assert_eq!(values(&fields), ["a b"]);
    }

    #[test]
    fn literal_text_is_immune_to_splitting() {
        let mut frame = Frame::new_virtual();
        frame
            .assign_variable(Scope::Global, "IFS", "a".to_string(), None)
            .unwrap();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        // The literal `a` characters are not separators; only expansion
        // output is subject to splitting.
        let fields = expander.expand_word(&word("banana")).unwrap();
        assert_eq!(values(&fields), ["banana"]);
    }

    #[test]
    fn unquoted_empty_expansion_produces_no_field() {
        let mut frame = Frame::new_virtual();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let fields = expander.expand_word(&word("$unset_variable")).unwrap();
        assert_eq!(values(&fields), [] as [&str; 0]);
    }

    #[test]
    fn quoted_empty_expansion_produces_one_empty_field() {
        let mut frame = Frame::new_virtual();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let fields = expander.expand_word(&word("\"$unset_variable\"")).unwrap();
        assert_eq!(values(&fields), [""]);

        let fields = expander.expand_word(&word("''")).unwrap();
        assert_eq!(values(&fields), [""]);
    }

    #[test]
    fn command_substitution_output_is_split() {
        let mut frame = Frame::new_virtual();
        let mut evaluator = StubEvaluator {
            command_output: "one two\n".to_string(),
            ..StubEvaluator::default()
        };
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let fields = expander.expand_word(&word("$(list)")).unwrap();
        assert_eq!(values(&fields), ["one", "two"]);
        assert_eq!(evaluator.commands_run, ["list"]);
    }

    #[test]
    fn command_substitution_strips_trailing_newlines() {
        let mut frame = Frame::new_virtual();
        let mut evaluator = StubEvaluator {
            command_output: "out\n\n\n".to_string(),
            ..StubEvaluator::default()
        };
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let fields = expander.expand_word(&word("\"$(cmd)\"")).unwrap();
        assert_eq!(values(&fields), ["out"]);
    }

    #[test]
    fn arithmetic_expansion_yields_decimal() {
        let mut frame = Frame::new_virtual();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let fields = expander.expand_word(&word("$((1+2))")).unwrap();
        assert_eq!(values(&fields), ["3"]);
    }

    #[test]
    fn arithmetic_content_undergoes_parameter_expansion() {
        let mut frame = Frame::new_virtual();
        frame
            .assign_variable(Scope::Global, "n", "40".to_string(), None)
            .unwrap();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let fields = expander.expand_word(&word("$(($n+2))")).unwrap();
        assert_eq!(values(&fields), ["42"]);
    }

    #[test]
    fn expand_word_single_joins_fields() {
        let mut frame = Frame::new_virtual();
        frame.positional_params_mut().set_values(["a", "b"]);
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let field = expander.expand_word_single(&word("\"$@\"")).unwrap();
        assert_eq!(field.value, "a b");
    }

    #[test]
    fn expand_text_heredoc_preset() {
        let mut frame = Frame::new_virtual();
        frame
            .assign_variable(Scope::Global, "x", "value".to_string(), None)
            .unwrap();
        let mut evaluator = StubEvaluator {
            command_output: "output".to_string(),
            ..StubEvaluator::default()
        };
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let result = expander
            .expand_text("x=$x sub=$(cmd) sum=$((1+1)) tilde=~\n", HEREDOC)
            .unwrap();
        assert_eq!(result, "x=value sub=output sum=2 tilde=~\n");
    }

    #[test]
    fn expand_text_no_split_glob_preset_expands_tilde() {
        let mut frame = Frame::new_virtual();
        frame
            .assign_variable(Scope::Global, "HOME", "/home/u".to_string(), None)
            .unwrap();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let result = expander.expand_text("~/bin", NO_SPLIT_GLOB).unwrap();
        assert_eq!(result, "/home/u/bin");
    }

    #[test]
    fn scenario_for_loop_body_iteration() {
        // `for x in a b c; do echo $x; done`: expanding the body words on
        // the second iteration yields `echo b`.
        let mut frame = Frame::new_virtual();
        frame
            .assign_variable(Scope::Global, "x", "b".to_string(), None)
            .unwrap();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let words = [word("echo"), word("$x")];
        let fields = expander.expand_words(&words).unwrap();
        assert_eq!(values(&fields), ["echo", "b"]);
    }

    #[test]
    fn expansion_concatenation_matches_unsplit_expansion() {
        // With IFS set to a space, joining the split fields of an unquoted
        // word with single spaces reproduces the unsplit expansion.
        let mut frame = Frame::new_virtual();
        frame
            .assign_variable(Scope::Global, "IFS", " ".to_string(), None)
            .unwrap();
        frame
            .assign_variable(Scope::Global, "x", "one two three".to_string(), None)
            .unwrap();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);

        let split = expander.expand_word(&word("$x")).unwrap();
        let joined = split
            .iter()
            .map(|f| f.value.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let unsplit = expander.expand_word_single(&word("$x")).unwrap();
        assert_eq!(joined, unsplit.value);
    }
}
