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

//! Command substitution semantics
//!
//! The lexer captured the substitution content as a token list. Expanding it
//! parses and lowers that list into an execution AST, hands the AST to the
//! [evaluator](super::Evaluator) to run with its standard output captured,
//! and strips all trailing newlines from the captured output. The exit
//! status of the substituted command becomes the frame's last exit status.

use super::{Error, ErrorCause, Expander, Result};
use zash_syntax::lower;
use zash_syntax::parser::{Parse, Parser};
use zash_syntax::source::Location;
use zash_syntax::syntax::{Token, TokenId, Word};

/// Runs a captured command and returns its output with trailing newlines
/// removed.
pub(super) fn capture(
    expander: &mut Expander,
    tokens: &[Token],
    location: Location,
) -> Result<String> {
    // The nested token list has no end-of-input token; the parser needs one
    // to tell completion from suspension.
    let mut tokens = tokens.to_vec();
    tokens.push(Token::new(TokenId::EndOfInput, Word::empty(location)));

    let ast = match Parser::new(tokens).parse_program() {
        Ok(Parse::Complete(program)) => lower::lower(&program),
        Ok(Parse::Empty) => return Ok(String::new()),
        Ok(Parse::Incomplete) => {
            unreachable!("a token list ending in end-of-input cannot be incomplete")
        }
        Err(error) => {
            return Err(Error {
                cause: ErrorCause::BrokenCommandSubstitution(error.to_string()),
                location,
            })
        }
    };

    let (output, exit_status) = expander
        .evaluator
        .run_command_capture_stdout(expander.frame, &ast)
        .map_err(|message| Error {
            cause: ErrorCause::CommandSubstFailed(message),
            location,
        })?;
    expander.frame.exit_status = exit_status;

    let trimmed = output.trim_end_matches('\n');
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::super::tests::{word, StubEvaluator};
    use super::super::Expander;
    use zash_env::semantics::ExitStatus;
    use zash_env::Frame;

    #[test]
    fn exit_status_of_substitution_becomes_last_exit_status() {
        let mut frame = Frame::new_virtual();
        let mut evaluator = StubEvaluator {
            command_output: "x".to_string(),
            command_status: ExitStatus(3),
            ..StubEvaluator::default()
        };
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        expander.expand_word(&word("$(false)")).unwrap();
        assert_eq!(frame.exit_status, ExitStatus(3));
    }

    #[test]
    fn empty_substitution_runs_nothing() {
        let mut frame = Frame::new_virtual();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        let fields = expander.expand_word(&word("\"$( )\"")).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].value, "");
        assert_eq!(evaluator.commands_run.len(), 0);
    }

    #[test]
    fn nested_interpretation_sees_the_ast() {
        let mut frame = Frame::new_virtual();
        let mut evaluator = StubEvaluator::default();
        let mut expander = Expander::new(&mut frame, &mut evaluator);
        expander
            .expand_word(&word("$(echo a; echo b)"))
            .unwrap();
        assert_eq!(evaluator.commands_run, ["echo a; echo b"]);
    }
}
