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

//! Syntax parser for redirections and here-document pairing
//!
//! The lexer emits here-document bodies as synthetic end-of-here-document
//! tokens after the newline that ended the introducing line. After each
//! simple command or redirection list is assembled, the parser walks it for
//! here-document redirections whose body is still unattached and pairs them,
//! in order, with the next end-of-here-document tokens in the stream.

use super::core::{Parser, Result};
use super::error::SyntaxError;
use crate::grammar::GNode;
use crate::source::Location;
use crate::syntax::Token;
use crate::syntax::TokenId;

impl Parser<'_> {
    /// Tests whether a redirection starts at the current token.
    pub(super) fn at_redirect(&self) -> bool {
        match self.peek_opt() {
            Some(token) => match &token.id {
                TokenId::IoNumber(_) | TokenId::IoLocation(_) => true,
                TokenId::Operator(op) => op.is_redirection(),
                _ => false,
            },
            None => false,
        }
    }

    /// Parses zero or more redirections.
    pub(super) fn redirect_list(&mut self) -> Result<Option<GNode>> {
        let mut redirects = Vec::new();
        while self.at_redirect() {
            redirects.push(self.io_redirect()?);
        }
        Ok(if redirects.is_empty() {
            None
        } else {
            Some(GNode::RedirectList(redirects))
        })
    }

    /// Parses one redirection.
    pub(super) fn io_redirect(&mut self) -> Result<GNode> {
        let mut io_number = None;
        let mut io_location = None;
        match self.peek()?.id.clone() {
            TokenId::IoNumber(n) => {
                io_number = Some(n);
                self.take()?;
            }
            TokenId::IoLocation(name) => {
                io_location = Some(name);
                self.take()?;
            }
            _ => {}
        }

        let operator_location = self.location();
        let op = match &self.peek()?.id {
            TokenId::Operator(op) if op.is_redirection() => *op,
            _ => return self.error(SyntaxError::MissingRedirOperand),
        };
        self.take()?;

        let body = if op.is_here_doc() {
            if self.peek()?.id == TokenId::Word {
                let delimiter = self.take()?;
                GNode::IoHere {
                    operator: op,
                    delimiter,
                    body: None,
                }
            } else {
                return self.error_at(SyntaxError::MissingHereDocDelimiter, operator_location);
            }
        } else if self.peek()?.id == TokenId::Word {
            let target = self.take()?;
            GNode::IoFile {
                operator: op,
                target,
            }
        } else {
            return self.error_at(SyntaxError::MissingRedirOperand, operator_location);
        };

        Ok(GNode::IoRedirect {
            io_number,
            io_location,
            body: Box::new(body),
        })
    }

    /// Pairs the unattached here-document redirections in `node` with the
    /// end-of-here-document tokens ahead in the stream.
    ///
    /// The paired tokens are spliced out of the token list. Running out of
    /// tokens before a body is found makes the parse incomplete; finding the
    /// end of input instead, or a body with a different delimiter, is a
    /// syntax error.
    pub(super) fn pair_here_docs(&mut self, node: &mut GNode) -> Result<()> {
        let mut expected = Vec::new();
        collect_unattached(node, &mut expected);
        if expected.is_empty() {
            return Ok(());
        }

        let mut bodies = std::collections::VecDeque::new();
        for (delimiter, location) in &expected {
            let token = self.take_next_here_doc_body(*location)?;
            let marker = token
                .here_doc
                .as_deref()
                .expect("end-of-here-document token must carry its marker");
            if marker.delimiter != *delimiter {
                return self.error_at(SyntaxError::MissingHereDocContent, *location);
            }
            bodies.push_back(token);
        }
        attach_bodies(node, &mut bodies);
        debug_assert!(bodies.is_empty());
        Ok(())
    }

    /// Removes and returns the next end-of-here-document token ahead in the
    /// stream.
    fn take_next_here_doc_body(&mut self, location: Location) -> Result<Token> {
        let mut index = self.index;
        loop {
            match self.tokens.get(index) {
                None => return Err(super::core::Interrupt::Incomplete),
                Some(token) => match token.id {
                    TokenId::EndOfHereDoc => return Ok(self.tokens.remove(index)),
                    TokenId::EndOfInput => {
                        return self.error_at(SyntaxError::MissingHereDocContent, location)
                    }
                    _ => index += 1,
                },
            }
        }
    }
}

/// Collects the delimiters and locations of unattached here-document
/// redirections, in source order.
fn collect_unattached(node: &GNode, out: &mut Vec<(String, Location)>) {
    use GNode::*;
    match node {
        IoHere {
            delimiter,
            body: None,
            ..
        } => {
            let (text, _quoted) = delimiter.word.unquote();
            out.push((text, delimiter.location()));
        }
        IoHere { .. } | IoFile { .. } | Word(_) | Assignment { .. } | Wordlist(_)
        | PatternList(_) => {}
        IoRedirect { body, .. } => collect_unattached(body, out),
        RedirectList(items) | CmdPrefix(items) | CmdSuffix(items) | Program(items)
        | PipeSequence(items) => {
            for item in items {
                collect_unattached(item, out);
            }
        }
        SimpleCommand { prefix, suffix, .. } => {
            collect_unattached(prefix, out);
            collect_unattached(suffix, out);
        }
        CompoundCommand { command, redirects } => {
            collect_unattached(command, out);
            if let Some(redirects) = redirects {
                collect_unattached(redirects, out);
            }
        }
        FunctionBody { command, redirects } => {
            collect_unattached(command, out);
            if let Some(redirects) = redirects {
                collect_unattached(redirects, out);
            }
        }
        FunctionDefinition { body, .. } => collect_unattached(body, out),
        CompleteCommand { list, .. } => collect_unattached(list, out),
        List { items, .. } => {
            for item in items {
                collect_unattached(item, out);
            }
        }
        AndOr { first, rest } => {
            collect_unattached(first, out);
            for (_, item) in rest {
                collect_unattached(item, out);
            }
        }
        Pipeline { sequence, .. } => collect_unattached(sequence, out),
        Subshell(body) | BraceGroup(body) => collect_unattached(body, out),
        IfClause {
            condition,
            then_body,
            else_part,
        } => {
            collect_unattached(condition, out);
            collect_unattached(then_body, out);
            if let Some(else_part) = else_part {
                collect_unattached(else_part, out);
            }
        }
        ElsePart {
            condition,
            body,
            else_part,
        } => {
            if let Some(condition) = condition {
                collect_unattached(condition, out);
            }
            collect_unattached(body, out);
            if let Some(else_part) = else_part {
                collect_unattached(else_part, out);
            }
        }
        WhileClause { condition, body } | UntilClause { condition, body } => {
            collect_unattached(condition, out);
            collect_unattached(body, out);
        }
        ForClause { words, body, .. } => {
            if let Some(words) = words {
                collect_unattached(words, out);
            }
            collect_unattached(body, out);
        }
        CaseClause { items, .. } => {
            for item in items {
                collect_unattached(item, out);
            }
        }
        CaseItem { patterns, body, .. } => {
            collect_unattached(patterns, out);
            if let Some(body) = body {
                collect_unattached(body, out);
            }
        }
    }
}

/// Attaches bodies to the unattached here-document redirections, in the
/// same order as [`collect_unattached`].
fn attach_bodies(node: &mut GNode, bodies: &mut std::collections::VecDeque<Token>) {
    use GNode::*;
    match node {
        IoHere { body: body @ None, .. } => {
            *body = bodies.pop_front();
        }
        IoHere { .. } | IoFile { .. } | Word(_) | Assignment { .. } | Wordlist(_)
        | PatternList(_) => {}
        IoRedirect { body, .. } => attach_bodies(body, bodies),
        RedirectList(items) | CmdPrefix(items) | CmdSuffix(items) | Program(items)
        | PipeSequence(items) => {
            for item in items {
                attach_bodies(item, bodies);
            }
        }
        SimpleCommand { prefix, suffix, .. } => {
            attach_bodies(prefix, bodies);
            attach_bodies(suffix, bodies);
        }
        CompoundCommand { command, redirects } => {
            attach_bodies(command, bodies);
            if let Some(redirects) = redirects {
                attach_bodies(redirects, bodies);
            }
        }
        FunctionBody { command, redirects } => {
            attach_bodies(command, bodies);
            if let Some(redirects) = redirects {
                attach_bodies(redirects, bodies);
            }
        }
        FunctionDefinition { body, .. } => attach_bodies(body, bodies),
        CompleteCommand { list, .. } => attach_bodies(list, bodies),
        List { items, .. } => {
            for item in items {
                attach_bodies(item, bodies);
            }
        }
        AndOr { first, rest } => {
            attach_bodies(first, bodies);
            for (_, item) in rest {
                attach_bodies(item, bodies);
            }
        }
        Pipeline { sequence, .. } => attach_bodies(sequence, bodies),
        Subshell(body) | BraceGroup(body) => attach_bodies(body, bodies),
        IfClause {
            condition,
            then_body,
            else_part,
        } => {
            attach_bodies(condition, bodies);
            attach_bodies(then_body, bodies);
            if let Some(else_part) = else_part {
                attach_bodies(else_part, bodies);
            }
        }
        ElsePart {
            condition,
            body,
            else_part,
        } => {
            if let Some(condition) = condition {
                attach_bodies(condition, bodies);
            }
            attach_bodies(body, bodies);
            if let Some(else_part) = else_part {
                attach_bodies(else_part, bodies);
            }
        }
        WhileClause { condition, body } | UntilClause { condition, body } => {
            attach_bodies(condition, bodies);
            attach_bodies(body, bodies);
        }
        ForClause { words, body, .. } => {
            if let Some(words) = words {
                attach_bodies(words, bodies);
            }
            attach_bodies(body, bodies);
        }
        CaseClause { items, .. } => {
            for item in items {
                attach_bodies(item, bodies);
            }
        }
        CaseItem { patterns, body, .. } => {
            attach_bodies(patterns, bodies);
            if let Some(body) = body {
                attach_bodies(body, bodies);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::Parse;
    use super::super::lex::{Lexer, Operator};
    use super::super::Parser;
    use super::*;
    use assert_matches::assert_matches;

    fn parse(source: &str) -> std::result::Result<Parse, super::super::Error> {
        let tokens = Lexer::tokenize_all(source).unwrap();
        Parser::new(tokens).parse_program()
    }

    fn find_io_here(node: &GNode) -> Option<&GNode> {
        let mut found = Vec::new();
        collect_io_here(node, &mut found);
        found.into_iter().next()
    }

    fn collect_io_here<'a>(node: &'a GNode, out: &mut Vec<&'a GNode>) {
        if let GNode::IoHere { .. } = node {
            out.push(node);
            return;
        }
        // A shallow manual walk is enough for the tests.
        match node {
            GNode::Program(items)
            | GNode::PipeSequence(items)
            | GNode::RedirectList(items)
            | GNode::CmdPrefix(items)
            | GNode::CmdSuffix(items) => {
                for item in items {
                    collect_io_here(item, out);
                }
            }
            GNode::CompleteCommand { list, .. } => collect_io_here(list, out),
            GNode::List { items, .. } => {
                for item in items {
                    collect_io_here(item, out);
                }
            }
            GNode::AndOr { first, rest } => {
                collect_io_here(first, out);
                for (_, item) in rest {
                    collect_io_here(item, out);
                }
            }
            GNode::Pipeline { sequence, .. } => collect_io_here(sequence, out),
            GNode::SimpleCommand { prefix, suffix, .. } => {
                collect_io_here(prefix, out);
                collect_io_here(suffix, out);
            }
            GNode::IoRedirect { body, .. } => collect_io_here(body, out),
            _ => {}
        }
    }

    #[test]
    fn io_number_attaches_to_redirection() {
        let parse = parse("cat 2>err <in\n").unwrap();
        let program = assert_matches!(parse, Parse::Complete(p) => p);
        let mut found = Vec::new();
        collect_redirects(&program, &mut found);
        assert_eq!(found.len(), 2);
        assert_matches!(found[0], GNode::IoRedirect { io_number: Some(2), .. });
        assert_matches!(found[1], GNode::IoRedirect { io_number: None, .. });
    }

    fn collect_redirects<'a>(node: &'a GNode, out: &mut Vec<&'a GNode>) {
        match node {
            GNode::IoRedirect { .. } => out.push(node),
            GNode::Program(items)
            | GNode::PipeSequence(items)
            | GNode::RedirectList(items)
            | GNode::CmdPrefix(items)
            | GNode::CmdSuffix(items) => {
                for item in items {
                    collect_redirects(item, out);
                }
            }
            GNode::CompleteCommand { list, .. } => collect_redirects(list, out),
            GNode::List { items, .. } => {
                for item in items {
                    collect_redirects(item, out);
                }
            }
            GNode::AndOr { first, .. } => collect_redirects(first, out),
            GNode::Pipeline { sequence, .. } => collect_redirects(sequence, out),
            GNode::SimpleCommand { prefix, suffix, .. } => {
                collect_redirects(prefix, out);
                collect_redirects(suffix, out);
            }
            _ => {}
        }
    }

    #[test]
    fn here_doc_body_is_attached() {
        let parse = parse("cat <<END\nhello\nEND\n").unwrap();
        let program = assert_matches!(parse, Parse::Complete(p) => p);
        let io_here = find_io_here(&program).unwrap();
        assert_matches!(io_here, GNode::IoHere { operator, delimiter, body: Some(token) } => {
            assert_eq!(*operator, Operator::LessLess);
            assert_eq!(delimiter.to_string(), "END");
            let marker = token.here_doc.as_deref().unwrap();
            assert_eq!(marker.body.as_deref(), Some("hello\n"));
            assert!(!marker.quoted);
        });
    }

    #[test]
    fn here_doc_bodies_pair_across_a_pipeline() {
        let parse = parse("cat <<ONE | cat <<TWO\n1\nONE\n2\nTWO\n").unwrap();
        let program = assert_matches!(parse, Parse::Complete(p) => p);
        let mut found = Vec::new();
        collect_io_here(&program, &mut found);
        assert_eq!(found.len(), 2);
        assert_matches!(found[0], GNode::IoHere { body: Some(token), .. } => {
            assert_eq!(token.here_doc.as_deref().unwrap().body.as_deref(), Some("1\n"));
        });
        assert_matches!(found[1], GNode::IoHere { body: Some(token), .. } => {
            assert_eq!(token.here_doc.as_deref().unwrap().body.as_deref(), Some("2\n"));
        });
    }

    #[test]
    fn here_doc_without_body_is_incomplete_until_end_of_input() {
        let mut tokens = Lexer::tokenize_all("cat <<END\n").unwrap();
        // Strip the end-of-input token to model a stream that may continue.
        assert_eq!(tokens.pop().unwrap().id, TokenId::EndOfInput);
        let parse = Parser::new(tokens).parse_program().unwrap();
        assert_eq!(parse, Parse::Incomplete);
    }

    #[test]
    fn here_doc_without_body_is_an_error_at_end_of_input() {
        let error = parse("cat <<END\n").unwrap_err();
        assert_eq!(error.cause, SyntaxError::MissingHereDocContent);
    }

    #[test]
    fn missing_here_doc_delimiter() {
        let error = parse("cat <<\n").unwrap_err();
        assert_eq!(error.cause, SyntaxError::MissingHereDocDelimiter);
    }

    #[test]
    fn missing_redirection_operand() {
        let error = parse("cat <\n").unwrap_err();
        assert_eq!(error.cause, SyntaxError::MissingRedirOperand);
    }
}
