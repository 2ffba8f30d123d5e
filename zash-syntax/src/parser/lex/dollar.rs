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

//! Part of the lexer that scans dollar expansions and backquotes
//!
//! A `$` introduces a raw parameter (`$name`), a braced parameter expansion
//! (`${...}`), a command substitution (`$(...)`) or an arithmetic expansion
//! (`$((...))`). The content of substitutions is tokenized recursively; the
//! nested token list is stored in the word part together with the raw text.

use super::core::{Blocked, LexErrorKind, Mode, Scanner, ScanResult};
use super::heredoc::HereDocEntry;
use super::op::Operator;
use super::Lexer;
use crate::syntax::Modifier;
use crate::syntax::Param;
use crate::syntax::PartUnit;
use crate::syntax::SpecialParam;
use crate::syntax::Switch;
use crate::syntax::SwitchCondition;
use crate::syntax::SwitchKind;
use crate::syntax::Token;
use crate::syntax::TokenId;
use crate::syntax::Trim;
use crate::syntax::TrimLength;
use crate::syntax::TrimSide;
use crate::syntax::WordPart;
use std::collections::VecDeque;

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl Scanner<'_> {
    /// Scans one `$` unit.
    ///
    /// The cursor must be at the `$`. The `double_quoted` flag is recorded on
    /// the resulting part.
    pub(super) fn dollar_unit(&mut self, double_quoted: bool) -> ScanResult<WordPart> {
        self.advance(); // $
        let unit = match self.peek() {
            None if !self.finished => return Err(self.suspend()),
            Some('{') => self.braced_param()?,
            Some('(') => self.paren_subst()?,
            Some(c) if is_name_start(c) => {
                let mut name = String::new();
                while let Some(c) = self.peek() {
                    if !is_name_char(c) {
                        break;
                    }
                    name.push(c);
                    self.advance();
                }
                if self.at_end() && !self.finished {
                    // The name may continue in the next chunk.
                    return Err(self.suspend());
                }
                PartUnit::Param(Box::new(Param::from_id(name)))
            }
            Some(c) if c.is_ascii_digit() => {
                // Only one digit denotes a positional parameter: `$10` is
                // `${1}0`.
                self.advance();
                PartUnit::Param(Box::new(Param::from_id(c.to_string())))
            }
            Some(c) if SpecialParam::from_char(c).is_some() => {
                self.advance();
                PartUnit::Param(Box::new(Param::from_id(c.to_string())))
            }
            // A dollar not followed by anything expandable is literal.
            None | Some(_) => PartUnit::Literal("$".to_string()),
        };
        Ok(WordPart {
            unit,
            single_quoted: false,
            double_quoted,
        })
    }

    /// Scans a braced parameter expansion after the `$`.
    fn braced_param(&mut self) -> ScanResult<PartUnit> {
        self.push_mode(Mode::BracedParam);
        let opening = self.location();
        self.advance(); // {

        // `#` is a length prefix unless it names the `#` parameter itself.
        let mut length = false;
        if self.peek() == Some('#') {
            let mut chars = self.rest().chars();
            chars.next();
            match chars.next() {
                None if !self.finished => return Err(self.suspend()),
                Some('}' | ':' | '+' | '-' | '=' | '?') | None => {}
                Some(_) => {
                    self.advance();
                    length = true;
                }
            }
        }

        let name = self.param_name(opening)?;
        let mut param = Param::from_id(name);

        if length {
            match self.peek() {
                None => return Err(self.suspend()),
                Some('}') => {
                    self.advance();
                    param.modifier = Modifier::Length;
                }
                Some(_) => {
                    let location = self.location();
                    return self.error(LexErrorKind::InvalidModifier, location);
                }
            }
            self.pop_mode();
            return Ok(PartUnit::Param(Box::new(param)));
        }

        param.modifier = self.param_modifier()?;
        match self.peek() {
            None => return Err(self.suspend()),
            Some('}') => {
                self.advance();
            }
            Some(_) => {
                let location = self.location();
                return self.error(LexErrorKind::InvalidModifier, location);
            }
        }
        self.pop_mode();
        Ok(PartUnit::Param(Box::new(param)))
    }

    /// Scans the parameter name inside braces.
    fn param_name(&mut self, opening: crate::source::Location) -> ScanResult<String> {
        match self.peek() {
            None => Err(self.suspend()),
            Some('}') => self.error(LexErrorKind::EmptyParam, opening),
            Some(c) if SpecialParam::from_char(c).is_some() && !c.is_ascii_digit() => {
                self.advance();
                Ok(c.to_string())
            }
            Some(c) if c.is_ascii_digit() => {
                let mut name = String::new();
                while let Some(c) = self.peek() {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    name.push(c);
                    self.advance();
                }
                match self.peek() {
                    None if !self.finished => Err(self.suspend()),
                    Some(c) if is_name_char(c) => {
                        let location = self.location();
                        self.error(LexErrorKind::InvalidParam, location)
                    }
                    _ => Ok(name),
                }
            }
            Some(c) if is_name_start(c) => {
                let mut name = String::new();
                while let Some(c) = self.peek() {
                    if !is_name_char(c) {
                        break;
                    }
                    name.push(c);
                    self.advance();
                }
                if self.at_end() && !self.finished {
                    return Err(self.suspend());
                }
                Ok(name)
            }
            Some(_) => {
                let location = self.location();
                self.error(LexErrorKind::InvalidParam, location)
            }
        }
    }

    /// Scans the optional modifier after a parameter name.
    fn param_modifier(&mut self) -> ScanResult<Modifier> {
        let kind_of = |c: char| match c {
            '+' => Some(SwitchKind::Alter),
            '-' => Some(SwitchKind::Default),
            '=' => Some(SwitchKind::Assign),
            '?' => Some(SwitchKind::Error),
            _ => None,
        };
        match self.peek() {
            None => Err(self.suspend()),
            Some('}') => Ok(Modifier::None),
            Some(':') => {
                self.advance();
                let location = self.location();
                match self.peek() {
                    None => Err(self.suspend()),
                    Some(c) => match kind_of(c) {
                        Some(kind) => {
                            self.advance();
                            let word = self.word(|c| c == '}')?;
                            Ok(Modifier::Switch(Switch {
                                kind,
                                condition: SwitchCondition::UnsetOrEmpty,
                                word,
                            }))
                        }
                        None => self.error(LexErrorKind::InvalidModifier, location),
                    },
                }
            }
            Some(c) if kind_of(c).is_some() => {
                self.advance();
                let word = self.word(|c| c == '}')?;
                Ok(Modifier::Switch(Switch {
                    kind: kind_of(c).unwrap(),
                    condition: SwitchCondition::Unset,
                    word,
                }))
            }
            Some(side @ ('#' | '%')) => {
                self.advance();
                let length = if self.peek() == Some(side) {
                    self.advance();
                    TrimLength::Longest
                } else if self.at_end() && !self.finished {
                    return Err(self.suspend());
                } else {
                    TrimLength::Shortest
                };
                let pattern = self.word(|c| c == '}')?;
                Ok(Modifier::Trim(Trim {
                    side: if side == '#' {
                        TrimSide::Prefix
                    } else {
                        TrimSide::Suffix
                    },
                    length,
                    pattern,
                }))
            }
            Some(_) => {
                let location = self.location();
                self.error(LexErrorKind::InvalidModifier, location)
            }
        }
    }

    /// Scans a substitution starting with `$(`.
    ///
    /// `$((` opens an arithmetic expansion. If the arithmetic expansion turns
    /// out not to be closed by a matching `))`, the scan backtracks and
    /// reinterprets the text as a command substitution starting with a
    /// subshell.
    fn paren_subst(&mut self) -> ScanResult<PartUnit> {
        let save = self.cursor;
        if self.rest().starts_with("((") {
            match self.arith()? {
                Some(unit) => return Ok(unit),
                None => {
                    self.cursor = save;
                    self.pop_mode();
                }
            }
        }
        self.command_subst()
    }

    /// Scans an arithmetic expansion.
    ///
    /// The cursor must be at the first of the two opening parentheses. This
    /// function returns `Ok(None)` if the content ends with a single `)` not
    /// followed by another, in which case the caller reinterprets the whole
    /// construct as a command substitution.
    fn arith(&mut self) -> ScanResult<Option<PartUnit>> {
        self.push_mode(Mode::Arith);
        self.advance(); // (
        self.advance(); // (
        let content_start = self.cursor.index;
        let mut depth = 0u32;
        loop {
            match self.peek() {
                None => return Err(self.suspend()),
                Some('(') => {
                    depth += 1;
                    self.advance();
                }
                Some(')') if depth > 0 => {
                    depth -= 1;
                    self.advance();
                }
                Some(')') => {
                    let content_end = self.cursor.index;
                    self.advance();
                    match self.peek() {
                        None if !self.finished => return Err(self.suspend()),
                        Some(')') => {
                            self.advance();
                            let content = self.src[content_start..content_end].to_string();
                            let tokens = tokenize_nested(&content)?;
                            self.pop_mode();
                            return Ok(Some(PartUnit::Arith { content, tokens }));
                        }
                        _ => return Ok(None),
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Scans a command substitution.
    ///
    /// The cursor must be at the opening parenthesis. The content is
    /// tokenized recursively, including any here-documents introduced within
    /// the substitution.
    fn command_subst(&mut self) -> ScanResult<PartUnit> {
        self.push_mode(Mode::CommandSubst);
        self.advance(); // (
        let content_start = self.cursor.index;
        let mut tokens = Vec::new();
        let mut here_docs: VecDeque<HereDocEntry> = VecDeque::new();
        let mut awaiting_delimiter: Option<bool> = None;
        let mut depth = 0u32;
        loop {
            let before = self.cursor.index;
            let Some(token) = self.next_token()? else {
                return Err(self.suspend());
            };
            match &token.id {
                TokenId::Operator(Operator::OpenParen) => depth += 1,
                TokenId::Operator(Operator::CloseParen) => {
                    if depth == 0 {
                        let content = self.src[content_start..before].to_string();
                        self.pop_mode();
                        return Ok(PartUnit::CommandSubst { content, tokens });
                    }
                    depth -= 1;
                }
                TokenId::Operator(op) if op.is_here_doc() => {
                    awaiting_delimiter = Some(*op == Operator::LessLessDash);
                    tokens.push(token);
                    continue;
                }
                TokenId::Word => {
                    if let Some(remove_tabs) = awaiting_delimiter.take() {
                        let (delimiter, quoted) = token.word.unquote();
                        here_docs.push_back(HereDocEntry::new(delimiter, remove_tabs, quoted));
                    }
                }
                TokenId::Operator(Operator::Newline) => {
                    awaiting_delimiter = None;
                    tokens.push(token);
                    while let Some(entry) = here_docs.pop_front() {
                        tokens.push(self.here_doc_body(entry)?);
                    }
                    continue;
                }
                _ => {}
            }
            awaiting_delimiter = None;
            tokens.push(token);
        }
    }

    /// Scans a backquoted command substitution.
    ///
    /// Inside backquotes, a backslash quotes `` ` ``, `\` and `$`. The
    /// escape-processed content is tokenized with a nested lexer.
    pub(super) fn backquote(&mut self, double_quoted: bool) -> ScanResult<WordPart> {
        self.push_mode(Mode::Backquote);
        self.advance(); // `
        let mut content = String::new();
        loop {
            match self.peek() {
                None => return Err(self.suspend()),
                Some('`') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let mut chars = self.rest().chars();
                    chars.next();
                    match chars.next() {
                        None => return Err(self.suspend()),
                        Some(c @ ('`' | '\\' | '$')) => {
                            self.advance();
                            self.advance();
                            content.push(c);
                        }
                        Some(_) => {
                            self.advance();
                            content.push('\\');
                        }
                    }
                }
                Some(c) => {
                    content.push(c);
                    self.advance();
                }
            }
        }
        self.pop_mode();
        let tokens = tokenize_nested(&content)?;
        Ok(WordPart {
            unit: PartUnit::CommandSubst { content, tokens },
            single_quoted: false,
            double_quoted,
        })
    }
}

/// Tokenizes captured substitution content with a nested lexer.
fn tokenize_nested(content: &str) -> ScanResult<Vec<Token>> {
    match Lexer::tokenize_all(content) {
        Ok(mut tokens) => {
            // The nested end-of-input token is an artifact of the nested
            // lexer, not part of the substitution.
            if tokens.last().is_some_and(|t| t.id == TokenId::EndOfInput) {
                tokens.pop();
            }
            Ok(tokens)
        }
        Err(error) => Err(Blocked::Error(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::{LexErrorKind, LexStatus, Lexer};
    use crate::syntax::*;
    use assert_matches::assert_matches;

    fn first_part(source: &str) -> WordPart {
        let tokens = Lexer::tokenize_all(source).unwrap();
        tokens.into_iter().next().unwrap().word.parts.remove(0)
    }

    #[test]
    fn raw_params() {
        assert_matches!(first_part("$foo").unit, PartUnit::Param(p) => {
            assert_eq!(p.id, "foo");
            assert_eq!(p.kind, ParamKind::Variable);
        });
        assert_matches!(first_part("$?").unit, PartUnit::Param(p) => {
            assert_eq!(p.kind, ParamKind::Special(SpecialParam::Question));
        });
    }

    #[test]
    fn raw_positional_takes_one_digit() {
        let tokens = Lexer::tokenize_all("$12").unwrap();
        let word = &tokens[0].word;
        assert_matches!(&word.parts[0].unit, PartUnit::Param(p) => {
            assert_eq!(p.kind, ParamKind::Positional(1));
        });
        assert_matches!(&word.parts[1].unit, PartUnit::Literal(s) => assert_eq!(s, "2"));
    }

    #[test]
    fn lone_dollar_is_literal() {
        assert_matches!(first_part("$ ").unit, PartUnit::Literal(s) => assert_eq!(s, "$"));
    }

    #[test]
    fn braced_params() {
        assert_matches!(first_part("${foo}").unit, PartUnit::Param(p) => {
            assert_eq!(p.id, "foo");
            assert_eq!(p.modifier, Modifier::None);
        });
        assert_matches!(first_part("${12}").unit, PartUnit::Param(p) => {
            assert_eq!(p.kind, ParamKind::Positional(12));
        });
        assert_matches!(first_part("${#}").unit, PartUnit::Param(p) => {
            assert_eq!(p.kind, ParamKind::Special(SpecialParam::Number));
            assert_eq!(p.modifier, Modifier::None);
        });
    }

    #[test]
    fn length_modifier() {
        assert_matches!(first_part("${#foo}").unit, PartUnit::Param(p) => {
            assert_eq!(p.id, "foo");
            assert_eq!(p.modifier, Modifier::Length);
        });
    }

    #[test]
    fn switch_modifiers() {
        assert_matches!(first_part("${x:-default}").unit, PartUnit::Param(p) => {
            assert_matches!(&p.modifier, Modifier::Switch(s) => {
                assert_eq!(s.kind, SwitchKind::Default);
                assert_eq!(s.condition, SwitchCondition::UnsetOrEmpty);
                assert_eq!(s.word.to_string(), "default");
            });
        });
        assert_matches!(first_part("${x=y}").unit, PartUnit::Param(p) => {
            assert_matches!(&p.modifier, Modifier::Switch(s) => {
                assert_eq!(s.kind, SwitchKind::Assign);
                assert_eq!(s.condition, SwitchCondition::Unset);
            });
        });
        assert_matches!(first_part("${x:?message}").unit, PartUnit::Param(p) => {
            assert_matches!(&p.modifier, Modifier::Switch(s) => {
                assert_eq!(s.kind, SwitchKind::Error);
            });
        });
        assert_matches!(first_part("${x:+alt}").unit, PartUnit::Param(p) => {
            assert_matches!(&p.modifier, Modifier::Switch(s) => {
                assert_eq!(s.kind, SwitchKind::Alter);
            });
        });
    }

    #[test]
    fn switch_word_may_contain_nested_braces() {
        assert_matches!(first_part("${x:-${y}}").unit, PartUnit::Param(p) => {
            assert_matches!(&p.modifier, Modifier::Switch(s) => {
                assert_eq!(s.word.to_string(), "${y}");
            });
        });
    }

    #[test]
    fn trim_modifiers() {
        assert_matches!(first_part("${x#*/}").unit, PartUnit::Param(p) => {
            assert_matches!(&p.modifier, Modifier::Trim(t) => {
                assert_eq!(t.side, TrimSide::Prefix);
                assert_eq!(t.length, TrimLength::Shortest);
                assert_eq!(t.pattern.to_string(), "*/");
            });
        });
        assert_matches!(first_part("${x%%.*}").unit, PartUnit::Param(p) => {
            assert_matches!(&p.modifier, Modifier::Trim(t) => {
                assert_eq!(t.side, TrimSide::Suffix);
                assert_eq!(t.length, TrimLength::Longest);
            });
        });
    }

    #[test]
    fn bad_braced_params() {
        assert_matches!(Lexer::tokenize_all("${}"), Err(e) => {
            assert_eq!(e.kind, LexErrorKind::EmptyParam);
        });
        assert_matches!(Lexer::tokenize_all("${1x}"), Err(e) => {
            assert_eq!(e.kind, LexErrorKind::InvalidParam);
        });
        assert_matches!(Lexer::tokenize_all("${x;}"), Err(e) => {
            assert_eq!(e.kind, LexErrorKind::InvalidModifier);
        });
    }

    #[test]
    fn unclosed_braced_param_suspends() {
        let mut lexer = Lexer::new();
        lexer.push_source("${x:-a");
        let mut tokens = Vec::new();
        assert_eq!(lexer.scan(&mut tokens), LexStatus::Incomplete);

        lexer.push_source("b}");
        lexer.finish();
        assert_eq!(lexer.scan(&mut tokens), LexStatus::Ok);
        assert_eq!(tokens[0].to_string(), "${x:-ab}");
    }

    #[test]
    fn command_substitution() {
        assert_matches!(first_part("$(echo hi)").unit, PartUnit::CommandSubst { content, tokens } => {
            assert_eq!(content, "echo hi");
            let words: Vec<_> = tokens.iter().map(|t| t.to_string()).collect();
            assert_eq!(words, ["echo", "hi"]);
        });
    }

    #[test]
    fn command_substitution_with_subshell_parens() {
        assert_matches!(first_part("$( (a); b )").unit, PartUnit::CommandSubst { content, .. } => {
            assert_eq!(content, " (a); b");
        });
    }

    #[test]
    fn nested_command_substitution() {
        assert_matches!(first_part("$(echo $(inner))").unit, PartUnit::CommandSubst { content, tokens } => {
            assert_eq!(content, "echo $(inner)");
            assert_matches!(&tokens[1].word.parts[0].unit, PartUnit::CommandSubst { content, .. } => {
                assert_eq!(content, "inner");
            });
        });
    }

    #[test]
    fn backquote_substitution() {
        assert_matches!(first_part("`echo hi`").unit, PartUnit::CommandSubst { content, .. } => {
            assert_eq!(content, "echo hi");
        });
        // Backslash escapes inside backquotes.
        assert_matches!(first_part(r"`echo \` \$x`").unit, PartUnit::CommandSubst { content, .. } => {
            assert_eq!(content, r"echo ` $x");
        });
    }

    #[test]
    fn arithmetic_expansion() {
        assert_matches!(first_part("$((1+2))").unit, PartUnit::Arith { content, .. } => {
            assert_eq!(content, "1+2");
        });
        assert_matches!(first_part("$(( (1+2)*3 ))").unit, PartUnit::Arith { content, .. } => {
            assert_eq!(content, " (1+2)*3 ");
        });
    }

    #[test]
    fn arith_falls_back_to_command_subst() {
        assert_matches!(first_part("$((echo a) )").unit, PartUnit::CommandSubst { content, .. } => {
            assert_eq!(content, "(echo a)");
        });
    }

    #[test]
    fn unclosed_command_subst_is_error_at_definite_end() {
        let mut lexer = Lexer::new();
        lexer.push_source("$(echo hi");
        lexer.finish();
        let mut tokens = Vec::new();
        assert_matches!(lexer.scan(&mut tokens), LexStatus::Error(e) => {
            assert_eq!(e.kind, LexErrorKind::UnclosedCommandSubstitution);
        });
    }
}
