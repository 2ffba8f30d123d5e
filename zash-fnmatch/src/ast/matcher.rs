// This file is part of zash, a POSIX-compatible shell.
// Copyright (C) 2026 The zash authors

//! Pattern matching over the AST
//!
//! The matcher walks the pattern atoms and the subject characters in
//! lockstep. For `*`, it remembers one resume position (the atom after the
//! star and the subject position it last tried) and re-extends the star on
//! mismatch, which is the standard linear glob algorithm.

use super::*;
use crate::Config;

fn chars_eq(a: char, b: char, config: &Config) -> bool {
    if config.case_insensitive {
        a.eq_ignore_ascii_case(&b)
    } else {
        a == b
    }
}

fn char_in_range(c: char, start: char, end: char, config: &Config) -> bool {
    if start <= c && c <= end {
        return true;
    }
    if config.case_insensitive {
        let folded = c.to_ascii_lowercase();
        if start <= folded && folded <= end {
            return true;
        }
        let folded = c.to_ascii_uppercase();
        if start <= folded && folded <= end {
            return true;
        }
    }
    false
}

impl Bracket {
    fn matches(&self, c: char, config: &Config) -> bool {
        let found = self.items.iter().any(|item| match item {
            BracketItem::Atom(BracketAtom::Char(value)) => chars_eq(*value, c, config),
            BracketItem::Range(range) => {
                let BracketAtom::Char(start) = *range.start();
                let BracketAtom::Char(end) = *range.end();
                char_in_range(c, start, end, config)
            }
        });
        found != self.complement
    }
}

impl Ast {
    /// Tests whether a wildcard atom may match the subject character at the
    /// given index.
    ///
    /// Under `pathname`, wildcards never match a `/`. Under `literal_period`,
    /// wildcards never match a `.` at the start of the subject or, in
    /// pathname mode, right after a `/`.
    fn wild_can_match(subject: &[char], index: usize, config: &Config) -> bool {
        let c = subject[index];
        if config.pathname && c == '/' {
            return false;
        }
        if config.literal_period && c == '.' {
            let at_component_start =
                index == 0 || (config.pathname && subject[index - 1] == '/');
            if at_component_start {
                return false;
            }
        }
        true
    }

    /// Tests whether this pattern matches the whole subject.
    pub(crate) fn matches(&self, subject: &str, config: &Config) -> bool {
        let subject: Vec<char> = subject.chars().collect();
        let atoms = &self.atoms;

        let mut atom_index = 0;
        let mut char_index = 0;
        // Resume point of the most recent star: the atom after the star and
        // the subject position where its extension should continue.
        let mut star: Option<(usize, usize)> = None;

        loop {
            if atom_index < atoms.len() {
                let advanced = match &atoms[atom_index] {
                    Atom::Char(value) => {
                        char_index < subject.len()
                            && chars_eq(*value, subject[char_index], config)
                    }
                    Atom::AnyChar => {
                        char_index < subject.len()
                            && Self::wild_can_match(&subject, char_index, config)
                    }
                    Atom::Bracket(bracket) => {
                        char_index < subject.len()
                            && Self::wild_can_match(&subject, char_index, config)
                            && bracket.matches(subject[char_index], config)
                    }
                    Atom::AnyString => {
                        star = Some((atom_index + 1, char_index));
                        atom_index += 1;
                        continue;
                    }
                };
                if advanced {
                    atom_index += 1;
                    char_index += 1;
                    continue;
                }
            } else if char_index == subject.len() {
                return true;
            }

            // Mismatch. Extend the last star by one character if possible.
            match star {
                Some((resume_atom, resume_char))
                    if resume_char < subject.len()
                        && Self::wild_can_match(&subject, resume_char, config) =>
                {
                    star = Some((resume_atom, resume_char + 1));
                    atom_index = resume_atom;
                    char_index = resume_char + 1;
                }
                _ => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::without_escape;

    fn ast(pattern: &str) -> Ast {
        Ast::new(without_escape(pattern)).unwrap()
    }

    #[test]
    fn star_at_end() {
        let config = Config::default();
        assert!(ast("foo*").matches("foo", &config));
        assert!(ast("foo*").matches("foobar", &config));
        assert!(!ast("foo*").matches("fo", &config));
    }

    #[test]
    fn star_backtracks_to_latest_position() {
        let config = Config::default();
        assert!(ast("*ab").matches("aab", &config));
        assert!(ast("*ab*ab").matches("abxabab", &config));
        assert!(!ast("*ab").matches("aba", &config));
    }

    #[test]
    fn bracket_range_and_complement() {
        let config = Config::default();
        assert!(ast("[a-c]").matches("b", &config));
        assert!(!ast("[a-c]").matches("d", &config));
        assert!(ast("[!a-c]").matches("d", &config));
        assert!(!ast("[!a-c]").matches("b", &config));
    }

    #[test]
    fn pathname_star_stops_at_slash() {
        let config = Config {
            pathname: true,
            ..Config::default()
        };
        assert!(!ast("*").matches("a/b", &config));
        assert!(ast("*/*").matches("a/b", &config));
        assert!(!ast("*/*").matches("a/b/c", &config));
    }

    #[test]
    fn literal_period_blocks_wildcards() {
        let config = Config {
            literal_period: true,
            ..Config::default()
        };
        assert!(!ast("*").matches(".hidden", &config));
        assert!(!ast("?hidden").matches(".hidden", &config));
        assert!(!ast("[.a]x").matches(".x", &config));
        assert!(ast(".*").matches(".hidden", &config));
        // A period not at the start is fair game.
        assert!(ast("a*").matches("a.b", &config));
    }

    #[test]
    fn non_ascii_characters_match_themselves() {
        let config = Config::default();
        assert!(ast("na?ve").matches("naïve", &config));
        assert!(ast("*ïve").matches("naïve", &config));
    }
}
