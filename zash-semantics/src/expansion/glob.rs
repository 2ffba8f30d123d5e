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

//! Pathname expansion
//!
//! A field containing an unquoted `*`, `?` or `[` is matched against the
//! filesystem. The pattern is split at `/` and each component with
//! non-literal elements scans its candidate directories through
//! [`System::read_dir`]; literal components only probe for existence. A
//! leading `.` in an entry name must be matched literally, `.` and `..` are
//! never produced, and the results come back sorted byte-wise. If nothing
//! matches, the field stays as it is, minus its quoting characters. Errors
//! from directory scanning are silently ignored.

use super::attr::AttrChar;
use super::quote_removal;
use zash_env::semantics::Field;
use zash_env::system::System;
use zash_fnmatch::{with_escape, Config, Pattern};
use zash_syntax::source::Location;

/// Performs pathname expansion on one field.
pub(super) fn glob(
    system: &dyn System,
    chars: Vec<AttrChar>,
    enabled: bool,
    origin: Location,
) -> Vec<Field> {
    let literal = |chars: &[AttrChar]| {
        vec![Field {
            value: quote_removal::strip(chars),
            origin,
        }]
    };

    if !enabled {
        return literal(&chars);
    }
    let has_unquoted_metachar = chars
        .iter()
        .any(|c| !c.is_quoting && !c.is_quoted && matches!(c.value, '*' | '?' | '['));
    if !has_unquoted_metachar {
        return literal(&chars);
    }

    let mut pattern = String::new();
    for c in &chars {
        if c.is_quoting {
            continue;
        }
        if c.is_quoted {
            pattern.push('\\');
        }
        pattern.push(c.value);
    }

    match expand_path(system, &pattern) {
        Some(mut paths) => {
            paths.sort();
            paths
                .into_iter()
                .map(|value| Field { value, origin })
                .collect()
        }
        None => literal(&chars),
    }
}

/// Expands a glob pattern to the pathnames it matches.
///
/// A backslash in the pattern escapes the next character. The result is
/// `None` when nothing matches, signaling the caller to keep the literal
/// pattern; `.` and `..` are excluded from the matches.
#[must_use]
pub fn expand_path(system: &dyn System, pattern: &str) -> Option<Vec<String>> {
    let absolute = pattern.starts_with('/');
    let directory_only = pattern.ends_with('/');
    let components: Vec<&str> = pattern.split('/').filter(|c| !c.is_empty()).collect();
    if components.is_empty() {
        return None;
    }

    let mut candidates = vec![if absolute {
        "/".to_string()
    } else {
        String::new()
    }];

    for component in components {
        let mut config = Config::default();
        config.literal_period = true;
        let pattern = Pattern::parse_with_config(with_escape(component), config).ok()?;

        let mut next = Vec::new();
        if let Some(name) = pattern.as_literal() {
            // No scan for all-literal components, only an existence probe.
            for directory in &candidates {
                let path = join(directory, &name);
                if system.exists(&path) {
                    next.push(path);
                }
            }
        } else {
            for directory in &candidates {
                let scanned = if directory.is_empty() { "." } else { directory };
                let Ok(entries) = system.read_dir(scanned) else {
                    continue;
                };
                for entry in entries {
                    if entry == "." || entry == ".." {
                        continue;
                    }
                    if pattern.is_match(&entry) {
                        next.push(join(directory, &entry));
                    }
                }
            }
        }
        candidates = next;
        if candidates.is_empty() {
            return None;
        }
    }

    if directory_only {
        candidates.retain(|path| system.is_directory(path));
        for path in &mut candidates {
            path.push('/');
        }
        if candidates.is_empty() {
            return None;
        }
    }
    Some(candidates)
}

fn join(directory: &str, name: &str) -> String {
    if directory.is_empty() {
        name.to_string()
    } else if directory.ends_with('/') {
        format!("{directory}{name}")
    } else {
        format!("{directory}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{word, StubEvaluator};
    use super::super::Expander;
    use super::*;
    use zash_env::system::VirtualSystem;
    use zash_env::Frame;

    fn frame_with_files(files: &[&str]) -> Frame {
        let mut system = VirtualSystem::new();
        for file in files {
            system.add_file(*file);
        }
        Frame::new(Box::new(system))
    }

    fn expand(frame: &mut Frame, source: &str) -> Vec<String> {
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
    fn matches_are_sorted() {
        let mut frame = frame_with_files(&["/b.txt", "/a.txt", "/c.md"]);
        assert_eq!(expand(&mut frame, "/*.txt"), ["/a.txt", "/b.txt"]);
    }

    #[test]
    fn no_match_keeps_the_pattern() {
        let mut frame = frame_with_files(&["/a.txt"]);
        assert_eq!(expand(&mut frame, "/*.rs"), ["/*.rs"]);
    }

    #[test]
    fn quoted_metacharacters_do_not_glob() {
        let mut frame = frame_with_files(&["/a.txt"]);
        assert_eq!(expand(&mut frame, "'/*.txt'"), ["/*.txt"]);
        assert_eq!(expand(&mut frame, "\"/*.txt\""), ["/*.txt"]);
    }

    #[test]
    fn noglob_option_disables_expansion() {
        let mut frame = frame_with_files(&["/a.txt"]);
        frame.options.remove(zash_env::option::Glob);
        assert_eq!(expand(&mut frame, "/*.txt"), ["/*.txt"]);
    }

    #[test]
    fn literal_components_are_probed_not_scanned() {
        let mut frame = frame_with_files(&["/src/a.rs", "/src/b.rs", "/doc/a.md"]);
        assert_eq!(expand(&mut frame, "/src/*.rs"), ["/src/a.rs", "/src/b.rs"]);
        assert_eq!(expand(&mut frame, "/nosuch/*.rs"), ["/nosuch/*.rs"]);
    }

    #[test]
    fn intermediate_patterns_scan_directories() {
        let mut frame =
            frame_with_files(&["/a/x.txt", "/b/x.txt", "/c/y.txt"]);
        assert_eq!(expand(&mut frame, "/*/x.txt"), ["/a/x.txt", "/b/x.txt"]);
    }

    #[test]
    fn leading_period_requires_literal_match() {
        let mut frame = frame_with_files(&["/.hidden", "/shown"]);
        assert_eq!(expand(&mut frame, "/*"), ["/shown"]);
        assert_eq!(expand(&mut frame, "/.*"), ["/.hidden"]);
    }

    #[test]
    fn dot_and_dot_dot_are_never_produced() {
        let mut frame = frame_with_files(&["/x"]);
        // The virtual system does not report `.` entries, but the filter is
        // in place for systems that do.
        assert_eq!(expand(&mut frame, "/*"), ["/x"]);
    }

    #[test]
    fn trailing_slash_keeps_directories_only() {
        let mut system = VirtualSystem::new();
        system.add_file("/src/main.rs");
        system.add_file("/readme");
        let mut frame = Frame::new(Box::new(system));
        assert_eq!(expand(&mut frame, "/*/"), ["/src/"]);
    }

    #[test]
    fn expand_path_returns_none_for_no_match() {
        let system = VirtualSystem::new();
        assert_eq!(expand_path(&system, "/x*"), None);
    }

    #[test]
    fn bracket_patterns() {
        let mut frame = frame_with_files(&["/a1", "/a2", "/a3"]);
        assert_eq!(expand(&mut frame, "/a[12]"), ["/a1", "/a2"]);
        assert_eq!(expand(&mut frame, "/a[!1]"), ["/a2", "/a3"]);
    }
}
