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

//! Implementation of [`System`] that is simulated in memory

use super::System;
use std::collections::BTreeSet;
use std::collections::HashMap;

/// In-memory system used in tests
///
/// The virtual system holds an environment map, a user database and a file
/// hierarchy, all independent of the machine the tests run on. Directories
/// and files are added with [`add_directory`](Self::add_directory) and
/// [`add_file`](Self::add_file); completed-job results are queued with
/// [`report_job_result`](Self::report_job_result).
#[derive(Clone, Debug, Default)]
pub struct VirtualSystem {
    environment: HashMap<String, String>,
    home_directories: HashMap<String, String>,
    /// Absolute paths of files; directories are tracked separately
    files: BTreeSet<String>,
    directories: BTreeSet<String>,
    pending_job_results: Vec<(i64, i32)>,
}

impl VirtualSystem {
    /// Creates an empty virtual system.
    #[must_use]
    pub fn new() -> VirtualSystem {
        VirtualSystem::default()
    }

    /// Defines a user with a home directory.
    pub fn add_user<N: Into<String>, D: Into<String>>(&mut self, name: N, home: D) {
        self.home_directories.insert(name.into(), home.into());
    }

    /// Creates a directory (and its ancestors).
    pub fn add_directory<P: Into<String>>(&mut self, path: P) {
        let path = path.into();
        let mut current = String::new();
        for component in path.split('/').filter(|c| !c.is_empty()) {
            current.push('/');
            current.push_str(component);
            self.directories.insert(current.clone());
        }
    }

    /// Creates a regular file (and its ancestor directories).
    pub fn add_file<P: Into<String>>(&mut self, path: P) {
        let path = path.into();
        if let Some(index) = path.rfind('/') {
            self.add_directory(&path[..index]);
        }
        self.files.insert(path);
    }

    /// Queues a completed-job result for the next [`reap_jobs`]
    /// (System::reap_jobs) call.
    pub fn report_job_result(&mut self, pid: i64, status: i32) {
        self.pending_job_results.push((pid, status));
    }

    fn entry_exists(&self, path: &str) -> bool {
        self.files.contains(path) || self.directories.contains(path)
    }
}

impl System for VirtualSystem {
    fn getenv(&self, name: &str) -> Option<String> {
        self.environment.get(name).cloned()
    }

    fn setenv(&mut self, name: &str, value: &str) {
        self.environment
            .insert(name.to_string(), value.to_string());
    }

    fn unsetenv(&mut self, name: &str) {
        self.environment.remove(name);
    }

    fn getpwnam_dir(&self, name: &str) -> Option<String> {
        self.home_directories.get(name).cloned()
    }

    fn read_dir(&self, path: &str) -> std::io::Result<Vec<String>> {
        let prefix = match path {
            "" | "." => String::new(),
            "/" => "/".to_string(),
            _ => {
                let path = path.trim_end_matches('/');
                if !self.directories.contains(path) {
                    return Err(std::io::Error::from(std::io::ErrorKind::NotFound));
                }
                format!("{path}/")
            }
        };

        let mut names = Vec::new();
        for entry in self.files.iter().chain(self.directories.iter()) {
            let Some(rest) = entry.strip_prefix(&prefix) else {
                continue;
            };
            if prefix.is_empty() && !entry.starts_with('/') {
                continue;
            }
            let rest = if prefix.is_empty() {
                // Listing the root via a relative scan is not supported; the
                // expander always passes absolute or `.`-relative paths.
                rest.trim_start_matches('/')
            } else {
                rest
            };
            if !rest.is_empty() && !rest.contains('/') {
                names.push(rest.to_string());
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn is_directory(&self, path: &str) -> bool {
        self.directories.contains(path.trim_end_matches('/'))
    }

    fn exists(&self, path: &str) -> bool {
        self.entry_exists(path.trim_end_matches('/'))
    }

    fn reap_jobs(&mut self, _wait: bool) -> Vec<(i64, i32)> {
        std::mem::take(&mut self.pending_job_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_round_trip() {
        let mut system = VirtualSystem::new();
        assert_eq!(system.getenv("PATH"), None);
        system.setenv("PATH", "/bin");
        assert_eq!(system.getenv("PATH").as_deref(), Some("/bin"));
        system.unsetenv("PATH");
        assert_eq!(system.getenv("PATH"), None);
    }

    #[test]
    fn user_database() {
        let mut system = VirtualSystem::new();
        system.add_user("alice", "/home/alice");
        assert_eq!(
            system.getpwnam_dir("alice").as_deref(),
            Some("/home/alice")
        );
        assert_eq!(system.getpwnam_dir("bob"), None);
    }

    #[test]
    fn directory_listing() {
        let mut system = VirtualSystem::new();
        system.add_file("/src/main.rs");
        system.add_file("/src/lib.rs");
        system.add_directory("/src/tests");

        let mut names = system.read_dir("/src").unwrap();
        names.sort();
        assert_eq!(names, ["lib.rs", "main.rs", "tests"]);

        let names = system.read_dir("/").unwrap();
        assert_eq!(names, ["src"]);

        assert!(system.read_dir("/nonexistent").is_err());
    }

    #[test]
    fn directory_predicate() {
        let mut system = VirtualSystem::new();
        system.add_file("/src/main.rs");
        assert!(system.is_directory("/src"));
        assert!(system.is_directory("/src/"));
        assert!(!system.is_directory("/src/main.rs"));
    }
}
