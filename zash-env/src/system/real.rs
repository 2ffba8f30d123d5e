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

//! Implementation of [`System`] for the real host

use super::System;

/// System implementation backed by the process environment and filesystem
///
/// Job reaping is not implemented here: the shell core treats process
/// supervision as an external collaborator, so an embedder that runs
/// background jobs must wrap this system with one that reports their
/// completion.
#[derive(Clone, Copy, Debug, Default)]
pub struct RealSystem;

impl System for RealSystem {
    fn getenv(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn setenv(&mut self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }

    fn unsetenv(&mut self, name: &str) {
        std::env::remove_var(name);
    }

    #[cfg(unix)]
    fn getpwnam_dir(&self, name: &str) -> Option<String> {
        let name = std::ffi::CString::new(name).ok()?;
        // SAFETY: getpwnam returns a pointer to a static buffer or null. The
        // buffer stays valid until the next call, and we copy the directory
        // out before returning.
        unsafe {
            let entry = libc::getpwnam(name.as_ptr());
            if entry.is_null() {
                return None;
            }
            let dir = (*entry).pw_dir;
            if dir.is_null() {
                return None;
            }
            let dir = std::ffi::CStr::from_ptr(dir);
            Some(dir.to_string_lossy().into_owned())
        }
    }

    #[cfg(not(unix))]
    fn getpwnam_dir(&self, _name: &str) -> Option<String> {
        None
    }

    fn read_dir(&self, path: &str) -> std::io::Result<Vec<String>> {
        let path = if path.is_empty() { "." } else { path };
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn is_directory(&self, path: &str) -> bool {
        std::fs::metadata(path).is_ok_and(|metadata| metadata.is_dir())
    }

    fn exists(&self, path: &str) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn reap_jobs(&mut self, _wait: bool) -> Vec<(i64, i32)> {
        Vec::new()
    }
}
