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

//! Defining aliases
//!
//! This module provides the alias data types and the glossary interface the
//! parser uses to substitute command words while parsing.

use crate::source::Location;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::hash::Hasher;
use std::rc::Rc;

/// Name-value pair that defines an alias
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alias {
    /// Name of the alias that is matched against a command word by the
    /// syntax parser
    pub name: String,
    /// String that substitutes part of the source code when it is found to
    /// match the alias name
    pub replacement: String,
    /// Location of the word in the simple command that invoked the alias
    /// built-in to define this alias
    pub origin: Location,
}

/// Wrapper of [`Alias`] for inserting into a hash set
///
/// A `HashEntry` wraps an `Alias` in `Rc` so that the alias definition can be
/// referred to even after the definition is removed from the set. The `Hash`
/// and `PartialEq` implementations compare names only.
#[derive(Clone, Debug, Eq)]
pub struct HashEntry(pub Rc<Alias>);

impl HashEntry {
    /// Convenience method for creating a new alias definition as `HashEntry`
    pub fn new(name: String, replacement: String, origin: Location) -> HashEntry {
        HashEntry(Rc::new(Alias {
            name,
            replacement,
            origin,
        }))
    }
}

impl PartialEq for HashEntry {
    fn eq(&self, other: &HashEntry) -> bool {
        self.0.name == other.0.name
    }
}

impl Hash for HashEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state)
    }
}

impl Borrow<str> for HashEntry {
    fn borrow(&self) -> &str {
        &self.0.name
    }
}

/// Collection of aliases
pub type AliasSet = HashSet<HashEntry>;

/// Interface used by the parser to look up aliases
///
/// This trait is an abstract interface that represents an immutable
/// collection of aliases. The parser uses it to look up aliases when it
/// examines a command word in a simple command.
pub trait Glossary: Debug {
    /// Looks up an alias by name.
    ///
    /// If an alias with the given name is found, it is returned. Otherwise,
    /// the return value is `None`.
    // This method returns an `Rc<Alias>` rather than `&Alias` so that
    // implementations backed by interior mutability can return a value after
    // releasing their borrow.
    #[must_use]
    fn look_up(&self, name: &str) -> Option<Rc<Alias>>;

    /// Returns whether the glossary is empty.
    ///
    /// If the glossary is empty, the parser skips alias substitution
    /// entirely. This method is a hint to optimize that common case.
    #[must_use]
    fn is_empty(&self) -> bool;
}

impl Glossary for AliasSet {
    fn look_up(&self, name: &str) -> Option<Rc<Alias>> {
        self.get(name).map(|entry| Rc::clone(&entry.0))
    }
    fn is_empty(&self) -> bool {
        HashSet::is_empty(self)
    }
}

/// Glossary that contains no aliases
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EmptyGlossary;

impl Glossary for EmptyGlossary {
    fn look_up(&self, _name: &str) -> Option<Rc<Alias>> {
        None
    }
    fn is_empty(&self) -> bool {
        true
    }
}
