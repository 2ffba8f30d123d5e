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

//! Type definitions for functions
//!
//! Functions are stored in a name-keyed set of reference-counted entries.
//! The store owns its entries and drops them on removal; a command that is
//! executing a function keeps its own clone of the `Rc` so redefining or
//! unsetting the function mid-execution is safe.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use std::hash::Hasher;
use std::rc::Rc;
use zash_syntax::ast::AstNode;
use zash_syntax::source::Location;

/// Definition of a function
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Function {
    /// String that identifies the function
    pub name: String,

    /// Command that is executed when the function is called
    ///
    /// This is the lowered compound-command body of the function definition.
    /// It is wrapped in `Rc` so that defining a function does not clone the
    /// whole tree out of the AST.
    pub body: Rc<AstNode>,

    /// Location of the function definition command that defined this
    /// function
    pub origin: Location,

    /// Optional location where this function was made read-only
    pub read_only_location: Option<Location>,
}

impl Function {
    /// Creates a new function that is not read-only.
    #[must_use]
    pub fn new<N: Into<String>>(name: N, body: Rc<AstNode>, origin: Location) -> Function {
        Function {
            name: name.into(),
            body,
            origin,
            read_only_location: None,
        }
    }

    /// Makes the function read-only in a method chain.
    #[inline]
    #[must_use]
    pub fn make_read_only(mut self, location: Location) -> Function {
        self.read_only_location = Some(location);
        self
    }

    /// Whether this function is read-only.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only_location.is_some()
    }
}

/// Wrapper of [`Function`] for inserting into a hash set
///
/// The `Hash` and `PartialEq` implementations compare names only, making the
/// set name-keyed.
#[derive(Clone, Debug, Eq)]
pub struct HashEntry(pub Rc<Function>);

impl HashEntry {
    /// Convenience method for creating a new entry.
    pub fn new(function: Function) -> HashEntry {
        HashEntry(Rc::new(function))
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

/// Collection of functions, keyed by name
pub type FunctionSet = HashSet<HashEntry>;
