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

//! Type definitions for variables and positional parameters
//!
//! Variables live in a stack of contexts. The base context holds global
//! variables; a function call or dot script pushes a nested context. Reads
//! walk outward until a binding is found; writes target the nearest existing
//! binding, or create one in the context selected by [`Scope`].
//!
//! Positional parameters are part of the context stack as well: a context
//! pushed for a function call carries its own parameter array, while other
//! contexts see through to the nearest one below.

use std::collections::HashMap;
use thiserror::Error;
use zash_syntax::source::Location;

/// Definition of a variable
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Variable {
    /// Value of the variable
    ///
    /// The value is `None` if the variable has been declared without
    /// assignment.
    pub value: Option<String>,

    /// Whether this variable is exported to the environment of child
    /// processes
    pub is_exported: bool,

    /// Optional location where this variable was made read-only
    ///
    /// If this variable is not read-only, `read_only_location` is `None`.
    pub read_only_location: Option<Location>,

    /// Optional location of the assignment that produced the current value
    pub last_assigned_location: Option<Location>,
}

impl Variable {
    /// Creates a new scalar variable from a string.
    #[must_use]
    pub fn new<S: Into<String>>(value: S) -> Variable {
        Variable {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Sets the `is_exported` flag in a method chain.
    #[inline]
    #[must_use]
    pub fn export(mut self) -> Variable {
        self.is_exported = true;
        self
    }

    /// Makes the variable read-only in a method chain.
    #[inline]
    #[must_use]
    pub fn make_read_only(mut self, location: Location) -> Variable {
        self.read_only_location = Some(location);
        self
    }

    /// Whether this variable is read-only.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only_location.is_some()
    }
}

/// Error from assigning to a read-only variable
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("read-only variable `{name}` cannot be assigned")]
pub struct AssignError {
    /// Name of the read-only variable
    pub name: String,
    /// Location where the variable was made read-only
    pub read_only_location: Location,
}

/// Error from unsetting a read-only variable
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("read-only variable `{name}` cannot be unset")]
pub struct UnsetError {
    /// Name of the read-only variable
    pub name: String,
    /// Location where the variable was made read-only
    pub read_only_location: Location,
}

/// Where a new variable binding is created
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Scope {
    /// Assign to the nearest existing binding; create in the base context if
    /// none exists.
    Global,
    /// Create or assign a binding in the current context.
    Local,
}

/// Positional parameters of one context
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PositionalParams {
    /// Parameter values, indexed from 0 although the shell counts from 1
    pub values: Vec<String>,
}

impl PositionalParams {
    /// Creates an empty parameter array.
    #[must_use]
    pub fn new() -> PositionalParams {
        Self::default()
    }

    /// Number of positional parameters (`$#`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no positional parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the parameter at the given 1-based index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// Discards the first `count` parameters.
    ///
    /// Returns false, leaving the parameters intact, if there are fewer than
    /// `count` of them.
    pub fn shift(&mut self, count: usize) -> bool {
        if count > self.values.len() {
            return false;
        }
        self.values.drain(..count);
        true
    }

    /// Replaces all parameters.
    pub fn set_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
    }
}

impl<S: Into<String>> FromIterator<S> for PositionalParams {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> PositionalParams {
        PositionalParams {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// One level of the context stack
#[derive(Clone, Debug, Default)]
struct Context {
    variables: HashMap<String, Variable>,
    /// `Some` in the base context and in contexts pushed for function calls
    positional_params: Option<PositionalParams>,
}

/// Collection of variables and positional parameters
#[derive(Clone, Debug)]
pub struct VariableSet {
    /// Context stack; the base context is first and never popped
    contexts: Vec<Context>,
}

impl Default for VariableSet {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableSet {
    /// Creates a variable set with an empty base context.
    #[must_use]
    pub fn new() -> VariableSet {
        VariableSet {
            contexts: vec![Context {
                variables: HashMap::new(),
                positional_params: Some(PositionalParams::new()),
            }],
        }
    }

    /// Looks up a variable, walking the contexts from the innermost out.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.contexts
            .iter()
            .rev()
            .find_map(|context| context.variables.get(name))
    }

    /// Returns the value of a variable if it is set to one.
    #[must_use]
    pub fn get_scalar(&self, name: &str) -> Option<&str> {
        self.get(name)?.value.as_deref()
    }

    /// Assigns a value to a variable.
    ///
    /// With [`Scope::Global`], the nearest existing binding is assigned, or
    /// a new one is created in the base context. With [`Scope::Local`], the
    /// binding in the current context is assigned or created, shadowing any
    /// outer one. The exported flag of an existing binding is preserved.
    pub fn assign(
        &mut self,
        scope: Scope,
        name: &str,
        value: String,
        location: Option<Location>,
    ) -> Result<(), AssignError> {
        let context_index = match scope {
            Scope::Global => self
                .contexts
                .iter()
                .rposition(|context| context.variables.contains_key(name))
                .unwrap_or(0),
            Scope::Local => self.contexts.len() - 1,
        };
        let variable = self.contexts[context_index]
            .variables
            .entry(name.to_string())
            .or_default();
        if let Some(read_only_location) = variable.read_only_location {
            return Err(AssignError {
                name: name.to_string(),
                read_only_location,
            });
        }
        variable.value = Some(value);
        variable.last_assigned_location = location;
        Ok(())
    }

    /// Sets the exported flag on a variable, creating a valueless binding if
    /// none exists.
    pub fn export(&mut self, name: &str) {
        let context_index = self
            .contexts
            .iter()
            .rposition(|context| context.variables.contains_key(name))
            .unwrap_or(0);
        self.contexts[context_index]
            .variables
            .entry(name.to_string())
            .or_default()
            .is_exported = true;
    }

    /// Makes a variable read-only, creating a valueless binding if none
    /// exists.
    pub fn make_read_only(&mut self, name: &str, location: Location) {
        let context_index = self
            .contexts
            .iter()
            .rposition(|context| context.variables.contains_key(name))
            .unwrap_or(0);
        self.contexts[context_index]
            .variables
            .entry(name.to_string())
            .or_default()
            .read_only_location = Some(location);
    }

    /// Removes the nearest binding of a variable.
    pub fn unset(&mut self, name: &str) -> Result<Option<Variable>, UnsetError> {
        let Some(context_index) = self
            .contexts
            .iter()
            .rposition(|context| context.variables.contains_key(name))
        else {
            return Ok(None);
        };
        let variable = &self.contexts[context_index].variables[name];
        if let Some(read_only_location) = variable.read_only_location {
            return Err(UnsetError {
                name: name.to_string(),
                read_only_location,
            });
        }
        Ok(self.contexts[context_index].variables.remove(name))
    }

    /// Iterates over the exported variables that have values, innermost
    /// binding of each name first.
    pub fn exported(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut seen = std::collections::HashSet::new();
        self.contexts
            .iter()
            .rev()
            .flat_map(|context| context.variables.iter())
            .filter(move |(name, _)| seen.insert(name.to_string()))
            .filter(|(_, variable)| variable.is_exported)
            .filter_map(|(name, variable)| {
                variable.value.as_deref().map(|value| (name.as_str(), value))
            })
    }

    /// Returns the positional parameters of the nearest context that has
    /// them.
    #[must_use]
    pub fn positional_params(&self) -> &PositionalParams {
        self.contexts
            .iter()
            .rev()
            .find_map(|context| context.positional_params.as_ref())
            .expect("the base context always has positional parameters")
    }

    /// Returns the positional parameters of the nearest context that has
    /// them, for modification.
    pub fn positional_params_mut(&mut self) -> &mut PositionalParams {
        self.contexts
            .iter_mut()
            .rev()
            .find_map(|context| context.positional_params.as_mut())
            .expect("the base context always has positional parameters")
    }

    /// Pushes a nested context.
    ///
    /// Pass `Some` to give the context its own positional parameters, as a
    /// function call does; pass `None` to share the outer ones.
    pub fn push_context(&mut self, positional_params: Option<PositionalParams>) {
        self.contexts.push(Context {
            variables: HashMap::new(),
            positional_params,
        });
    }

    /// Pops the innermost context.
    ///
    /// # Panics
    ///
    /// If only the base context remains.
    pub fn pop_context(&mut self) {
        assert!(self.contexts.len() > 1, "cannot pop the base context");
        self.contexts.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn assign_and_get() {
        let mut set = VariableSet::new();
        assert_eq!(set.get("x"), None);
        set.assign(Scope::Global, "x", "1".to_string(), None).unwrap();
        assert_eq!(set.get_scalar("x"), Some("1"));
    }

    #[test]
    fn reads_walk_outward() {
        let mut set = VariableSet::new();
        set.assign(Scope::Global, "x", "outer".to_string(), None).unwrap();
        set.push_context(None);
        assert_eq!(set.get_scalar("x"), Some("outer"));

        set.assign(Scope::Local, "x", "inner".to_string(), None).unwrap();
        assert_eq!(set.get_scalar("x"), Some("inner"));

        set.pop_context();
        assert_eq!(set.get_scalar("x"), Some("outer"));
    }

    #[test]
    fn global_assignment_targets_nearest_binding() {
        let mut set = VariableSet::new();
        set.assign(Scope::Global, "x", "base".to_string(), None).unwrap();
        set.push_context(None);
        set.assign(Scope::Global, "x", "changed".to_string(), None).unwrap();
        set.pop_context();
        assert_eq!(set.get_scalar("x"), Some("changed"));
    }

    #[test]
    fn global_assignment_without_binding_creates_in_base() {
        let mut set = VariableSet::new();
        set.push_context(None);
        set.assign(Scope::Global, "x", "1".to_string(), None).unwrap();
        set.pop_context();
        assert_eq!(set.get_scalar("x"), Some("1"));
    }

    #[test]
    fn read_only_rejects_assignment_and_unset() {
        let mut set = VariableSet::new();
        set.assign(Scope::Global, "x", "1".to_string(), None).unwrap();
        set.make_read_only("x", Location::dummy());

        assert_matches!(
            set.assign(Scope::Global, "x", "2".to_string(), None),
            Err(AssignError { name, .. }) => assert_eq!(name, "x")
        );
        assert_matches!(set.unset("x"), Err(UnsetError { name, .. }) => {
            assert_eq!(name, "x");
        });
        assert_eq!(set.get_scalar("x"), Some("1"));
    }

    #[test]
    fn unset_removes_nearest_binding() {
        let mut set = VariableSet::new();
        set.assign(Scope::Global, "x", "outer".to_string(), None).unwrap();
        set.push_context(None);
        set.assign(Scope::Local, "x", "inner".to_string(), None).unwrap();

        let removed = set.unset("x").unwrap().unwrap();
        assert_eq!(removed.value.as_deref(), Some("inner"));
        assert_eq!(set.get_scalar("x"), Some("outer"));
    }

    #[test]
    fn exported_iterates_effective_bindings() {
        let mut set = VariableSet::new();
        set.assign(Scope::Global, "a", "1".to_string(), None).unwrap();
        set.export("a");
        set.assign(Scope::Global, "b", "2".to_string(), None).unwrap();
        let exported: Vec<_> = set.exported().collect();
        assert_eq!(exported, [("a", "1")]);
    }

    #[test]
    fn positional_params_shift() {
        let mut params = PositionalParams::from_iter(["a", "b", "c"]);
        assert_eq!(params.len(), 3);
        assert_eq!(params.get(1), Some("a"));
        assert_eq!(params.get(3), Some("c"));
        assert_eq!(params.get(0), None);
        assert_eq!(params.get(4), None);

        assert!(params.shift(2));
        assert_eq!(params.get(1), Some("c"));
        assert!(!params.shift(2));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn function_context_has_its_own_positional_params() {
        let mut set = VariableSet::new();
        set.positional_params_mut().set_values(["x", "y"]);
        set.push_context(Some(PositionalParams::from_iter(["f1"])));
        assert_eq!(set.positional_params().len(), 1);
        set.push_context(None);
        assert_eq!(set.positional_params().len(), 1);
        set.pop_context();
        set.pop_context();
        assert_eq!(set.positional_params().len(), 2);
    }
}
