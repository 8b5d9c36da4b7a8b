use std::collections::HashMap;

use log::{debug, trace};

use crate::ast::types::{FunctionType, Type};

use super::stdlib::{STDLIB, STDLIB_VERSION};

/// A single scope: one function's (or the standard library's) flat name to type map.
#[derive(Debug)]
pub struct Environment {
    pub name: String,
    /// The signature of the function this scope is the body of, if any.
    pub function: Option<FunctionType>,
    variable_lookup: HashMap<String, Type>,
}

impl Environment {
    pub fn new(name: &str, function: Option<FunctionType>) -> Self {
        Environment {
            name: name.to_string(),
            function,
            variable_lookup: HashMap::new(),
        }
    }

    pub fn declare(&mut self, name: &str, ty: Type) -> bool {
        if self.variable_lookup.contains_key(name) {
            false
        } else {
            self.variable_lookup.insert(name.to_string(), ty);
            true
        }
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.variable_lookup.get(name)
    }

    pub fn len(&self) -> usize {
        self.variable_lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variable_lookup.is_empty()
    }
}

/// Stack of scopes. The bottom scope holds the standard library and is never popped.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Environment>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut stdlib = Environment::new("", None);
        for (name, function) in STDLIB.iter() {
            stdlib.declare(name, Type::Function(function.clone()));
        }

        debug!(
            "seeded standard library v{} with {} routines",
            STDLIB_VERSION,
            stdlib.len()
        );

        SymbolTable {
            scopes: vec![stdlib],
        }
    }

    /// Pushes an anonymous, empty scope.
    pub fn enter(&mut self) {
        self.scopes.push(Environment::new("", None));
    }

    /// Pushes the body scope of function `name`.
    pub fn enter_function(&mut self, name: &str, function: FunctionType) {
        debug!("entering scope of `{}` at depth {}", name, self.scopes.len());
        self.scopes.push(Environment::new(name, Some(function)));
    }

    /// Binds `name` in the current scope. Returns false, leaving the scope untouched, if the
    /// name is already bound there. Bindings in outer scopes are shadowed, not conflicts.
    pub fn add(&mut self, name: &str, ty: Type) -> bool {
        trace!("adding `{}`: {}", name, ty);
        self.current_mut().declare(name, ty)
    }

    /// Finds the innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Pops the current scope and all of its bindings.
    ///
    /// # Panics
    ///
    /// Panics if only the standard library scope is left.
    pub fn exit(&mut self) {
        assert!(
            self.scopes.len() > 1,
            "attempted to pop the standard library scope"
        );
        if let Some(scope) = self.scopes.pop() {
            if !scope.name.is_empty() {
                debug!("leaving scope of `{}`", scope.name);
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Whether the current scope is the standard library scope, i.e. no function is open.
    pub fn is_at_root(&self) -> bool {
        self.scopes.len() == 1
    }

    pub fn current(&self) -> &Environment {
        // The bottom scope is never popped
        &self.scopes[self.scopes.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Environment {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// The name and signature of the innermost function whose body is being checked.
    pub fn current_function(&self) -> Option<(&str, &FunctionType)> {
        self.scopes.iter().rev().find_map(|scope| {
            scope
                .function
                .as_ref()
                .map(|function| (scope.name.as_str(), function))
        })
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
