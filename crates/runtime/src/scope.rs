//! Variable scopes and the chain of active scopes

use crate::error::{RuntimeError, RuntimeResult};
use crate::reference::Variable;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// The variables of one function invocation, or of the global program.
#[derive(Debug, Default)]
pub struct Scope {
    variables: RefCell<IndexMap<String, Rc<Variable>>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares each name not already declared. Existing variables keep their
    /// values.
    pub fn define_variables<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut variables = self.variables.borrow_mut();
        for name in names {
            let name = name.as_ref();
            if !variables.contains_key(name) {
                variables.insert(name.to_string(), Rc::new(Variable::new(name)));
            }
        }
    }

    pub fn define_variable(&self, name: &str) -> Rc<Variable> {
        self.variables
            .borrow_mut()
            .entry(name.to_string())
            .or_insert_with(|| Rc::new(Variable::new(name)))
            .clone()
    }

    /// Looks up a declared variable. An undeclared name reads as null: the
    /// returned variable is detached from the scope.
    pub fn get_variable(&self, name: &str) -> Rc<Variable> {
        if let Some(variable) = self.variables.borrow().get(name) {
            return variable.clone();
        }
        tracing::warn!(variable = %name, "Undefined variable");
        Rc::new(Variable::new(name))
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.borrow().contains_key(name)
    }

    pub fn variable_names(&self) -> Vec<String> {
        self.variables.borrow().keys().cloned().collect()
    }
}

/// The stack of active scopes; the top is the current one.
#[derive(Debug, Default)]
pub struct ScopeChain {
    scopes: RefCell<Vec<Rc<Scope>>>,
}

impl ScopeChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `scope` until the returned guard is dropped.
    pub fn push(&self, scope: Rc<Scope>) -> ScopeGuard<'_> {
        self.scopes.borrow_mut().push(scope);
        ScopeGuard { chain: self }
    }

    pub fn current(&self) -> RuntimeResult<Rc<Scope>> {
        self.scopes
            .borrow()
            .last()
            .cloned()
            .ok_or(RuntimeError::EmptyScopeChain)
    }

    pub fn depth(&self) -> usize {
        self.scopes.borrow().len()
    }

    fn pop(&self) -> Option<Rc<Scope>> {
        self.scopes.borrow_mut().pop()
    }
}

/// Pops the scope it was created for when dropped, including while a fault
/// unwinds through the caller.
#[must_use = "the scope is popped as soon as the guard is dropped"]
pub struct ScopeGuard<'a> {
    chain: &'a ScopeChain,
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.chain.pop();
    }
}
