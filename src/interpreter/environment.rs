use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::Position, value::core::Value},
};

/// One level of the scope chain.
#[derive(Default)]
struct Scope {
    bindings: RefCell<HashMap<String, Value>>,
    parent:   Option<Environment>,
}

/// A handle to a scope and, through it, to all enclosing scopes.
///
/// Cloning the handle shares the scope. Closures keep such a handle, so they
/// see later updates to the variables of the scope they were created in.
///
/// # Example
/// ```
/// use itchy::interpreter::{environment::Environment, lexer::Position, value::core::Value};
///
/// let globals = Environment::new();
/// globals.define_or_update("x", Value::Number(1.0));
///
/// let inner = globals.child_scope();
/// inner.define_or_update("x", Value::Number(2.0));
/// inner.define_or_update("y", Value::Number(3.0));
///
/// assert_eq!(globals.lookup("x", Position::default()).unwrap(), Value::Number(2.0));
/// assert!(globals.lookup("y", Position::default()).is_err());
/// ```
#[derive(Clone, Default)]
pub struct Environment(Rc<Scope>);

impl Environment {
    /// Creates an empty scope with no parent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scope whose parent is this one.
    #[must_use]
    pub fn child_scope(&self) -> Self {
        Self(Rc::new(Scope { bindings: RefCell::default(),
                             parent:   Some(self.clone()), }))
    }

    /// Iterates over this scope and its ancestors, innermost first.
    fn chain(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |env| env.0.parent.as_ref())
    }

    /// Resolves `name`, searching this scope and then each ancestor.
    ///
    /// # Errors
    /// `UnknownVariable` if no scope in the chain binds `name`.
    pub fn lookup(&self, name: &str, position: Position) -> EvalResult<Value> {
        self.chain()
            .find_map(|env| env.0.bindings.borrow().get(name).cloned())
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           position })
    }

    /// Rebinds `name` in the nearest scope that already binds it, or binds it
    /// in this scope if no scope in the chain does.
    pub fn define_or_update(&self, name: &str, value: Value) {
        let target = self.chain()
                         .find(|env| env.0.bindings.borrow().contains_key(name))
                         .unwrap_or(self);
        target.define(name, value);
    }

    /// Binds `name` in this scope, shadowing any outer binding.
    pub fn define(&self, name: &str, value: Value) {
        self.0.bindings.borrow_mut().insert(name.to_string(), value);
    }

    /// Removes every binding of this scope. Ancestors are untouched.
    ///
    /// Closures stored in a scope usually capture that same scope, which forms
    /// a reference cycle; clearing the scope breaks it.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.0.bindings.borrow_mut());
        drop(removed);
    }

    /// Names bound directly in this scope, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.bindings.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
         .field("names", &self.names())
         .field("depth", &self.chain().count())
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn lookup_walks_the_chain() {
        let outer = Environment::new();
        outer.define("a", num(1.0));
        let inner = outer.child_scope().child_scope();
        assert_eq!(inner.lookup("a", Position::default()).unwrap(), num(1.0));
    }

    #[test]
    fn unknown_names_report_position() {
        let env = Environment::new();
        let err = env.lookup("nope", Position::new(3, 4)).unwrap_err();
        assert_eq!(err,
                   RuntimeError::UnknownVariable { name:     "nope".into(),
                                                   position: Position::new(3, 4), });
    }

    #[test]
    fn define_or_update_prefers_existing_binding() {
        let outer = Environment::new();
        outer.define("a", num(1.0));
        let inner = outer.child_scope();
        inner.define_or_update("a", num(2.0));
        inner.define_or_update("b", num(3.0));

        assert_eq!(outer.names(), vec!["a".to_string()]);
        assert_eq!(inner.names(), vec!["b".to_string()]);
        assert_eq!(outer.lookup("a", Position::default()).unwrap(), num(2.0));
    }

    #[test]
    fn define_shadows() {
        let outer = Environment::new();
        outer.define("a", num(1.0));
        let inner = outer.child_scope();
        inner.define("a", num(5.0));
        assert_eq!(inner.lookup("a", Position::default()).unwrap(), num(5.0));
        assert_eq!(outer.lookup("a", Position::default()).unwrap(), num(1.0));
    }

    #[test]
    fn clear_only_touches_one_scope() {
        let outer = Environment::new();
        outer.define("a", num(1.0));
        let inner = outer.child_scope();
        inner.define("b", num(2.0));
        inner.clear();
        assert!(!inner.names().contains(&"b".to_string()));
        assert_eq!(inner.lookup("a", Position::default()).unwrap(), num(1.0));
    }
}
