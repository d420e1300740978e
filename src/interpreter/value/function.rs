use std::{fmt, rc::Rc};

use crate::{ast::Expr, interpreter::environment::Environment};

/// A function value: the parameters and body of a function literal plus the
/// scope that was current when the literal was evaluated.
///
/// The scope is held by reference, so later changes to variables in it are
/// visible when the closure runs.
pub struct Closure {
    /// Parameter names, in declaration order.
    pub params: Rc<[String]>,
    /// The function body.
    pub body:   Rc<Expr>,
    /// The defining scope.
    pub env:    Environment,
}

impl Closure {
    /// Number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

// The captured scope may contain this closure, so it is left out.
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
         .field("params", &self.params)
         .finish_non_exhaustive()
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function({})>", self.params.join(", "))
    }
}
