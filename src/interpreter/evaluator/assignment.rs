use tracing::trace;

use crate::{
    ast::{AssignOperator, AssignTarget, Expr, PatternElement},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `target := value` or `target =: value`.
    ///
    /// - `:=` stores the value and evaluates to it.
    /// - `=:` stores the value and evaluates to what the target held before.
    ///   The old value is read before the right-hand side is evaluated, so an
    ///   unknown name fails without side effects. A pattern's old value is the
    ///   pattern read back as a list literal, rest elements spread in place.
    ///
    /// Names are rebound in the nearest scope that already binds them, or
    /// bound in the current scope. Element targets evaluate the collection,
    /// then the index, then the value.
    ///
    /// # Parameters
    /// - `target`: Name, element or destructuring pattern.
    /// - `op`: `Define` or `Swap`.
    /// - `value`: The right-hand side expression.
    /// - `position`: Location of the assignment.
    /// - `env`: Current scope.
    ///
    /// # Example
    /// ```
    /// let result = itchy::evaluate("a := 1; b := (a =: 2); [a, b]").unwrap();
    /// assert_eq!(result.to_string(), "[2, 1]");
    /// ```
    pub(crate) fn eval_assignment(&mut self,
                                  target: &AssignTarget,
                                  op: AssignOperator,
                                  value: &Expr,
                                  position: Position,
                                  env: &Environment)
                                  -> EvalResult<Value> {
        match target {
            AssignTarget::Name(name) => {
                let old = match op {
                    AssignOperator::Define => None,
                    AssignOperator::Swap => Some(env.lookup(name, position)?),
                };
                let new = self.eval(value, env)?;
                trace!(name = name.as_str(), value = %new, "assign");
                env.define_or_update(name, new.clone());
                Ok(old.unwrap_or(new))
            },
            AssignTarget::Index { collection, index } => {
                let collection = self.eval(collection, env)?;
                let index = self.eval(index, env)?;
                if op == AssignOperator::Swap {
                    Self::read_element(&collection, &index, position)?;
                }
                let new = self.eval(value, env)?;
                let old = Self::write_element(&collection, &index, new.clone(), position)?;
                match op {
                    AssignOperator::Define => Ok(new),
                    AssignOperator::Swap => Ok(old),
                }
            },
            AssignTarget::Pattern(elements) => {
                let old = match op {
                    AssignOperator::Define => None,
                    AssignOperator::Swap => Some(self.read_pattern(elements, position, env)?),
                };
                let new = self.eval(value, env)?;
                self.destructure(elements, &new, position, env)?;
                Ok(old.unwrap_or(new))
            },
        }
    }

    /// Reads the current value of a target, as `=:` returns it.
    fn read_target(&mut self,
                   target: &AssignTarget,
                   position: Position,
                   env: &Environment)
                   -> EvalResult<Value> {
        match target {
            AssignTarget::Name(name) => env.lookup(name, position),
            AssignTarget::Index { collection, index } => {
                let collection = self.eval(collection, env)?;
                let index = self.eval(index, env)?;
                Self::read_element(&collection, &index, position)
            },
            AssignTarget::Pattern(elements) => self.read_pattern(elements, position, env),
        }
    }

    /// Reads a pattern back into a new list. A rest element must currently
    /// hold a list, whose items are spread into the result.
    fn read_pattern(&mut self,
                    elements: &[PatternElement],
                    position: Position,
                    env: &Environment)
                    -> EvalResult<Value> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                PatternElement::Single(target) => values.push(self.read_target(target, position, env)?),
                PatternElement::Rest(target) => match self.read_target(target, position, env)? {
                    Value::List(items) => values.extend(items.borrow().iter().cloned()),
                    other => {
                        return Err(RuntimeError::unary_type_error("`...`", other.kind(), position));
                    },
                },
            }
        }
        Ok(Value::list(values))
    }

    /// Stores `value` into a single target without evaluating a right-hand
    /// side. Used for the parts of a destructured value.
    fn bind_target(&mut self,
                   target: &AssignTarget,
                   value: Value,
                   position: Position,
                   env: &Environment)
                   -> EvalResult<()> {
        match target {
            AssignTarget::Name(name) => {
                env.define_or_update(name, value);
                Ok(())
            },
            AssignTarget::Index { collection, index } => {
                let collection = self.eval(collection, env)?;
                let index = self.eval(index, env)?;
                Self::write_element(&collection, &index, value, position).map(|_| ())
            },
            AssignTarget::Pattern(elements) => self.destructure(elements, &value, position, env),
        }
    }

    /// Splits a list, or a string into its characters, across the elements of
    /// a pattern.
    ///
    /// Without a rest element the number of values must equal the number of
    /// targets. With one, there must be at least as many values as single
    /// targets and the rest element receives the surplus as a new list, which
    /// may be empty. Nested patterns are destructured recursively.
    ///
    /// # Errors
    /// - `TypeError` if `value` is neither a list nor a string.
    /// - `DestructureMismatch` if the counts do not fit.
    fn destructure(&mut self,
                   elements: &[PatternElement],
                   value: &Value,
                   position: Position,
                   env: &Environment)
                   -> EvalResult<()> {
        let items: Vec<Value> = match value {
            Value::List(items) => items.borrow().clone(),
            Value::Str(s) => s.chars().map(|c| Value::from(c.to_string())).collect(),
            other => return Err(RuntimeError::unary_type_error("destructuring", other.kind(), position)),
        };

        let has_rest = elements.iter().any(|e| matches!(e, PatternElement::Rest(_)));
        let fixed = elements.len() - usize::from(has_rest);
        let fits = if has_rest { items.len() >= fixed } else { items.len() == fixed };
        if !fits {
            let expected = if has_rest { format!("at least {fixed}") } else { fixed.to_string() };
            return Err(RuntimeError::DestructureMismatch { expected,
                                                           found: items.len(),
                                                           position });
        }

        let surplus = items.len() - fixed;
        let mut items = items.into_iter();
        for element in elements {
            match element {
                PatternElement::Single(target) => {
                    let item = items.next().unwrap_or(Value::Null);
                    self.bind_target(target, item, position, env)?;
                },
                PatternElement::Rest(target) => {
                    let rest = items.by_ref().take(surplus).collect();
                    self.bind_target(target, Value::list(rest), position, env)?;
                },
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{error::ErrorKind, evaluate, Interpreter, Value};

    fn display(source: &str) -> String {
        evaluate(source).unwrap().to_string()
    }

    #[test]
    fn define_returns_the_new_value_and_swap_the_old() {
        assert_eq!(display("x := 3"), "3");
        assert_eq!(display("x := 3; x =: 4"), "3");
        assert_eq!(display("x := 3; x =: 4; x"), "4");
    }

    #[test]
    fn swap_requires_an_existing_binding() {
        let error = evaluate("fresh =: 1").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Name);
    }

    #[test]
    fn element_assignment() {
        assert_eq!(display("xs := [1, 2, 3]; xs[1] := 20; xs"), "[1, 20, 3]");
        assert_eq!(display("xs := [1, 2, 3]; xs[-1] =: 30"), "3");
        assert_eq!(evaluate("xs := [1]; xs[1] := 2").unwrap_err().kind(), ErrorKind::Index);
    }

    #[test]
    fn patterns_with_rest() {
        assert_eq!(display("[a, ...rest, b] := [1, 2, 3, 4]; [a, rest, b]"), "[1, [2, 3], 4]");
        assert_eq!(display("[a, ...rest] := [1]; rest"), "[]");
        assert_eq!(display("[first, ...others] := \"hey\"; others"), "[\"e\", \"y\"]");
    }

    #[test]
    fn nested_patterns() {
        assert_eq!(display("[[a, b], c] := [[1, 2], 3]; a + b + c"), "6");
    }

    #[test]
    fn swapping_a_pattern_returns_its_old_contents() {
        assert_eq!(display("a := 1; b := 2; [a, b] =: [3, 4]"), "[1, 2]");
        assert_eq!(display("a := 1; b := 2; [a, b] =: [b, a]; [a, b]"), "[2, 1]");
        assert_eq!(display("x := 0; rest := [8, 9]; [x, ...rest] =: [1, 2, 3]"), "[0, 8, 9]");
        assert_eq!(display("x := 0; rest := [8, 9]; [x, ...rest] =: [1, 2, 3]; rest"), "[2, 3]");
        assert_eq!(display("xs := [1, 2]; y := 5; [xs[0], [y]] =: [7, [6]]"), "[1, [5]]");
    }

    #[test]
    fn swapping_a_pattern_needs_readable_targets() {
        assert_eq!(evaluate("a := 1; [a, fresh] =: [1, 2]").unwrap_err().kind(), ErrorKind::Name);
        assert_eq!(evaluate("a := 1; [a, ...a] =: [1, 2]").unwrap_err().kind(), ErrorKind::Type);

        let mut interpreter = Interpreter::default();
        interpreter.execute("a := 1").unwrap();
        assert!(interpreter.execute("[a, fresh] =: [5, 6]").is_err());
        assert_eq!(interpreter.execute("a").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn pattern_mismatch() {
        assert_eq!(evaluate("[a, b] := [1]").unwrap_err().kind(), ErrorKind::Index);
        assert_eq!(evaluate("[a, ...b, c] := [1]").unwrap_err().kind(), ErrorKind::Index);
        assert_eq!(evaluate("[a] := 1").unwrap_err().kind(), ErrorKind::Type);
    }
}
