use tracing::warn;

use crate::{
    ast::Expr,
    config::ConditionPolicy,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::Value,
    },
};

impl Context {
    /// Interprets a value as a condition.
    ///
    /// Under [`ConditionPolicy::Strict`] only booleans are accepted. Under
    /// [`ConditionPolicy::Truthy`] every value is accepted and judged by
    /// [`Value::is_truthy`].
    ///
    /// # Parameters
    /// - `value`: The evaluated condition.
    /// - `context`: Where the condition is used, for the error message.
    /// - `position`: Location of the condition.
    ///
    /// # Errors
    /// `ExpectedBoolean` for a non-boolean under the strict policy.
    pub(crate) fn condition(&self,
                            value: &Value,
                            context: &'static str,
                            position: Position)
                            -> EvalResult<bool> {
        match (value, self.config.condition_policy) {
            (Value::Bool(b), _) => Ok(*b),
            (other, ConditionPolicy::Truthy) => Ok(other.is_truthy()),
            (other, ConditionPolicy::Strict) => Err(RuntimeError::ExpectedBoolean { context,
                                                                                    found: other.kind(),
                                                                                    position }),
        }
    }

    /// Evaluates the elements of a list literal or argument list left to
    /// right, expanding `...` elements in place.
    ///
    /// # Errors
    /// `TypeError` if a spread operand is not a list; any error raised by an
    /// element.
    pub(crate) fn eval_elements(&mut self,
                                elements: &[Expr],
                                env: &Environment)
                                -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            if let Expr::Spread { operand, position } = element {
                match self.eval(operand, env)? {
                    Value::List(items) => values.extend(items.borrow().iter().cloned()),
                    other => {
                        return Err(RuntimeError::unary_type_error("`...`", other.kind(), *position));
                    },
                }
            } else {
                values.push(self.eval(element, env)?);
            }
        }
        Ok(values)
    }

    /// Records entry into a function call.
    ///
    /// Every successful call must be paired with a decrement of `depth` once
    /// the body has been evaluated.
    ///
    /// # Errors
    /// `RecursionLimit` if the configured maximum depth is already reached.
    pub(crate) fn enter_call(&mut self, position: Position) -> EvalResult<()> {
        if let Some(limit) = self.config.max_call_depth {
            if self.depth >= limit {
                warn!(limit, %position, "call depth limit reached");
                return Err(RuntimeError::RecursionLimit { limit, position });
            }
        }
        self.depth += 1;
        Ok(())
    }
}
