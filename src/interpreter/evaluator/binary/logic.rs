use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::Value,
    },
};

/// Returns `true` if the left operand alone settles the result of `op`.
const fn left_decides(op: BinaryOperator, truth: bool) -> bool {
    matches!((op, truth), (BinaryOperator::And, false) | (BinaryOperator::Or, true))
}

impl Context {
    /// Evaluates `left and right` or `left or right`.
    ///
    /// The left operand is evaluated first and must be a condition. If it
    /// decides the result (`false` for `and`, `true` for `or`) it is returned
    /// and the right operand is never evaluated. Otherwise the value of the
    /// right operand is returned unchanged.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: `And` or `Or`.
    /// - `right`: Right operand expression.
    /// - `position`: Location of the operator, for error reporting.
    /// - `env`: Current scope.
    ///
    /// # Returns
    /// An `EvalResult<Value>` holding whichever operand decided the result.
    ///
    /// # Example
    /// ```
    /// assert_eq!(itchy::evaluate("false and (1 / 0)").unwrap().to_string(), "false");
    /// assert_eq!(itchy::evaluate("true or undefined_name").unwrap().to_string(), "true");
    /// assert!(itchy::evaluate("1 and true").is_err());
    /// ```
    pub(crate) fn eval_logic(&mut self,
                             left: &Expr,
                             op: BinaryOperator,
                             right: &Expr,
                             position: Position,
                             env: &Environment)
                             -> EvalResult<Value> {
        let left = self.eval(left, env)?;
        let truth = self.condition(&left, logic_context(op), position)?;

        if left_decides(op, truth) {
            Ok(left)
        } else {
            self.eval(right, env)
        }
    }

    /// Applies `and` or `or` to two values that are already evaluated.
    ///
    /// The left value is judged like the left operand of a written `and` or
    /// `or`: it must be a boolean under the strict policy and may be any
    /// value under the truthy one. The right value is returned as is when the
    /// left does not decide the result.
    ///
    /// # Example
    /// ```
    /// use itchy::{
    ///     ast::BinaryOperator,
    ///     config::{ConditionPolicy, Config},
    ///     interpreter::{evaluator::core::Context, lexer::Position, value::core::Value},
    /// };
    ///
    /// let a = Value::Bool(true);
    /// let b = Value::Number(5.0);
    ///
    /// let strict = Context::default();
    /// let result = strict.eval_logic_values(BinaryOperator::And, &a, &b, Position::default());
    /// assert_eq!(result.unwrap(), Value::Number(5.0));
    ///
    /// let zero = Value::Number(0.0);
    /// assert!(strict.eval_logic_values(BinaryOperator::Or, &zero, &b, Position::default()).is_err());
    ///
    /// let truthy = Context::new(Config::default().with_condition_policy(ConditionPolicy::Truthy));
    /// let result = truthy.eval_logic_values(BinaryOperator::Or, &zero, &b, Position::default());
    /// assert_eq!(result.unwrap(), Value::Number(5.0));
    /// ```
    pub fn eval_logic_values(&self,
                             op: BinaryOperator,
                             left: &Value,
                             right: &Value,
                             position: Position)
                             -> EvalResult<Value> {
        let truth = self.condition(left, logic_context(op), position)?;

        if left_decides(op, truth) {
            Ok(left.clone())
        } else {
            Ok(right.clone())
        }
    }
}

const fn logic_context(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::Or => "`or` operand",
        _ => "`and` operand",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::{ConditionPolicy, Config},
        error::RuntimeError,
    };

    #[test]
    fn evaluated_operands_follow_the_condition_policy() {
        let position = Position::default();
        let (empty, fallback) = (Value::from(""), Value::from("fallback"));

        let truthy = Context::new(Config::default().with_condition_policy(ConditionPolicy::Truthy));
        assert_eq!(truthy.eval_binary(BinaryOperator::Or, &empty, &fallback, position),
                   Ok(fallback.clone()));
        assert_eq!(truthy.eval_binary(BinaryOperator::And, &empty, &fallback, position),
                   Ok(empty.clone()));

        let strict = Context::default();
        assert_eq!(strict.eval_binary(BinaryOperator::Or, &empty, &fallback, position),
                   Err(RuntimeError::ExpectedBoolean { context: "`or` operand",
                                                       found: "string",
                                                       position }));
    }
}
