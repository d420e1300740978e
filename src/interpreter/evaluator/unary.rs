use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::Value,
    },
    util::num::usize_to_f64,
};

impl Context {
    /// Evaluates a unary operation such as negation or logical NOT.
    ///
    /// - `-x` and `+x` require a number; `+x` returns it unchanged.
    /// - `not x` requires a condition value (a boolean unless the truthy
    ///   policy is configured) and always produces a boolean.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `operand`: The expression the operator applies to.
    /// - `position`: Location of the operator, for error reporting.
    /// - `env`: Current scope.
    ///
    /// # Returns
    /// An `EvalResult<Value>` with the computed value.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                operand: &Expr,
                                position: Position,
                                env: &Environment)
                                -> EvalResult<Value> {
        let value = self.eval(operand, env)?;
        match op {
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => Err(RuntimeError::unary_type_error("`-`", other.kind(), position)),
            },
            UnaryOperator::Plus => match value {
                Value::Number(_) => Ok(value),
                other => Err(RuntimeError::unary_type_error("`+`", other.kind(), position)),
            },
            UnaryOperator::Not => Ok(Value::Bool(!self.condition(&value, "`not`", position)?)),
        }
    }

    /// Evaluates `#x`: the number of characters of a string or elements of a
    /// list.
    ///
    /// # Example
    /// ```
    /// assert_eq!(itchy::evaluate("#\"héllo\"").unwrap().to_string(), "5");
    /// assert_eq!(itchy::evaluate("#[1, [2, 3]]").unwrap().to_string(), "2");
    /// ```
    pub(crate) fn eval_length(&mut self,
                              operand: &Expr,
                              position: Position,
                              env: &Environment)
                              -> EvalResult<Value> {
        match self.eval(operand, env)? {
            Value::Str(s) => Ok(Value::Number(usize_to_f64(s.chars().count()))),
            Value::List(items) => Ok(Value::Number(usize_to_f64(items.borrow().len()))),
            other => Err(RuntimeError::unary_type_error("`#`", other.kind(), position)),
        }
    }
}
