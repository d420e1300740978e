use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, ComparisonLink, Expr},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::Value,
    },
};

/// Maps an ordering to the result of a relational operator.
///
/// `None` stands for an unordered pair (a NaN operand), for which every
/// relational operator is false.
fn ordering_satisfies(op: BinaryOperator, ordering: Option<Ordering>) -> bool {
    use BinaryOperator::{Greater, GreaterEqual, Less, LessEqual};

    let Some(ordering) = ordering else {
        return false;
    };
    match op {
        Less => ordering.is_lt(),
        LessEqual => ordering.is_le(),
        Greater => ordering.is_gt(),
        GreaterEqual => ordering.is_ge(),
        _ => false,
    }
}

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `==` and `!=` accept values of any kinds and never fail: values of
    /// different kinds are simply unequal. The relational operators compare
    /// two numbers or two strings (lexicographically by code point); any other
    /// pair of kinds is a type error.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `position`: Location of the operator, for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use itchy::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, lexer::Position, value::core::Value},
    /// };
    ///
    /// let a = Value::Number(3.0);
    /// let b = Value::Number(5.0);
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less, &a, &b, Position::default());
    ///
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           position: Position)
                           -> EvalResult<Value> {
        match op {
            BinaryOperator::Equal => Ok(Value::Bool(left == right)),
            BinaryOperator::NotEqual => Ok(Value::Bool(left != right)),
            _ => {
                let ordering = match (left, right) {
                    (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                    (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
                    _ => {
                        return Err(RuntimeError::binary_type_error(op,
                                                                   left.kind(),
                                                                   right.kind(),
                                                                   position));
                    },
                };
                Ok(Value::Bool(ordering_satisfies(op, ordering)))
            },
        }
    }

    /// Evaluates a comparison chain such as `a < b <= c`.
    ///
    /// Operands are evaluated left to right, each exactly once, and every
    /// adjacent pair is compared with `eval_comparison`. The first pair that
    /// does not hold makes the chain `false` without evaluating the operands
    /// after it.
    ///
    /// # Example
    /// ```
    /// assert_eq!(itchy::evaluate("1 < 2 < 3").unwrap().to_string(), "true");
    /// assert_eq!(itchy::evaluate("3 > 2 > 2").unwrap().to_string(), "false");
    /// assert_eq!(itchy::evaluate("1 > 2 > undefined_name").unwrap().to_string(), "false");
    /// ```
    pub(crate) fn eval_comparison_chain(&mut self,
                                        first: &Expr,
                                        links: &[ComparisonLink],
                                        env: &Environment)
                                        -> EvalResult<Value> {
        let mut left = self.eval(first, env)?;
        for link in links {
            let right = self.eval(&link.operand, env)?;
            if Self::eval_comparison(link.op, &left, &right, link.position)? != Value::Bool(true) {
                return Ok(Value::Bool(false));
            }
            left = right;
        }
        Ok(Value::Bool(true))
    }
}
