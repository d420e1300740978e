use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation written in the source.
    ///
    /// `and` and `or` are handed to `eval_logic` before either side is
    /// evaluated, since they may skip the right operand. For every other
    /// operator the left operand is evaluated first, then the right, and the
    /// two values go to `eval_binary`.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The operator.
    /// - `right`: Right operand expression.
    /// - `position`: Location of the operator, for error reporting.
    /// - `env`: Current scope.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 position: Position,
                                 env: &Environment)
                                 -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(left, op, right, position, env);
        }

        let left = self.eval(left, env)?;
        let right = self.eval(right, env)?;
        self.eval_binary(op, &left, &right, position)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic operators go to `eval_arithmetic` and shifts to
    /// `eval_shift`. Relational and equality operators use `eval_comparison`.
    /// `and` and `or` have nothing left to short-circuit here and go to
    /// `eval_logic_values`, which honors the configured condition policy.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Location of the operator, for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use itchy::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, lexer::Position, value::core::Value},
    /// };
    ///
    /// let context = Context::default();
    /// let left = Value::Number(3.0);
    /// let right = Value::Number(4.0);
    ///
    /// let result = context.eval_binary(BinaryOperator::Add, &left, &right, Position::default());
    /// assert_eq!(result.unwrap(), Value::Number(7.0));
    /// ```
    pub fn eval_binary(&self,
                       op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       position: Position)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, FloorDiv, Greater, GreaterEqual, Less, LessEqual, Mod, Mul,
            NotEqual, Or, Pow, ShiftLeft, ShiftRight, Sub,
        };

        match op {
            Add | Sub | Mul | Div | FloorDiv | Mod | Pow => {
                Self::eval_arithmetic(op, left, right, position)
            },
            ShiftLeft | ShiftRight => Self::eval_shift(op, left, right, position),
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
                Self::eval_comparison(op, left, right, position)
            },
            And | Or => self.eval_logic_values(op, left, right, position),
        }
    }
}
