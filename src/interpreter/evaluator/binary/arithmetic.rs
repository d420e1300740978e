use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::Value,
    },
    util::num::{MAX_SAFE_U64_INT, f64_to_i64_exact, i64_to_f64},
};

impl Context {
    /// Evaluates an arithmetic operator on two values.
    ///
    /// All arithmetic operators accept two numbers. `+` additionally joins two
    /// strings into a new string and two lists into a new list; neither
    /// operand is modified. Any other combination of kinds is a type error,
    /// there are no implicit conversions.
    ///
    /// # Parameters
    /// - `op`: One of `+ - * / // % **`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Location of the operator, for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed value.
    ///
    /// # Example
    /// ```
    /// use itchy::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, lexer::Position, value::core::Value},
    /// };
    ///
    /// let a = Value::from("foo");
    /// let b = Value::from("bar");
    ///
    /// let result = Context::eval_arithmetic(BinaryOperator::Add, &a, &b, Position::default());
    /// assert_eq!(result.unwrap(), Value::from("foobar"));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           position: Position)
                           -> EvalResult<Value> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => {
                Self::eval_number_op(op, *a, *b, position).map(Value::Number)
            },
            (Value::Str(a), Value::Str(b)) if op == BinaryOperator::Add => {
                Ok(Value::from(format!("{a}{b}")))
            },
            (Value::List(a), Value::List(b)) if op == BinaryOperator::Add => {
                let mut joined = a.borrow().clone();
                joined.extend(b.borrow().iter().cloned());
                Ok(Value::list(joined))
            },
            _ => Err(RuntimeError::binary_type_error(op, left.kind(), right.kind(), position)),
        }
    }

    /// Applies an arithmetic operator to two numbers.
    ///
    /// `%` keeps the sign of the dividend, `//` rounds the quotient towards
    /// negative infinity and `**` follows `f64::powf`.
    ///
    /// # Errors
    /// `DivisionByZero` for `/`, `//` and `%` with a zero divisor.
    ///
    /// # Example
    /// ```
    /// use itchy::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, lexer::Position},
    /// };
    ///
    /// let position = Position::default();
    /// assert_eq!(Context::eval_number_op(BinaryOperator::FloorDiv, -7.0, 2.0, position), Ok(-4.0));
    /// assert_eq!(Context::eval_number_op(BinaryOperator::Mod, -7.0, 2.0, position), Ok(-1.0));
    /// assert!(Context::eval_number_op(BinaryOperator::Div, 1.0, 0.0, position).is_err());
    /// ```
    pub fn eval_number_op(op: BinaryOperator, a: f64, b: f64, position: Position) -> EvalResult<f64> {
        use BinaryOperator::{Add, Div, FloorDiv, Mod, Mul, Pow, Sub};

        if matches!(op, Div | FloorDiv | Mod) && b == 0.0 {
            return Err(RuntimeError::DivisionByZero { position });
        }

        match op {
            Add => Ok(a + b),
            Sub => Ok(a - b),
            Mul => Ok(a * b),
            Div => Ok(a / b),
            FloorDiv => Ok((a / b).floor()),
            Mod => Ok(a % b),
            Pow => Ok(a.powf(b)),
            _ => Err(RuntimeError::binary_type_error(op, "number", "number", position)),
        }
    }

    /// Evaluates `<<` or `>>` on two integers.
    ///
    /// `a << n` multiplies by `2^n` and `a >> n` divides by `2^n`, rounding
    /// towards negative infinity.
    ///
    /// # Errors
    /// - `TypeError` unless both operands are numbers with integer values.
    /// - `InvalidShift` for a negative shift amount, or a left shift whose
    ///   result lies beyond `2^53 - 1` in absolute value.
    ///
    /// # Example
    /// ```
    /// use itchy::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, lexer::Position, value::core::Value},
    /// };
    ///
    /// let position = Position::default();
    /// let shifted = Context::eval_shift(BinaryOperator::ShiftLeft, &Value::Number(3.0), &Value::Number(4.0), position);
    /// assert_eq!(shifted.unwrap(), Value::Number(48.0));
    ///
    /// let shifted = Context::eval_shift(BinaryOperator::ShiftRight, &Value::Number(-5.0), &Value::Number(1.0), position);
    /// assert_eq!(shifted.unwrap(), Value::Number(-3.0));
    /// ```
    pub fn eval_shift(op: BinaryOperator,
                      left: &Value,
                      right: &Value,
                      position: Position)
                      -> EvalResult<Value> {
        let (Value::Number(a), Value::Number(b)) = (left, right) else {
            return Err(RuntimeError::binary_type_error(op, left.kind(), right.kind(), position));
        };
        let (Some(value), Some(amount)) = (f64_to_i64_exact(*a), f64_to_i64_exact(*b)) else {
            return Err(RuntimeError::unary_type_error(format!("`{op}`"),
                                                      "non-integer number",
                                                      position));
        };
        let invalid = || RuntimeError::InvalidShift { value,
                                                      amount,
                                                      position };
        if amount < 0 {
            return Err(invalid());
        }

        let shifted = match op {
            BinaryOperator::ShiftLeft if value == 0 => 0,
            BinaryOperator::ShiftLeft => {
                let factor = u32::try_from(amount).ok().and_then(|n| 2_i64.checked_pow(n));
                factor.and_then(|factor| value.checked_mul(factor))
                      .filter(|n| n.unsigned_abs() <= MAX_SAFE_U64_INT)
                      .ok_or_else(invalid)?
            },
            BinaryOperator::ShiftRight => value >> amount.min(63),
            _ => return Err(RuntimeError::binary_type_error(op, "number", "number", position)),
        };
        Ok(Value::Number(i64_to_f64(shifted)))
    }
}
