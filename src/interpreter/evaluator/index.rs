use std::mem;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::{format_number, Value},
    },
    util::num::{f64_to_i64_exact, resolve_index},
};

/// Turns an index value into a position inside a collection of `length`
/// elements. Negative indices count from the end.
fn element_index(index: &Value, length: usize, position: Position) -> EvalResult<usize> {
    let Value::Number(n) = index else {
        return Err(RuntimeError::TypeError { operation: "indexing".to_string(),
                                             found: format!("{} index", index.kind()),
                                             position });
    };
    let Some(requested) = f64_to_i64_exact(*n) else {
        return Err(RuntimeError::InvalidIndex { index: format_number(*n),
                                                position });
    };
    resolve_index(requested, length).ok_or(RuntimeError::IndexOutOfBounds { index: requested,
                                                                            length,
                                                                            position })
}

impl Context {
    /// Evaluates `collection[index]`.
    ///
    /// The collection is evaluated before the index.
    pub(crate) fn eval_index(&mut self,
                             collection: &Expr,
                             index: &Expr,
                             position: Position,
                             env: &Environment)
                             -> EvalResult<Value> {
        let collection = self.eval(collection, env)?;
        let index = self.eval(index, env)?;
        Self::read_element(&collection, &index, position)
    }

    /// Reads one element of a list, or one character of a string as a new
    /// one-character string.
    ///
    /// # Errors
    /// - `TypeError` if the collection is neither a list nor a string, or the
    ///   index is not a number.
    /// - `InvalidIndex` if the index is not an integer.
    /// - `IndexOutOfBounds` if it lies outside the collection.
    ///
    /// # Example
    /// ```
    /// use itchy::interpreter::{evaluator::core::Context, lexer::Position, value::core::Value};
    ///
    /// let word = Value::from("rust");
    /// let last = Context::read_element(&word, &Value::Number(-1.0), Position::default());
    /// assert_eq!(last.unwrap(), Value::from("t"));
    /// ```
    pub fn read_element(collection: &Value, index: &Value, position: Position) -> EvalResult<Value> {
        match collection {
            Value::List(items) => {
                let items = items.borrow();
                let at = element_index(index, items.len(), position)?;
                Ok(items[at].clone())
            },
            Value::Str(s) => {
                let length = s.chars().count();
                let at = element_index(index, length, position)?;
                Ok(s.chars()
                    .nth(at)
                    .map_or(Value::Null, |c| Value::from(c.to_string())))
            },
            other => Err(RuntimeError::unary_type_error("indexing", other.kind(), position)),
        }
    }

    /// Replaces one element of a list in place and returns the previous
    /// element. Every handle to the list observes the change.
    ///
    /// # Errors
    /// As [`Context::read_element`]; strings are immutable, so a string
    /// collection is a `TypeError` as well.
    pub fn write_element(collection: &Value,
                         index: &Value,
                         value: Value,
                         position: Position)
                         -> EvalResult<Value> {
        match collection {
            Value::List(items) => {
                let mut items = items.borrow_mut();
                let at = element_index(index, items.len(), position)?;
                Ok(mem::replace(&mut items[at], value))
            },
            other => Err(RuntimeError::unary_type_error("index assignment", other.kind(), position)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ErrorKind;

    fn numbers(values: &[f64]) -> Value {
        Value::list(values.iter().copied().map(Value::Number).collect())
    }

    #[test]
    fn negative_indices_count_from_the_end() {
        let list = numbers(&[1.0, 2.0, 3.0]);
        let at = |i: f64| Context::read_element(&list, &Value::Number(i), Position::default());

        assert_eq!(at(0.0), Ok(Value::Number(1.0)));
        assert_eq!(at(-1.0), Ok(Value::Number(3.0)));
        assert_eq!(at(-3.0), Ok(Value::Number(1.0)));
        assert_eq!(at(3.0).unwrap_err().kind(), ErrorKind::Index);
        assert_eq!(at(-4.0).unwrap_err().kind(), ErrorKind::Index);
    }

    #[test]
    fn fractional_and_non_numeric_indices_are_type_errors() {
        let list = numbers(&[1.0]);
        let half = Context::read_element(&list, &Value::Number(0.5), Position::default());
        let text = Context::read_element(&list, &Value::from("0"), Position::default());

        assert!(matches!(half, Err(RuntimeError::InvalidIndex { .. })));
        assert_eq!(text.unwrap_err().kind(), ErrorKind::Type);
    }

    #[test]
    fn strings_index_by_character() {
        let word = Value::from("añb");
        let middle = Context::read_element(&word, &Value::Number(1.0), Position::default());
        assert_eq!(middle, Ok(Value::from("ñ")));
    }

    #[test]
    fn writes_are_shared_and_return_the_old_element() {
        let list = numbers(&[1.0, 2.0]);
        let alias = list.clone();

        let old = Context::write_element(&list, &Value::Number(-1.0), Value::Null, Position::default());

        assert_eq!(old, Ok(Value::Number(2.0)));
        assert_eq!(alias.to_string(), "[1, null]");
    }

    #[test]
    fn strings_are_read_only() {
        let word = Value::from("abc");
        let result = Context::write_element(&word, &Value::Number(0.0), Value::from("z"), Position::default());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Type);
    }
}
