use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    ast::LiteralValue, interpreter::value::function::Closure, util::stack::ensure_sufficient_stack,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations.
///
/// Lists are shared: copying a list value copies the handle, so an element
/// assignment through one handle is visible through every other.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value. Produced by empty blocks, `if` without a
    /// matching branch and loops whose body never ran.
    Null,
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators (`<`, `==`, `!=`, etc.) and `not`.
    /// Used as conditions in `if` and `while`.
    Bool(bool),
    /// A numeric value (double precision floating-point). There is no separate
    /// integer type.
    Number(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// An ordered, mutable, shared sequence of values.
    List(Rc<RefCell<Vec<Self>>>),
    /// A function together with its defining scope.
    Function(Rc<Closure>),
}

impl Value {
    /// Wraps a vector into a new list value.
    #[must_use]
    pub fn list(items: Vec<Self>) -> Self {
        Self::List(Rc::new(RefCell::new(items)))
    }

    /// Returns the name of this value's kind, as used in error messages.
    ///
    /// # Example
    /// ```
    /// use itchy::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(1.0).kind(), "number");
    /// assert_eq!(Value::list(vec![]).kind(), "list");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Function(_) => "function",
        }
    }

    /// Truthiness used when conditions are not restricted to booleans.
    ///
    /// `null`, `false`, `0`, NaN, the empty string and the empty list are
    /// false. Everything else, functions included, is true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
            Self::List(items) => !items.borrow().is_empty(),
            Self::Function(_) => true,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v.into())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::list(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Null => Self::Null,
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::Str(s) => Self::Str(Rc::clone(s)),
        }
    }
}

/// Equality never fails: values of different kinds are simply unequal.
///
/// Lists compare element by element. Functions compare by identity, so a
/// closure equals only itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_nested(other, &mut Vec::new())
    }
}

/// Formats a number the way the language prints it: integral values without
/// a fractional part.
///
/// # Example
/// ```
/// use itchy::interpreter::value::core::format_number;
///
/// assert_eq!(format_number(17.0), "17");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(2.5), "2.5");
/// ```
#[must_use]
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        format!("{n}")
    }
}

type ListHandle = Rc<RefCell<Vec<Value>>>;

impl Value {
    /// Compares two values, tracking the pairs of lists already being
    /// compared. Meeting such a pair again means the lists are cyclic in the
    /// same shape, so that branch counts as equal.
    fn eq_nested(&self, other: &Self, open: &mut Vec<(ListHandle, ListHandle)>) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                if Rc::ptr_eq(a, b)
                   || open.iter().any(|(x, y)| Rc::ptr_eq(x, a) && Rc::ptr_eq(y, b))
                {
                    return true;
                }
                let (left, right) = (a.borrow(), b.borrow());
                if left.len() != right.len() {
                    return false;
                }
                open.push((Rc::clone(a), Rc::clone(b)));
                let equal = left.iter()
                                .zip(right.iter())
                                .all(|(x, y)| ensure_sufficient_stack(|| x.eq_nested(y, open)));
                open.pop();
                equal
            },
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Writes the value. Strings are quoted when nested inside a list, and a
    /// list that contains itself is printed as `[...]` at the point of
    /// recursion.
    fn write_nested(&self, f: &mut fmt::Formatter<'_>, open: &mut Vec<ListHandle>) -> fmt::Result {
        match self {
            Self::Str(s) if !open.is_empty() => write!(f, "{s:?}"),
            Self::List(items) => {
                if open.iter().any(|seen| Rc::ptr_eq(seen, items)) {
                    return write!(f, "[...]");
                }
                open.push(Rc::clone(items));
                write!(f, "[")?;
                for (index, value) in items.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    ensure_sufficient_stack(|| value.write_nested(f, open))?;
                }
                open.pop();
                write!(f, "]")
            },
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Str(s) => f.write_str(s),
            Self::List(_) => self.write_nested(f, &mut Vec::new()),
            Self::Function(closure) => write!(f, "{closure}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_print_nested_strings_quoted() {
        let value = Value::list(vec![Value::Number(1.0),
                                     Value::from("a"),
                                     Value::list(vec![Value::Null, Value::Bool(true)])]);
        assert_eq!(value.to_string(), r#"[1, "a", [null, true]]"#);
        assert_eq!(Value::from("a").to_string(), "a");
    }

    #[test]
    fn self_containing_list_prints() {
        let value = Value::list(vec![Value::Number(1.0)]);
        if let Value::List(items) = &value {
            items.borrow_mut().push(value.clone());
        }
        assert_eq!(value.to_string(), "[1, [...]]");
        if let Value::List(items) = &value {
            items.borrow_mut().clear();
        }
    }

    #[test]
    fn equality_across_kinds() {
        assert_eq!(Value::list(vec![1.0.into(), "x".into()]),
                   Value::list(vec![1.0.into(), "x".into()]));
        assert_ne!(Value::Number(1.0), Value::from("1"));
        assert_ne!(Value::Null, Value::Bool(false));
    }

    #[test]
    fn cyclic_lists_compare_without_overflow() {
        let cyclic = |head: f64| {
            let value = Value::list(vec![Value::Number(head)]);
            if let Value::List(items) = &value {
                items.borrow_mut().push(value.clone());
            }
            value
        };
        let (a, b, c) = (cyclic(1.0), cyclic(1.0), cyclic(2.0));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Value::list(vec![Value::Number(1.0), Value::list(vec![])]));

        for value in [a, b, c] {
            if let Value::List(items) = &value {
                items.borrow_mut().clear();
            }
        }
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::list(vec![]).is_truthy());
        assert!(Value::Number(-2.0).is_truthy());
        assert!(Value::list(vec![Value::Null]).is_truthy());
    }
}
