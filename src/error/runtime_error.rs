use thiserror::Error;

use crate::{error::ErrorKind, interpreter::lexer::Position};

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Looked up a name that is bound in no enclosing scope.
    #[error("Error on {position}: Unknown variable `{name}`.")]
    UnknownVariable {
        /// The name of the variable.
        name:     String,
        /// Where the name was used.
        position: Position,
    },
    /// An operation applied to operands of unsupported kinds.
    #[error("Error on {position}: Unsupported operand type(s) for {operation}: {found}.")]
    TypeError {
        /// The operator or operation, e.g. `` `+` `` or `indexing`.
        operation: String,
        /// The kinds of the offending operands, e.g. `number and string`.
        found:     String,
        /// Where the operation appears.
        position:  Position,
    },
    /// A condition evaluated to something other than a boolean.
    #[error("Error on {position}: Expected a boolean in {context}, found {found}.")]
    ExpectedBoolean {
        /// Where the condition was used, e.g. `` `if` condition ``.
        context:  &'static str,
        /// The kind of the value found.
        found:    &'static str,
        /// Where the condition appears.
        position: Position,
    },
    /// Called a value that is not a function.
    #[error("Error on {position}: Value of kind {found} is not callable.")]
    NotCallable {
        /// The kind of the callee.
        found:    &'static str,
        /// Where the call appears.
        position: Position,
    },
    /// The number of arguments does not match the number of parameters.
    #[error("Error on {position}: Function expects {expected} argument(s), but {found} were given.")]
    ArgumentCountMismatch {
        /// Declared parameter count.
        expected: usize,
        /// Argument count after spread expansion.
        found:    usize,
        /// Where the call appears.
        position: Position,
    },
    /// `/`, `//` or `%` with a zero divisor.
    #[error("Error on {position}: Division by zero.")]
    DivisionByZero {
        /// Where the operator appears.
        position: Position,
    },
    /// A shift by a negative amount, or a left shift whose result is too large
    /// to be represented exactly.
    #[error("Error on {position}: Cannot shift {value} by {amount}.")]
    InvalidShift {
        /// The integer being shifted.
        value:    i64,
        /// The shift amount.
        amount:   i64,
        /// Where the operator appears.
        position: Position,
    },
    /// An index that is a number but not an integer.
    #[error("Error on {position}: Index {index} is not an integer.")]
    InvalidIndex {
        /// The rendered index value.
        index:    String,
        /// Where the indexing appears.
        position: Position,
    },
    /// An index outside the collection.
    #[error("Error on {position}: Index {index} is out of bounds for length {length}.")]
    IndexOutOfBounds {
        /// The index as written, before negative indices were resolved.
        index:    i64,
        /// Length of the indexed collection.
        length:   usize,
        /// Where the indexing appears.
        position: Position,
    },
    /// A destructuring pattern that does not fit the assigned value.
    #[error("Error on {position}: Cannot destructure {found} value(s) into {expected} target(s).")]
    DestructureMismatch {
        /// Number of targets, rendered as `n` or `at least n`.
        expected: String,
        /// Number of values available.
        found:    usize,
        /// Where the assignment appears.
        position: Position,
    },
    /// `...` reached the evaluator outside a list literal or argument list.
    #[error("Error on {position}: The spread operator `...` cannot be evaluated on its own.")]
    MisplacedSpread {
        /// Location of the spread.
        position: Position,
    },
    /// Too many nested function calls.
    #[error("Error on {position}: Maximum call depth of {limit} exceeded.")]
    RecursionLimit {
        /// The configured depth limit.
        limit:    usize,
        /// Where the failing call appears.
        position: Position,
    },
}

impl RuntimeError {
    /// Returns the error category used by [`crate::Error::kind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownVariable { .. } => ErrorKind::Name,
            Self::TypeError { .. }
            | Self::ExpectedBoolean { .. }
            | Self::NotCallable { .. }
            | Self::InvalidIndex { .. }
            | Self::MisplacedSpread { .. } => ErrorKind::Type,
            Self::ArgumentCountMismatch { .. } => ErrorKind::Arity,
            Self::IndexOutOfBounds { .. } | Self::DestructureMismatch { .. } => ErrorKind::Index,
            Self::DivisionByZero { .. } | Self::InvalidShift { .. } => ErrorKind::Arithmetic,
            Self::RecursionLimit { .. } => ErrorKind::Resource,
        }
    }

    /// Returns the location this error points at.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnknownVariable { position, .. }
            | Self::TypeError { position, .. }
            | Self::ExpectedBoolean { position, .. }
            | Self::NotCallable { position, .. }
            | Self::ArgumentCountMismatch { position, .. }
            | Self::DivisionByZero { position }
            | Self::InvalidShift { position, .. }
            | Self::InvalidIndex { position, .. }
            | Self::IndexOutOfBounds { position, .. }
            | Self::DestructureMismatch { position, .. }
            | Self::MisplacedSpread { position }
            | Self::RecursionLimit { position, .. } => *position,
        }
    }

    /// Builds a [`RuntimeError::TypeError`] for a binary operation.
    pub(crate) fn binary_type_error(operation: impl std::fmt::Display,
                                    left: &'static str,
                                    right: &'static str,
                                    position: Position)
                                    -> Self {
        Self::TypeError { operation: format!("`{operation}`"),
                          found: format!("{left} and {right}"),
                          position }
    }

    /// Builds a [`RuntimeError::TypeError`] for an operation on a single value.
    pub(crate) fn unary_type_error(operation: impl Into<String>,
                                   found: &'static str,
                                   position: Position)
                                   -> Self {
        Self::TypeError { operation: operation.into(),
                          found: found.to_string(),
                          position }
    }
}
