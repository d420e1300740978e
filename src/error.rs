/// Lexical errors.
///
/// Raised while turning source text into tokens: characters that start no
/// token, and block comments or string literals that are never closed.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree from
/// tokens. Parse errors include unexpected tokens, invalid assignment targets
/// and misplaced spread operators.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unknown
/// names, operand type mismatches, arity mismatches, bad indices, division by
/// zero and exhausted call depth.
pub mod runtime_error;

pub use lex_error::{LexError, LexErrorKind};
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

use crate::interpreter::lexer::Position;

/// Any failure produced while running a program.
///
/// Every phase reports through this type so callers can handle lexing,
/// parsing and evaluation failures uniformly. The wrapped error is displayed
/// unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The source text could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token stream does not match the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unterminated comment or string, an invalid character or a malformed
    /// number.
    Lex,
    /// Syntax error.
    Parse,
    /// A name that is bound in no enclosing scope.
    Name,
    /// An operation applied to values of unsupported kinds.
    Type,
    /// A call whose argument count differs from the parameter count.
    Arity,
    /// An index outside a collection, or a destructuring length mismatch.
    Index,
    /// Division or remainder by zero, or a shift out of range.
    Arithmetic,
    /// The call depth limit was exceeded.
    Resource,
}

impl Error {
    /// Returns the classification of this error.
    ///
    /// # Example
    /// ```
    /// use itchy::{error::ErrorKind, evaluate};
    ///
    /// let err = evaluate("1 + \"a\"").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Type);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex(_) => ErrorKind::Lex,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Runtime(err) => err.kind(),
        }
    }

    /// Returns the source position the error points at.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Lex(err) => err.position,
            Self::Parse(err) => err.position(),
            Self::Runtime(err) => err.position(),
        }
    }
}
