use thiserror::Error;

use crate::interpreter::lexer::Position;

/// The reason a piece of source text could not be tokenized.
///
/// `InvalidCharacter` is the default because the lexer reports it for any
/// input that matches no token pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
pub enum LexErrorKind {
    /// A character that cannot start any token.
    #[default]
    #[error("invalid character")]
    InvalidCharacter,
    /// A `\*` comment that reaches the end of input without `*\`.
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// A string literal interrupted by a newline or the end of input.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A decimal literal with more than one fractional part, like `1.2.3`.
    #[error("malformed number")]
    MalformedNumber,
}

/// A lexical error together with the offending text and its location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error on {position}: {kind} `{slice}`.")]
pub struct LexError {
    /// What went wrong.
    pub kind:     LexErrorKind,
    /// The source text that triggered the error.
    pub slice:    String,
    /// Where the offending text starts.
    pub position: Position,
}
