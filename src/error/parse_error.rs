use thiserror::Error;

use crate::interpreter::lexer::Position;

/// Represents all errors that can occur while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token the grammar does not allow at this point.
    #[error("Error on {position}: Expected {expected}, found {found}.")]
    UnexpectedToken {
        /// Description of what the parser was looking for.
        expected: String,
        /// Description of the token actually found.
        found:    String,
        /// Location of the found token.
        position: Position,
    },
    /// The left side of `:=` or `=:` cannot receive a value.
    #[error("Error on {position}: Cannot assign to {target}.")]
    InvalidAssignmentTarget {
        /// Description of the rejected target.
        target:   String,
        /// Location of the assignment operator.
        position: Position,
    },
    /// `...` used outside a list literal or an argument list.
    #[error("Error on {position}: The spread operator `...` is only allowed inside list literals and argument lists.")]
    MisplacedSpread {
        /// Location of the `...` token.
        position: Position,
    },
    /// A destructuring pattern with more than one `...` element.
    #[error("Error on {position}: A destructuring pattern may contain at most one `...` element.")]
    MultipleSpreads {
        /// Location of the second `...` element.
        position: Position,
    },
    /// Tokens left over after the program was complete.
    #[error("Error on {position}: Unexpected {found} after the end of the program.")]
    TrailingTokens {
        /// Description of the first leftover token.
        found:    String,
        /// Location of that token.
        position: Position,
    },
}

impl ParseError {
    /// Returns the location this error points at.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::InvalidAssignmentTarget { position, .. }
            | Self::MisplacedSpread { position }
            | Self::MultipleSpreads { position }
            | Self::TrailingTokens { position, .. } => *position,
        }
    }
}
