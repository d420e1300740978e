/// Entry points: whole programs, expressions and the keyword constructs
/// (`if`, `while`, `function`).
pub mod core;

/// Assignment parsing.
///
/// Turns the left side of `:=` and `=:` into an assignment target: a name, an
/// indexed element, or a destructuring pattern.
pub mod assignment;

/// Binary operator parsing.
///
/// One function per precedence level, from `or` down to `**`.
pub mod binary;

/// Unary, postfix and primary expressions.
pub mod unary;

/// Brace-delimited blocks.
pub mod block;

/// Shared helpers: separators, expected tokens and comma-separated lists.
pub mod utils;

use crate::interpreter::{
    lexer::{Position, Token},
    parser::core::{ParseResult, parse_program},
};

/// Parses a complete token sequence, as produced by
/// [`tokenize`](crate::interpreter::lexer::tokenize), into a program.
///
/// # Errors
/// Returns the first [`ParseError`](crate::error::ParseError) encountered.
pub fn parse_tokens(tokens: &[(Token, Position)]) -> ParseResult<crate::ast::Expr> {
    parse_program(&mut tokens.iter().peekable())
}
