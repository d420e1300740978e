//! # itchy
//!
//! itchy is a small expression-oriented scripting language written in Rust.
//! Everything is an expression: blocks, conditionals, loops and assignments
//! all produce values. The crate lexes, parses and evaluates programs with
//! support for closures, lists, strings, destructuring and more.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use crate::interpreter::{
    lexer::{Position, Token},
    parser::parse_tokens,
};
pub use crate::{
    config::Config,
    error::Error,
    interpreter::{session::Interpreter, value::core::Value},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression, assignment target and operator types for all
///   language constructs.
/// - Attaches source positions to AST nodes for error reporting.
/// - Renders trees in a readable, indented form.
pub mod ast;
/// Options that control evaluation, such as the call depth limit and how
/// conditions are interpreted.
pub mod config;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running code. It
/// standardizes error reporting and carries detailed information about
/// failures, including error kinds, descriptions, and source positions.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line and column numbers to every error.
/// - Groups errors into coarse categories for callers that branch on them.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, scopes and value
/// representations to provide a complete runtime for source code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides a persistent session for running several programs.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numeric conversion and stack management.
///
/// # Responsibilities
/// - Convert between `f64`, `i64` and `usize` without silent data loss.
/// - Grow the stack on demand for deeply nested code.
pub mod util;

/// Splits source code into tokens, each paired with its position.
///
/// The returned vector always ends with [`Token::Eof`].
///
/// # Example
/// ```
/// use itchy::interpreter::lexer::Token;
///
/// let tokens = itchy::tokenize("x := 1").unwrap();
/// let kinds: Vec<&Token> = tokens.iter().map(|(token, _)| token).collect();
/// assert_eq!(kinds,
///            [&Token::Identifier("x".into()), &Token::ColonEquals, &Token::Number(1.0), &Token::Eof]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Position)>, Error> {
    Ok(interpreter::lexer::tokenize(source)?)
}

/// Parses source code into a program: a [`Block`](ast::Expr::Block) holding
/// the top-level expressions in order.
///
/// # Example
/// ```
/// use itchy::ast::Expr;
///
/// let program = itchy::parse("1 + 2\n3").unwrap();
/// let Expr::Block { body, .. } = program else { panic!("expected a block") };
/// assert_eq!(body.len(), 2);
///
/// assert!(itchy::parse("1 +").is_err());
/// ```
pub fn parse(source: &str) -> Result<ast::Expr, Error> {
    let tokens = interpreter::lexer::tokenize(source)?;
    Ok(parse_tokens(&tokens)?)
}

/// Runs a program with the default [`Config`] and returns the value of its
/// last top-level expression, or `null` for an empty program.
///
/// # Errors
/// Returns the first lexical, syntax or runtime error.
///
/// # Examples
/// ```
/// use itchy::evaluate;
///
/// let value = evaluate("x := 5; y := 10; x + y").unwrap();
/// assert_eq!(value.to_string(), "15");
///
/// // 'z' is never bound.
/// assert!(evaluate("z + 1").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Value, Error> {
    evaluate_with_config(source, Config::default())
}

/// Runs a program with the given options in a fresh global scope.
///
/// # Errors
/// Returns the first lexical, syntax or runtime error.
pub fn evaluate_with_config(source: &str, config: Config) -> Result<Value, Error> {
    Interpreter::new(config).execute(source)
}
