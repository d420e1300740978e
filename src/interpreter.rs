/// Lexically scoped variable storage.
///
/// Scopes form a chain from the innermost block out to the global scope.
/// Function values keep a handle to the scope they were created in, which is
/// what makes closures work.
///
/// # Responsibilities
/// - Resolves names through the scope chain.
/// - Rebinds existing variables in the scope that owns them.
/// - Binds parameters and fresh names in the innermost scope.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST, evaluates expressions, performs arithmetic
/// and logical operations, manages variable state, and produces results. It
/// is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates every kind of expression node.
/// - Calls closures and enforces the call depth limit.
/// - Reports runtime errors such as unknown names or invalid operands.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a meaningful language element such as a number, string,
/// identifier, operator or delimiter. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line and column.
/// - Handles numeric and string literals, keywords, identifiers and
///   operators.
/// - Skips whitespace and comments, and reports lexical errors.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs a single [`Block`](crate::ast::Expr::Block) holding the
/// program's top-level expressions.
///
/// # Responsibilities
/// - Applies operator precedence and associativity.
/// - Validates grammar, reporting errors with their location.
/// - Turns assignment left-hand sides into targets and patterns.
pub mod parser;
/// A persistent interpreter session.
///
/// Keeps one global scope alive across several programs.
pub mod session;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values a program can compute: `null`, booleans,
/// numbers, strings, lists and functions, along with their printed form,
/// equality and truthiness.
pub mod value;
