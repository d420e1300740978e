/// Core evaluation logic for expressions and values.
///
/// Contains the evaluation context, the dispatch over expression kinds, and
/// block and program evaluation.
pub mod core;

/// Unary operator evaluation.
///
/// Handles negation, `not` and the `#` length operator.
pub mod unary;

/// Binary operator evaluation.
///
/// Implements evaluation for all binary operations, including arithmetic,
/// comparisons, and the short-circuiting logical operators.
pub mod binary;

/// Assignment evaluation.
///
/// Binds names, replaces list elements and destructures lists and strings
/// into patterns.
pub mod assignment;

/// `if` and `while` evaluation.
pub mod conditional;

/// Function literals and calls.
pub mod function;

/// Element access on lists and strings.
pub mod index;

/// Utility functions for the evaluator.
///
/// Provides condition checks, spread expansion, and call depth accounting
/// used by several evaluation routines.
pub mod utils;
