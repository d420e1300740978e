/// Dispatch over binary operators.
///
/// Evaluates both operands (or only the left one, for a short-circuited
/// `and`/`or`) and hands the values to the specialized handlers.
pub mod core;

/// Arithmetic on numbers plus string and list concatenation.
pub mod arithmetic;

/// Equality and ordering comparisons.
pub mod comparison;

/// The short-circuiting `and` and `or` operators.
pub mod logic;
