/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between the language's
/// single floating-point number type and the integer types used for lengths
/// and indices, without risking silent data loss or rounding errors.
pub mod num;
/// Stack growth for deep recursion.
///
/// Parsing and evaluation recurse once per nesting level and once per
/// function call. The helper here grows the native stack on demand so that
/// the configured call depth, not the thread's stack size, is the limit.
pub mod stack;
