/// Function values.
///
/// Defines `Closure`, the runtime form of a function literal: its parameter
/// names, its body and the scope it was created in.
pub mod function;

/// The `Value` enum together with its printed form, equality and
/// truthiness.
pub mod core;
