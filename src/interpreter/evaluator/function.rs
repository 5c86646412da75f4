/// The `Function` trait every callable implements.
pub mod core;
/// Native functions.
///
/// Trigonometric and hyperbolic functions, their inverses, logarithms and the
/// complex accessors, grouped the way contexts register them.
pub mod builtin;
/// User-defined functions.
///
/// A function whose body is a formula, parsed and simplified once against a
/// private inner context and evaluated there on every call.
pub mod expression;
