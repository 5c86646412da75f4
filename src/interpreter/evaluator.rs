/// Core evaluation logic.
///
/// Defines the [`core::Scope`] expressions are evaluated in and implements
/// evaluation, invariance checks and constant folding on the expression tree.
pub mod core;

/// Binary operator evaluation.
///
/// Implements addition, subtraction, multiplication, division and complex
/// exponentiation over internal values.
pub mod binary;

/// The function call contract and its implementations.
pub mod function;

/// Small helpers shared by the evaluator.
pub mod utils;
