//! # arbeval
//!
//! arbeval parses and evaluates numeric formulas such as `17*x - 3*sin(y)`.
//! All arithmetic happens on arbitrary-precision complex numbers; results are
//! handed out as `f64`, `BigDecimal`, `rug::Float` or complex values, rounded
//! on the way out to a caller-chosen rule. Constants, variables and functions are user
//! extensible, and formulas may be written with implicit multiplication.

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
#![allow(clippy::missing_errors_doc)]

use crate::context::DoubleContext;

/// Defines the structure of parsed formulas.
///
/// This module declares the `Expr` enum, the immutable expression tree the
/// parser builds and the evaluator walks.
///
/// # Responsibilities
/// - Defines one node per literal, name, negation, binary operation and call.
/// - Renders trees as fully parenthesised infix text.
pub mod ast;
/// Translates between external number types and the internal domain.
///
/// A bridge converts caller values into internal complex values and rounds
/// results back out under an explicit rule.
///
/// # Responsibilities
/// - Provides the `f64`, `BigDecimal`, `rug::Float` and complex front ends.
/// - Decides what happens to non-real results of real-only types.
/// - Holds the rounding configuration.
pub mod bridge;
/// The public entry point.
///
/// A context bundles a registry, an internal precision, a bridge, a dialect
/// and an optional macro expander, and offers parsing, evaluation and the
/// whole registry API.
pub mod context;
/// Provides unified error types for parsing, evaluation and definitions.
///
/// This module defines all errors that can be raised while parsing a formula,
/// evaluating a tree or changing a registry. Each family is a separate enum;
/// [`error::Error`] unites them for operations that span several phases.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Attaches offsets and offending names for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates parsing and evaluation.
///
/// This module ties together the lexer, the grammar, the registry, the
/// internal value domain and the evaluator.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, registry and evaluator.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General numeric helpers.
///
/// Conversions between binary floats and decimals, precision arithmetic and
/// value formatting used across the crate.
pub mod util;

/// Evaluates `source` in a standard double context.
///
/// The context knows `pi`, `e`, the trigonometric and hyperbolic functions,
/// their inverses, `ln` and `log`. Non-real results yield NaN.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use arbeval::evaluate;
///
/// assert_eq!(evaluate("(2+3)*5").unwrap(), 25.0);
/// assert!(evaluate("(-1)^0.5").unwrap().is_nan());
///
/// // Unknown name.
/// assert!(evaluate("y + 1").is_err());
/// ```
pub fn evaluate(source: &str) -> error::Result<f64> {
    DoubleContext::standard().evaluate(source)
}
