/// The grammar and its entry point.
///
/// Defines the [`core::Dialect`] selector and [`core::Grammar`], which parses
/// formula text against the names of a registry. Also holds the ordered
/// choice, list and memoisation combinators the rules are built from.
pub mod core;

/// Operator precedence rules of both dialects.
///
/// Sums, factors, powers and, in the simplified dialect, implicit products
/// and signed powers.
pub mod dialect;

/// Left and right associative folds over binary operators.
pub mod binary;

/// Unary signs and primitives.
///
/// Literals, names, calls and parenthesised groups.
pub mod unary;

/// Greedy longest-match scanning of registered names.
pub mod names;

/// The parse cursor, failure bookkeeping and memo table.
pub mod utils;
