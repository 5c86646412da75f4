/// The evaluator module computes values from expression trees.
///
/// It defines the scope expressions are evaluated in, the arithmetic of the
/// internal complex domain, the `Function` call contract and both kinds of
/// functions: native ones and user-defined ones with a formula body.
///
/// # Responsibilities
/// - Evaluates, simplifies and classifies expression trees.
/// - Resolves names against the scope at evaluation time.
/// - Reports failures such as division by zero or unresolved names.
pub mod evaluator;
/// The lexer module recognises the tokens of a formula.
///
/// Tokens are lexed one at a time at the parse position rather than for the
/// whole input, since which letters form a name depends on the registry.
pub mod lexer;
/// The parser module builds expression trees from formula text.
///
/// The grammar is a backtracking combinator parser with two dialects. Names
/// are resolved against the live registry while parsing.
///
/// # Responsibilities
/// - Converts text into [`Expr`](crate::ast::Expr) trees.
/// - Checks call arity and rejects unknown names.
/// - Reports the most relevant failure with its character offset.
pub mod parser;
/// The registry module holds named definitions.
///
/// Constants, variables and functions share one namespace whose names are
/// validated on definition.
pub mod registry;
/// The value module defines the internal numeric domain.
///
/// Internal values are `rug::Complex` numbers held at a working
/// [`Precision`](value::precision::Precision). The module also provides the
/// standard constants.
pub mod value;
