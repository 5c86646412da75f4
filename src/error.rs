/// Parsing errors.
///
/// Defines all error types that can occur while turning formula text into an
/// expression tree: malformed syntax, unknown names, missing argument lists,
/// wrong call arity and unconsumed trailing input. Every error carries the
/// character offset it refers to.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while evaluating an expression
/// tree or converting its result to an external representation, such as
/// division by zero or a non-real result for a real-only bridge.
pub mod eval_error;
/// Definition errors.
///
/// Raised by registry operations: invalid names, redefinitions and lookups of
/// the wrong kind.
pub mod definition_error;

pub use definition_error::DefinitionError;
pub use eval_error::EvalError;
pub use parse_error::ParseError;

/// Result of a parse.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
/// Result of an evaluation or conversion.
pub type EvalResult<T> = std::result::Result<T, EvalError>;
/// Result of a registry operation.
pub type DefinitionResult<T> = std::result::Result<T, DefinitionError>;
/// Result of an operation that may fail in any phase.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Any error raised by the crate.
///
/// Operations that span several phases, like [`Context::evaluate`], which
/// parses and then evaluates, return this umbrella type. Matching on it keeps
/// syntax errors, arithmetic errors and registry errors apart.
///
/// [`Context::evaluate`]: crate::context::Context::evaluate
pub enum Error {
    /// The formula could not be parsed.
    Parse(ParseError),
    /// The expression could not be evaluated or converted.
    Eval(EvalError),
    /// A registry operation failed.
    Definition(DefinitionError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => e.fmt(f),
            Self::Eval(e) => e.fmt(f),
            Self::Definition(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Eval(e) => Some(e),
            Self::Definition(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<EvalError> for Error {
    fn from(error: EvalError) -> Self {
        Self::Eval(error)
    }
}

impl From<DefinitionError> for Error {
    fn from(error: DefinitionError) -> Self {
        Self::Definition(error)
    }
}
