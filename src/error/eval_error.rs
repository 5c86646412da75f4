#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while evaluating an expression or
/// converting its result.
pub enum EvalError {
    /// A name did not resolve to a definition of the required kind.
    Unresolved {
        /// The name that was looked up.
        name:     String,
        /// The kind of definition required: `"value"` or `"function"`.
        expected: &'static str,
    },
    /// Division by an exact zero.
    DivisionByZero,
    /// An operation or function diverged, e.g. `ln(0)`, `0^-1` or an
    /// overflowing power.
    NotFinite {
        /// The offending value, rendered as text.
        value: String,
    },
    /// A real-only representation was asked to hold a non-real result.
    NotReal {
        /// The offending value, rendered as text.
        value: String,
    },
    /// A function was called with the wrong number of arguments.
    ArgumentCount {
        /// The function name.
        name:     String,
        /// The expected argument count.
        expected: usize,
        /// The actual argument count.
        found:    usize,
    },
    /// An external value has no finite internal counterpart.
    NonFiniteInput {
        /// The offending value, rendered as text.
        value: String,
    },
    /// A user-defined function was called while already being evaluated.
    Reentrant {
        /// The function name.
        name: String,
    },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unresolved { name, expected } => write!(f, "No such {expected} '{name}'"),

            Self::DivisionByZero => write!(f, "Division by zero"),

            Self::NotFinite { value } => write!(f, "Arithmetic result is not finite: {value}"),

            Self::NotReal { value } => write!(f, "Not a real number: {value}"),

            Self::ArgumentCount { name, expected, found } => write!(f,
                                                                   "Invalid argument count for '{name}', expected {expected}, but got {found}"),

            Self::NonFiniteInput { value } => write!(f, "Cannot evaluate non-finite value {value}"),

            Self::Reentrant { name } => {
                write!(f, "Function '{name}' is already being evaluated")
            },
        }
    }
}

impl std::error::Error for EvalError {}
