#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing a formula.
///
/// Every variant carries the character offset (not byte offset) into the
/// source text at which the problem was detected.
pub enum ParseError {
    /// A specific construct was expected but something else was found.
    Expected {
        /// Human readable description of what was expected.
        expected: &'static str,
        /// The character found instead, `None` at end of input.
        found:    Option<char>,
        /// The character offset where the error occurred.
        offset:   usize,
    },
    /// The formula was parsed, but unconsumed text remains behind it.
    TrailingInput {
        /// The remaining input.
        input:  String,
        /// The character offset where the trailing input starts.
        offset: usize,
    },
    /// A word was found that is not a registered name.
    UnknownName {
        /// The unresolved word.
        name:   String,
        /// The character offset of the word.
        offset: usize,
    },
    /// A function name was used without an argument list.
    MissingArguments {
        /// The function name.
        name:   String,
        /// The character offset of the name.
        offset: usize,
    },
    /// A function was called with an unsupported number of arguments.
    ArityMismatch {
        /// The function name.
        name:   String,
        /// Minimum accepted argument count.
        min:    usize,
        /// Maximum accepted argument count.
        max:    usize,
        /// The number of arguments found.
        found:  usize,
        /// The character offset right behind the argument list.
        offset: usize,
    },
    /// A numeric literal could not be converted.
    InvalidLiteral {
        /// The literal text.
        text:   String,
        /// The character offset of the literal.
        offset: usize,
    },
}

impl ParseError {
    /// Returns the character offset the error refers to.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Expected { offset, .. }
            | Self::TrailingInput { offset, .. }
            | Self::UnknownName { offset, .. }
            | Self::MissingArguments { offset, .. }
            | Self::ArityMismatch { offset, .. }
            | Self::InvalidLiteral { offset, .. } => *offset,
        }
    }

    /// Ranks how specific a diagnostic is.
    ///
    /// When two alternatives fail at the same offset, the more specific one is
    /// reported.
    pub(crate) const fn specificity(&self) -> u8 {
        match self {
            Self::Expected { .. } | Self::TrailingInput { .. } => 0,
            Self::UnknownName { .. } | Self::MissingArguments { .. } => 1,
            Self::InvalidLiteral { .. } => 2,
            Self::ArityMismatch { .. } => 3,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expected { expected, found: Some(c), offset } => {
                write!(f, "Error at offset {offset}: Expected {expected}, found '{c}'.")
            },

            Self::Expected { expected, found: None, offset } => {
                write!(f, "Error at offset {offset}: Expected {expected}, found end of input.")
            },

            Self::TrailingInput { input, offset } => {
                write!(f, "Error at offset {offset}: End of input expected, found '{input}'.")
            },

            Self::UnknownName { name, offset } => {
                write!(f, "Error at offset {offset}: Unknown name '{name}'.")
            },

            Self::MissingArguments { name, offset } => write!(f,
                                                              "Error at offset {offset}: '{name}' is a function and requires an argument list."),

            Self::ArityMismatch { name, min, max, found, offset } if min == max => write!(f,
                                                                                        "Error at offset {offset}: Invalid parameter count for '{name}': expected {min}, but got {found}."),

            Self::ArityMismatch { name, min, max, found, offset } => write!(f,
                                                                           "Error at offset {offset}: Invalid parameter count for '{name}': expected {min} to {max}, but got {found}."),

            Self::InvalidLiteral { text, offset } => {
                write!(f, "Error at offset {offset}: Invalid numeric literal '{text}'.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
