use crate::interpreter::registry::DefinitionKind;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while defining or looking up names in
/// a registry.
pub enum DefinitionError {
    /// The name does not consist of ASCII letters only.
    InvalidName {
        /// The rejected name.
        name: String,
    },
    /// A definition with the same name already exists.
    Redefinition {
        /// The name.
        name:     String,
        /// The kind of the existing definition.
        existing: DefinitionKind,
    },
    /// A name refers to a definition of another kind than requested.
    WrongKind {
        /// The name.
        name:     String,
        /// The kind actually found.
        actual:   DefinitionKind,
        /// The kind requested: `"constant"`, `"variable"`, `"value"` or
        /// `"function"`.
        expected: &'static str,
    },
    /// No definition exists for the name.
    Undefined {
        /// The name.
        name:     String,
        /// The kind requested.
        expected: &'static str,
    },
}

impl std::fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName { name } => write!(f,
                                                 "Invalid name '{name}' - must conform to pattern '{}'",
                                                 crate::interpreter::registry::NAME_PATTERN),

            Self::Redefinition { name, existing } => write!(f,
                                                            "Redefinition of '{name}' (there is already a {existing} with this name)"),

            Self::WrongKind { name, actual, expected } => {
                write!(f, "'{name}' is a {actual} but not a {expected}")
            },

            Self::Undefined { name, expected } => write!(f, "No such {expected} '{name}'"),
        }
    }
}

impl std::error::Error for DefinitionError {}
