use std::{collections::BTreeMap, rc::Rc};

use crate::{
    error::{DefinitionError, DefinitionResult},
    interpreter::{
        evaluator::function::core::Function,
        registry::definition::{Constant, Definition, DefinitionKind, Variable},
    },
};

/// The syntax every user supplied name must match.
pub const NAME_PATTERN: &str = "^[a-zA-Z]+$";

/// Checks a name against [`NAME_PATTERN`].
///
/// # Example
/// ```
/// use arbeval::interpreter::registry::validate_name;
///
/// assert!(validate_name("abc").is_ok());
/// assert!(validate_name("bad guy").is_err());
/// assert!(validate_name("x1").is_err());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> DefinitionResult<()> {
    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(DefinitionError::InvalidName { name: name.to_string() })
    }
}

/// Maps names to constants, variables and functions.
///
/// A name is unique across all three kinds. Names are validated when they
/// are defined; lookups never validate.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: BTreeMap<String, Definition>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from definitions known to have valid, distinct
    /// names.
    pub(crate) fn seeded<I>(definitions: I) -> Self
        where I: IntoIterator<Item = Definition>
    {
        Self { definitions: definitions.into_iter()
                                       .map(|d| (d.name().to_string(), d))
                                       .collect(), }
    }

    /// Adds a definition.
    ///
    /// # Errors
    /// - `InvalidName` if the name does not match [`NAME_PATTERN`].
    /// - `Redefinition` if the name is already taken, whatever its kind.
    pub fn define(&mut self, definition: Definition) -> DefinitionResult<()> {
        let name = definition.name();
        validate_name(name)?;
        if let Some(existing) = self.definitions.get(name) {
            return Err(DefinitionError::Redefinition { name:     name.to_string(),
                                                       existing: existing.kind(), });
        }
        log::debug!("defining {} '{name}'", definition.kind());
        self.definitions.insert(name.to_string(), definition);
        Ok(())
    }

    /// Returns the definition registered under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    /// Tells whether `name` is taken.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Tells whether `name` is a constant. Unknown names are not.
    #[must_use]
    pub fn is_constant(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Definition::Constant(_)))
    }

    /// Looks up a constant.
    ///
    /// # Errors
    /// `WrongKind` if `name` is a variable or function.
    pub fn constant(&self, name: &str) -> DefinitionResult<Option<&Constant>> {
        match self.get(name) {
            None => Ok(None),
            Some(Definition::Constant(constant)) => Ok(Some(constant)),
            Some(other) => Err(wrong_kind(name, other, "constant")),
        }
    }

    /// Looks up a variable.
    ///
    /// # Errors
    /// `WrongKind` if `name` is a constant or function.
    pub fn variable(&self, name: &str) -> DefinitionResult<Option<&Variable>> {
        match self.get(name) {
            None => Ok(None),
            Some(Definition::Variable(variable)) => Ok(Some(variable)),
            Some(other) => Err(wrong_kind(name, other, "variable")),
        }
    }

    /// Looks up a variable for modification.
    ///
    /// # Errors
    /// `WrongKind` if `name` is a constant or function.
    pub fn variable_mut(&mut self, name: &str) -> DefinitionResult<Option<&mut Variable>> {
        match self.definitions.get_mut(name) {
            None => Ok(None),
            Some(Definition::Variable(variable)) => Ok(Some(variable)),
            Some(other) => Err(wrong_kind(name, other, "variable")),
        }
    }

    /// Looks up a constant or variable.
    ///
    /// # Errors
    /// `WrongKind` if `name` is a function.
    pub fn value(&self, name: &str) -> DefinitionResult<Option<&Definition>> {
        match self.get(name) {
            Some(definition) if !definition.is_value() => {
                Err(wrong_kind(name, definition, "value"))
            },
            found => Ok(found),
        }
    }

    /// Looks up a function.
    ///
    /// # Errors
    /// `WrongKind` if `name` is a constant or variable.
    pub fn function(&self, name: &str) -> DefinitionResult<Option<&Rc<dyn Function>>> {
        match self.get(name) {
            None => Ok(None),
            Some(Definition::Function(function)) => Ok(Some(function)),
            Some(other) => Err(wrong_kind(name, other, "function")),
        }
    }

    /// Iterates over all definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    /// Iterates over all names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Iterates over the names of definitions of one kind, in order.
    pub fn names_of(&self, kind: DefinitionKind) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(move |d| d.kind() == kind)
            .map(Definition::name)
    }

    /// Iterates over the names of all constants and variables, in order.
    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|d| d.is_value())
            .map(Definition::name)
    }

    /// Duplicates the registry.
    ///
    /// Constants and functions are always carried over; variables only if
    /// `with_variables` is set.
    #[must_use]
    pub fn copy(&self, with_variables: bool) -> Self {
        Self { definitions: self.definitions
                                .iter()
                                .filter(|(_, d)| with_variables || d.kind() != DefinitionKind::Variable)
                                .map(|(name, d)| (name.clone(), d.clone()))
                                .collect(), }
    }
}

fn wrong_kind(name: &str, found: &Definition, expected: &'static str) -> DefinitionError {
    DefinitionError::WrongKind { name: name.to_string(),
                                 actual: found.kind(),
                                 expected }
}
