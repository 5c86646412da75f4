/// The registry itself.
///
/// Holds the name → definition map, enforces name syntax and uniqueness, and
/// answers lookups by name and kind.
pub mod core;
/// Constants, variables and the definition enum.
pub mod definition;

pub use self::{
    core::{NAME_PATTERN, Registry, validate_name},
    definition::{Constant, Definition, DefinitionKind, Generator, Variable},
};
