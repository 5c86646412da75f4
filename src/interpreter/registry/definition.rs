use std::{cell::OnceCell, fmt, rc::Rc};

use rug::Complex;

use crate::interpreter::{evaluator::function::core::Function, value::precision::Precision};

/// Computes the value of a constant at a given precision.
pub type Generator = Rc<dyn Fn(Precision) -> Complex>;

/// The three kinds of named definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    /// An immutable, lazily computed value.
    Constant,
    /// A mutable value.
    Variable,
    /// A callable.
    Function,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant => write!(f, "constant"),
            Self::Variable => write!(f, "variable"),
            Self::Function => write!(f, "function"),
        }
    }
}

/// A named constant.
///
/// The value is produced by a generator the first time it is requested and
/// then kept for the lifetime of this instance, so it never changes once
/// computed.
///
/// # Example
/// ```
/// use arbeval::interpreter::{registry::Constant, value::precision::Precision};
/// use rug::Float;
///
/// let precision = Precision::new(30);
/// let tau = Constant::with_generator("tau", |p: Precision| {
///     p.real(Float::with_val(p.bits(), rug::float::Constant::Pi) * 2)
/// });
/// assert!(!tau.is_computed());
/// let value = tau.value(precision).clone();
/// assert!(tau.is_computed());
/// assert_eq!(tau.value(precision), &value);
/// ```
#[derive(Clone)]
pub struct Constant {
    name:      String,
    generator: Generator,
    memo:      OnceCell<Complex>,
}

impl Constant {
    /// Creates a constant holding `value`, quantized on first use.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Complex) -> Self {
        Self::with_generator(name, move |precision: Precision| precision.quantize(&value))
    }

    /// Creates a constant computed by `generator` on first use.
    #[must_use]
    pub fn with_generator<G>(name: impl Into<String>, generator: G) -> Self
        where G: Fn(Precision) -> Complex + 'static
    {
        Self { name:      name.into(),
               generator: Rc::new(generator),
               memo:      OnceCell::new(), }
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value, computing it at `precision` if not done yet.
    pub fn value(&self, precision: Precision) -> &Complex {
        self.memo.get_or_init(|| {
                     log::trace!("computing constant '{}'", self.name);
                     precision.quantize(&(self.generator)(precision))
                 })
    }

    /// Tells whether the value has been computed already.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.memo.get().is_some()
    }
}

/// A named, mutable value.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name:  String,
    value: Complex,
}

impl Variable {
    /// Creates a variable holding zero.
    #[must_use]
    pub fn new(name: impl Into<String>, precision: Precision) -> Self {
        Self { name:  name.into(),
               value: precision.zero(), }
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current value.
    #[must_use]
    pub const fn value(&self) -> &Complex {
        &self.value
    }

    /// Stores `value` rounded to `precision`.
    pub fn set(&mut self, value: &Complex, precision: Precision) {
        self.value = precision.quantize(value);
    }

    /// Resets the value to zero.
    pub fn reset(&mut self, precision: Precision) {
        self.value = precision.zero();
    }
}

/// A registry entry.
#[derive(Clone)]
pub enum Definition {
    /// A constant.
    Constant(Constant),
    /// A variable.
    Variable(Variable),
    /// A function, shared between copies of a context.
    Function(Rc<dyn Function>),
}

impl Definition {
    /// Returns the name the definition is registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Constant(constant) => constant.name(),
            Self::Variable(variable) => variable.name(),
            Self::Function(function) => function.name(),
        }
    }

    /// Returns the kind of the definition.
    #[must_use]
    pub const fn kind(&self) -> DefinitionKind {
        match self {
            Self::Constant(_) => DefinitionKind::Constant,
            Self::Variable(_) => DefinitionKind::Variable,
            Self::Function(_) => DefinitionKind::Function,
        }
    }

    /// Tells whether the definition yields a value, i.e. is not a function.
    #[must_use]
    pub const fn is_value(&self) -> bool {
        !matches!(self, Self::Function(_))
    }
}

impl fmt::Debug for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constant")
         .field("name", &self.name)
         .field("value", &self.memo.get())
         .finish_non_exhaustive()
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(constant) => constant.fmt(f),
            Self::Variable(variable) => variable.fmt(f),
            Self::Function(function) => f.debug_struct("Function")
                                         .field("name", &function.name())
                                         .field("min_args", &function.min_args())
                                         .field("max_args", &function.max_args())
                                         .finish(),
        }
    }
}
