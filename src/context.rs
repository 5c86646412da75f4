/// The generic [`Context`] and its double, decimal, float and complex
/// instantiations.
pub mod core;
/// The text substitution hook applied before parsing.
pub mod expander;

pub use self::core::{ComplexContext, Context, DecimalContext, DoubleContext, FloatContext};

pub use expander::MacroExpander;
