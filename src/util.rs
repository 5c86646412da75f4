/// Numeric conversion helpers.
///
/// This module sizes binary mantissas from decimal precisions and converts
/// between `rug` floats and `bigdecimal` decimals through their decimal text,
/// so that no intermediate `f64` can introduce an extra rounding. It also
/// decides when a component of a complex value is negligible and renders
/// internal values for display.
pub mod num;
