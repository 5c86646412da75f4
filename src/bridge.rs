/// The `Bridge` trait and the rounding configuration shared by bridges.
pub mod core;
/// `f64` values, with a configurable policy for non-real results.
pub mod double;
/// `BigDecimal` values, rounded to an explicit rule. Non-real results fail.
pub mod decimal;
/// Arbitrary-precision real values as `rug::Float`, rounded like decimals.
pub mod float;
/// Complex values in the internal representation, rounded per component.
pub mod complex;
