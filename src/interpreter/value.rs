/// Internal working precision.
///
/// Defines [`precision::Precision`], the number of significant decimal digits
/// every internal complex value is held at, together with the helpers that
/// quantize values and build literals directly from decimal text.
pub mod precision;
/// The standard constants `pi`, `e` and `i`.
pub mod constants;
