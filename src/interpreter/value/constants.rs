use rug::{Complex, Float, float};

use crate::interpreter::{registry::Constant, value::precision::Precision};

/// The ratio of a circle's circumference to its diameter.
#[must_use]
pub fn pi() -> Constant {
    Constant::with_generator("pi", |p: Precision| {
        p.real(Float::with_val(p.bits(), float::Constant::Pi))
    })
}

/// Euler's number.
#[must_use]
pub fn e() -> Constant {
    Constant::with_generator("e", |p: Precision| p.real(Float::with_val(p.bits(), 1).exp()))
}

/// The imaginary unit.
#[must_use]
pub fn i() -> Constant {
    Constant::with_generator("i", |p: Precision| Complex::with_val(p.bits(), (0, 1)))
}

/// `pi`, `e` and `i`.
///
/// # Example
/// ```
/// use arbeval::interpreter::value::{constants, precision::Precision};
///
/// let precision = Precision::new(25);
/// let names: Vec<_> = constants::standard().iter().map(|c| c.name().to_string()).collect();
/// assert_eq!(names, ["pi", "e", "i"]);
///
/// let pi = constants::pi();
/// assert!((pi.value(precision).real().to_f64() - std::f64::consts::PI).abs() < 1e-15);
/// ```
#[must_use]
pub fn standard() -> Vec<Constant> {
    vec![pi(), e(), i()]
}
