use rug::Complex;

use crate::{
    error::{EvalError, EvalResult},
    util::num::format_complex,
};

/// Tells whether both components of `value` are zero.
#[must_use]
pub fn is_exact_zero(value: &Complex) -> bool {
    value.real().is_zero() && value.imag().is_zero()
}

/// Fails unless both components of `value` are finite.
///
/// # Errors
/// `NotFinite` for an infinite or NaN component.
pub fn ensure_finite(value: &Complex) -> EvalResult<()> {
    if value.real().is_finite() && value.imag().is_finite() {
        Ok(())
    } else {
        Err(EvalError::NotFinite { value: format_complex(value) })
    }
}

/// Passes `value` through if both components are finite.
///
/// # Errors
/// `NotFinite` for an infinite or NaN component.
///
/// # Example
/// ```
/// use arbeval::interpreter::evaluator::utils::check_finite;
/// use rug::{Complex, Float, float::Special};
///
/// assert!(check_finite(Complex::with_val(64, (1, 2))).is_ok());
/// let diverged = Complex::with_val(64, (Float::with_val(64, Special::NegInfinity), 0));
/// assert!(check_finite(diverged).is_err());
/// ```
pub fn check_finite(value: Complex) -> EvalResult<Complex> {
    ensure_finite(&value)?;
    Ok(value)
}
