use rug::Complex;

use crate::{
    bridge::core::{Bridge, NonRealPolicy},
    error::{EvalError, EvalResult},
    interpreter::{evaluator::utils::ensure_finite, value::precision::Precision},
    util::num::{format_complex, is_negligible},
};

/// Internal digits of a double context: a small margin above what `f64`
/// carries.
pub const DOUBLE_PRECISION: Precision = Precision::new(20);

/// Significant decimal digits an `f64` round trip needs.
pub const DOUBLE_DIGITS: u32 = 17;

/// The `f64` front end.
///
/// Inputs are converted exactly. Results are rounded to nearest; a result
/// whose imaginary part is not negligible at [`DOUBLE_DIGITS`] follows the
/// [`NonRealPolicy`]. A diverged result fails with `NotFinite`, while a finite
/// one beyond the `f64` range becomes an infinity.
///
/// # Example
/// ```
/// use arbeval::{
///     bridge::{core::NonRealPolicy, double::DoubleBridge},
///     context::DoubleContext,
/// };
///
/// let context = DoubleContext::standard();
/// assert!(context.evaluate("(-1)^0.5").unwrap().is_nan());
///
/// let strict = DoubleContext::standard_with(DoubleBridge::new(NonRealPolicy::Fail));
/// assert!(strict.evaluate("(-1)^0.5").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DoubleBridge {
    policy: NonRealPolicy,
}

impl DoubleBridge {
    /// Creates a bridge applying `policy` to non-real results.
    #[must_use]
    pub const fn new(policy: NonRealPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy for non-real results.
    #[must_use]
    pub const fn policy(&self) -> NonRealPolicy {
        self.policy
    }
}

impl Bridge for DoubleBridge {
    type Value = f64;

    fn default_precision(&self) -> Precision {
        DOUBLE_PRECISION
    }

    fn to_internal(&self, value: &f64, precision: Precision) -> EvalResult<Complex> {
        if !value.is_finite() {
            return Err(EvalError::NonFiniteInput { value: value.to_string() });
        }
        Ok(Complex::with_val(precision.bits(), (*value, 0)))
    }

    fn from_internal(&self, value: &Complex) -> EvalResult<f64> {
        ensure_finite(value)?;
        let (re, im) = (value.real(), value.imag());
        if is_negligible(im, re, DOUBLE_DIGITS) {
            return Ok(re.to_f64());
        }
        match self.policy {
            NonRealPolicy::NotANumber => Ok(f64::NAN),
            NonRealPolicy::Fail => Err(EvalError::NotReal { value: format_complex(value) }),
        }
    }
}
