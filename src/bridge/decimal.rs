use bigdecimal::BigDecimal;
use rug::{Complex, Float};

use crate::{
    bridge::core::{Bridge, RoundingRule},
    error::{EvalError, EvalResult},
    interpreter::{evaluator::utils::ensure_finite, value::precision::Precision},
    util::num::{decimal_to_float, digits_for_bits, float_to_decimal, format_complex, is_negligible},
};

/// The `BigDecimal` front end.
///
/// Inputs are read from their decimal text at the working precision. Results
/// are rendered in decimal at the digits the working precision carries, which
/// already rounds away the guard bits, and then rounded to the
/// [`RoundingRule`]. A result with a non-negligible imaginary part fails with
/// `NotReal`; a diverged one with `NotFinite`.
///
/// # Example
/// ```
/// use arbeval::{bridge::core::RoundingRule, context::DecimalContext};
/// use bigdecimal::BigDecimal;
///
/// let context = DecimalContext::standard(RoundingRule::DECIMAL128);
/// assert_eq!(context.evaluate("(2+3)*4").unwrap(), BigDecimal::from(20));
/// assert_eq!(context.evaluate("sin(pi/4)*2^0.5").unwrap(), BigDecimal::from(1));
/// assert!(context.evaluate("-1^0.5").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecimalBridge {
    rule: RoundingRule,
}

impl DecimalBridge {
    /// Creates a bridge rounding results to `rule`.
    #[must_use]
    pub const fn new(rule: RoundingRule) -> Self {
        Self { rule }
    }

    /// Returns the rounding rule.
    #[must_use]
    pub const fn rule(&self) -> RoundingRule {
        self.rule
    }
}

impl Bridge for DecimalBridge {
    type Value = BigDecimal;

    fn default_precision(&self) -> Precision {
        self.rule.default_precision()
    }

    fn to_internal(&self, value: &BigDecimal, precision: Precision) -> EvalResult<Complex> {
        decimal_to_float(value, precision.bits())
            .map(|re| precision.real(re))
            .ok_or_else(|| EvalError::NonFiniteInput { value: value.to_string() })
    }

    fn from_internal(&self, value: &Complex) -> EvalResult<BigDecimal> {
        ensure_finite(value)?;
        let (re, im) = (value.real(), value.imag());
        if !is_negligible(im, re, self.rule.digits()) {
            return Err(EvalError::NotReal { value: format_complex(value) });
        }
        round_float(re, self.rule).ok_or_else(|| EvalError::NotFinite { value: format_complex(value) })
    }
}

/// Renders `value` in decimal at the digits its mantissa carries and rounds
/// the result to `rule`.
///
/// This rounds twice: the render drops the binary digits beyond
/// [`digits_for_bits`], and the rule rounds the rendered decimal. With the
/// default precision the render keeps ten digits more than the rule.
///
/// Returns `None` for infinities and NaN.
pub(crate) fn round_float(value: &Float, rule: RoundingRule) -> Option<BigDecimal> {
    float_to_decimal(value, digits_for_bits(value.prec())).map(|d| rule.round(&d))
}
