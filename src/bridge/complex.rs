use rug::{Complex, Float};

use crate::{
    bridge::{
        core::{Bridge, RoundingRule},
        decimal::round_float,
    },
    error::{EvalError, EvalResult},
    interpreter::{evaluator::utils::ensure_finite, value::precision::Precision},
    util::num::{decimal_to_float, format_complex, is_negligible},
};

/// The front end that exposes internal values directly.
///
/// Results keep their binary precision but each component is rounded to the
/// [`RoundingRule`] in decimal. A component that is negligible next to the
/// other one is flushed to zero, so `(-1)^0.5` comes out as exactly `i`.
///
/// # Example
/// ```
/// use arbeval::{bridge::core::RoundingRule, context::ComplexContext};
///
/// let context = ComplexContext::minimal(RoundingRule::DECIMAL64);
/// let root = context.evaluate("(-1)^0.5").unwrap();
/// assert!(root.real().is_zero());
/// assert_eq!(root.imag().to_f64(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComplexBridge {
    rule: RoundingRule,
}

impl ComplexBridge {
    /// Creates a bridge rounding result components to `rule`.
    #[must_use]
    pub const fn new(rule: RoundingRule) -> Self {
        Self { rule }
    }

    /// Returns the rounding rule.
    #[must_use]
    pub const fn rule(&self) -> RoundingRule {
        self.rule
    }

    fn round_component(&self, part: &Float, other: &Float) -> Float {
        if is_negligible(part, other, self.rule.digits()) {
            return Float::new(part.prec());
        }
        round_float(part, self.rule).and_then(|d| decimal_to_float(&d, part.prec()))
                                    .unwrap_or_else(|| part.clone())
    }
}

impl Bridge for ComplexBridge {
    type Value = Complex;

    fn default_precision(&self) -> Precision {
        self.rule.default_precision()
    }

    fn to_internal(&self, value: &Complex, precision: Precision) -> EvalResult<Complex> {
        if !value.real().is_finite() || !value.imag().is_finite() {
            return Err(EvalError::NonFiniteInput { value: format_complex(value) });
        }
        Ok(precision.quantize(value))
    }

    fn from_internal(&self, value: &Complex) -> EvalResult<Complex> {
        ensure_finite(value)?;
        let (re, im) = (value.real(), value.imag());
        let rounded = (self.round_component(re, im), self.round_component(im, re));
        Ok(Complex::with_val(value.prec(), rounded))
    }
}
