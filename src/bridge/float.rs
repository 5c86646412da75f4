use rug::{Complex, Float};

use crate::{
    bridge::{
        core::{Bridge, RoundingRule},
        decimal::round_float,
    },
    error::{EvalError, EvalResult},
    interpreter::{evaluator::utils::ensure_finite, value::precision::Precision},
    util::num::{bits_for_digits, decimal_to_float, format_complex, is_negligible},
};

/// The `rug::Float` front end: arbitrary-precision real results.
///
/// Results are rounded to the [`RoundingRule`] in decimal, like the decimal
/// front end, and handed out with a mantissa sized for the rule's digits. A
/// result with a non-negligible imaginary part fails with `NotReal`.
///
/// # Example
/// ```
/// use arbeval::{bridge::core::RoundingRule, context::FloatContext};
/// use bigdecimal::RoundingMode;
///
/// let context = FloatContext::standard(RoundingRule::new(10, RoundingMode::HalfEven));
/// assert_eq!(context.evaluate("pi").unwrap().to_string_radix(10, Some(10)), "3.141592654");
/// assert!(context.evaluate("(-1)^0.5").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatBridge {
    rule: RoundingRule,
}

impl FloatBridge {
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

    /// Returns the mantissa size of the results.
    #[must_use]
    pub fn result_bits(&self) -> u32 {
        bits_for_digits(self.rule.digits())
    }
}

impl Bridge for FloatBridge {
    type Value = Float;

    fn default_precision(&self) -> Precision {
        self.rule.default_precision()
    }

    fn to_internal(&self, value: &Float, precision: Precision) -> EvalResult<Complex> {
        if !value.is_finite() {
            return Err(EvalError::NonFiniteInput { value: value.to_string() });
        }
        Ok(precision.real(Float::with_val(precision.bits(), value)))
    }

    fn from_internal(&self, value: &Complex) -> EvalResult<Float> {
        ensure_finite(value)?;
        let (re, im) = (value.real(), value.imag());
        if !is_negligible(im, re, self.rule.digits()) {
            return Err(EvalError::NotReal { value: format_complex(value) });
        }
        round_float(re, self.rule).and_then(|d| decimal_to_float(&d, self.result_bits()))
                                  .ok_or_else(|| EvalError::NotFinite { value: format_complex(value) })
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::RoundingMode;

    use super::*;

    fn float(bits: u32, text: &str) -> Float {
        Float::with_val(bits, Float::parse(text).unwrap())
    }

    #[test]
    fn round_trips_at_the_rule_precision() {
        let bridge = FloatBridge::new(RoundingRule::DECIMAL64);
        let bits = bridge.result_bits();
        for text in ["0.1", "-123.456", "1e-40", "3.141592653589793"] {
            let internal = bridge.to_internal(&float(bits, text), bridge.default_precision()).unwrap();
            let result = bridge.from_internal(&internal).unwrap();
            assert_eq!(result, float(bits, text));
            assert_eq!(result.prec(), bits);
        }
    }

    #[test]
    fn rounds_to_the_rule() {
        let bridge = FloatBridge::new(RoundingRule::new(3, RoundingMode::Down));
        let precision = Precision::new(20);
        let internal = bridge.to_internal(&float(128, "2.999"), precision).unwrap();
        assert_eq!(bridge.from_internal(&internal).unwrap(), float(bridge.result_bits(), "2.99"));
    }

    #[test]
    fn rejects_non_real_and_non_finite_values() {
        let bridge = FloatBridge::default();
        let precision = bridge.default_precision();
        let i = Complex::with_val(precision.bits(), (0, 1));
        assert!(matches!(bridge.from_internal(&i), Err(EvalError::NotReal { .. })));

        let infinite = Complex::with_val(precision.bits(), (rug::float::Special::Infinity, 0));
        assert!(matches!(bridge.from_internal(&infinite), Err(EvalError::NotFinite { .. })));
        assert!(matches!(bridge.to_internal(&Float::with_val(64, rug::float::Special::Nan), precision),
                         Err(EvalError::NonFiniteInput { .. })));
    }
}
