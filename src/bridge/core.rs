use std::num::NonZeroU64;

use bigdecimal::{BigDecimal, RoundingMode};
use rug::Complex;

use crate::{error::EvalResult, interpreter::value::precision::Precision};

/// How many decimal digits the default internal precision exceeds the
/// external digits of a bridge.
pub const DEFAULT_PRECISION_INCREMENT: u32 = 10;

/// Translates between an external number type and the internal complex
/// domain.
///
/// A bridge decides how values enter a context and how results leave it. It
/// never computes: all arithmetic happens on internal values at the working
/// precision of the context, and the bridge rounds on the way out.
///
/// # Example
/// ```
/// use arbeval::{bridge::core::Bridge, bridge::double::DoubleBridge};
///
/// let bridge = DoubleBridge::default();
/// let precision = bridge.default_precision();
/// let internal = bridge.to_internal(&0.1, precision).unwrap();
/// assert_eq!(bridge.from_internal(&internal).unwrap(), 0.1);
/// ```
pub trait Bridge: Clone {
    /// The external number type.
    type Value: Clone;

    /// Returns the internal precision a context uses when none is given.
    fn default_precision(&self) -> Precision;

    /// Converts an external value to an internal one at `precision`.
    ///
    /// # Errors
    /// `NonFiniteInput` for values without an internal counterpart.
    fn to_internal(&self, value: &Self::Value, precision: Precision) -> EvalResult<Complex>;

    /// Converts an internal value to the external type.
    ///
    /// # Errors
    /// - `NotReal` if the external type cannot hold the value.
    /// - `NotFinite` if the value has diverged.
    fn from_internal(&self, value: &Complex) -> EvalResult<Self::Value>;
}

/// The rounding applied when a value leaves a context: a number of
/// significant decimal digits and a rounding mode.
///
/// # Example
/// ```
/// use arbeval::bridge::core::RoundingRule;
/// use bigdecimal::{BigDecimal, RoundingMode};
///
/// let rule = RoundingRule::new(3, RoundingMode::HalfEven);
/// let value: BigDecimal = "2.345".parse().unwrap();
/// assert_eq!(rule.round(&value), "2.34".parse::<BigDecimal>().unwrap());
/// assert_eq!(RoundingRule::default(), RoundingRule::DECIMAL128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundingRule {
    digits: u32,
    mode:   RoundingMode,
}

impl RoundingRule {
    /// Seven digits, rounding half to even.
    pub const DECIMAL32: Self = Self::new(7, RoundingMode::HalfEven);
    /// Sixteen digits, rounding half to even.
    pub const DECIMAL64: Self = Self::new(16, RoundingMode::HalfEven);
    /// Thirty-four digits, rounding half to even.
    pub const DECIMAL128: Self = Self::new(34, RoundingMode::HalfEven);

    /// Creates a rule keeping `digits` significant digits, at least one.
    #[must_use]
    pub const fn new(digits: u32, mode: RoundingMode) -> Self {
        Self { digits: if digits == 0 { 1 } else { digits },
               mode }
    }

    /// Returns the number of significant digits kept.
    #[must_use]
    pub const fn digits(self) -> u32 {
        self.digits
    }

    /// Returns the rounding mode.
    #[must_use]
    pub const fn mode(self) -> RoundingMode {
        self.mode
    }

    /// Returns the internal precision that exceeds this rule by
    /// [`DEFAULT_PRECISION_INCREMENT`] digits, saturating at `u32::MAX`.
    #[must_use]
    pub const fn default_precision(self) -> Precision {
        Precision::new(self.digits.saturating_add(DEFAULT_PRECISION_INCREMENT))
    }

    /// Rounds `value` to this rule.
    #[must_use]
    pub fn round(self, value: &BigDecimal) -> BigDecimal {
        let digits = NonZeroU64::new(u64::from(self.digits)).unwrap_or(NonZeroU64::MIN);
        value.with_precision_round(digits, self.mode)
    }
}

impl Default for RoundingRule {
    fn default() -> Self {
        Self::DECIMAL128
    }
}

/// What a real-only bridge produces for a result with a non-negligible
/// imaginary part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NonRealPolicy {
    /// Yield the type's not-a-number value.
    #[default]
    NotANumber,
    /// Fail with `NotReal`.
    Fail,
}
