use rug::{Complex, Float};

use crate::util::num::bits_for_digits;

/// The working precision of the internal complex domain, in significant
/// decimal digits.
///
/// Every internal value a context produces (literals, operation results,
/// function results and variable contents) is quantized to this precision.
/// A precision is never zero digits.
///
/// # Example
/// ```
/// use arbeval::interpreter::value::precision::Precision;
///
/// let precision = Precision::new(20);
/// assert_eq!(precision.digits(), 20);
/// assert_eq!(precision.bits(), 69);
///
/// let half = precision.parse_decimal("0.5").unwrap();
/// assert_eq!(half.real().to_f64(), 0.5);
/// assert!(half.imag().is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision(u32);

impl Precision {
    /// Creates a precision of `digits` decimal digits, at least one.
    #[must_use]
    pub const fn new(digits: u32) -> Self {
        if digits == 0 { Self(1) } else { Self(digits) }
    }

    /// Returns the precision in decimal digits.
    #[must_use]
    pub const fn digits(self) -> u32 {
        self.0
    }

    /// Returns the binary mantissa size used for each component.
    #[must_use]
    pub fn bits(self) -> u32 {
        bits_for_digits(self.0)
    }

    /// Returns an internal zero at this precision.
    #[must_use]
    pub fn zero(self) -> Complex {
        Complex::new(self.bits())
    }

    /// Rounds `value` to this precision.
    #[must_use]
    pub fn quantize(self, value: &Complex) -> Complex {
        Complex::with_val(self.bits(), value)
    }

    /// Builds an internal value with a zero imaginary part.
    #[must_use]
    pub fn real(self, value: Float) -> Complex {
        let bits = self.bits();
        Complex::with_val(bits, (value, Float::new(bits)))
    }

    /// Parses decimal text such as `12`, `12.`, `.5` or `1.25e-3` directly
    /// into this precision, rounding exactly once.
    ///
    /// Returns `None` if the text is not a decimal number.
    #[must_use]
    pub fn parse_decimal(self, text: &str) -> Option<Complex> {
        let normalized = if text.starts_with('.') {
            format!("0{text}")
        } else if let Some(mantissa) = text.strip_suffix('.') {
            format!("{mantissa}.0")
        } else {
            text.replacen(".e", ".0e", 1).replacen(".E", ".0E", 1)
        };
        let parsed = Float::parse(normalized).ok()?;
        Some(self.real(Float::with_val(self.bits(), parsed)))
    }
}
