use std::str::FromStr;

use bigdecimal::BigDecimal;
use rug::{Complex, Float, float::prec_max, ops::Pow};

/// Extra bits added on top of the decimal precision when sizing a binary
/// mantissa.
pub const GUARD_BITS: u32 = 2;

/// Returns the number of mantissa bits needed to hold `digits` significant
/// decimal digits, capped at the largest precision rug supports.
///
/// ## Example
/// ```
/// use arbeval::util::num::bits_for_digits;
///
/// assert_eq!(bits_for_digits(20), 69);
/// assert_eq!(bits_for_digits(u32::MAX), rug::float::prec_max());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn bits_for_digits(digits: u32) -> u32 {
    let max = prec_max();
    let bits = (f64::from(digits) * std::f64::consts::LOG2_10).ceil().min(f64::from(max)) as u32;
    bits.saturating_add(GUARD_BITS).min(max)
}

/// Returns the number of significant decimal digits a mantissa of `bits` bits
/// reliably carries.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn digits_for_bits(bits: u32) -> u32 {
    let bits = bits.saturating_sub(GUARD_BITS).max(1);
    ((f64::from(bits) / std::f64::consts::LOG2_10).floor() as u32).max(1)
}

/// Converts a finite binary float to a decimal carrying `digits` significant
/// digits.
///
/// The conversion goes through the decimal text of the float, so no binary
/// `f64` is involved. Returns `None` for infinities and NaN.
///
/// ## Example
/// ```
/// use arbeval::util::num::float_to_decimal;
/// use rug::Float;
///
/// let quarter = Float::with_val(64, 0.25);
/// let decimal = float_to_decimal(&quarter, 10).unwrap();
/// assert_eq!(decimal.normalized().to_string(), "0.25");
/// ```
#[must_use]
pub fn float_to_decimal(value: &Float, digits: u32) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    if value.is_zero() {
        return Some(BigDecimal::from(0));
    }
    BigDecimal::from_str(&value.to_string_radix(10, Some(digits as usize))).ok()
}

/// Converts a decimal to a binary float of `bits` bits, rounding once.
#[must_use]
pub fn decimal_to_float(value: &BigDecimal, bits: u32) -> Option<Float> {
    let text = value.to_string().to_ascii_lowercase();
    Float::parse(text).ok().map(|parsed| Float::with_val(bits, parsed))
}

/// Tests whether `part` vanishes next to `dominant` at `digits` significant
/// decimal digits, that is whether `|part| * 10^digits <= |dominant|`.
///
/// An exact zero is always negligible.
///
/// ## Example
/// ```
/// use arbeval::util::num::is_negligible;
/// use rug::Float;
///
/// let one = Float::with_val(128, 1);
/// let tiny = Float::with_val(128, 1e-25);
/// assert!(is_negligible(&tiny, &one, 20));
/// assert!(!is_negligible(&tiny, &one, 30));
/// ```
#[must_use]
pub fn is_negligible(part: &Float, dominant: &Float, digits: u32) -> bool {
    if part.is_zero() {
        return true;
    }
    let bits = part.prec().max(dominant.prec());
    let scale = Float::with_val(bits, 10).pow(digits);
    let scaled = part.clone().abs() * &scale;
    scaled <= dominant.clone().abs()
}

/// Renders a float as its shortest decimal form at the precision it carries.
#[must_use]
pub fn format_float(value: &Float) -> String {
    float_to_decimal(value, digits_for_bits(value.prec())).map_or_else(|| value.to_string(),
                                                                      |d| {
                                                                          d.normalized()
                                                                           .to_string()
                                                                      })
}

/// Renders a complex value as `re`, `imi` or `re+imi`.
///
/// ## Example
/// ```
/// use arbeval::util::num::format_complex;
/// use rug::Complex;
///
/// assert_eq!(format_complex(&Complex::with_val(64, (1.5, 0))), "1.5");
/// assert_eq!(format_complex(&Complex::with_val(64, (0, -2))), "-2i");
/// assert_eq!(format_complex(&Complex::with_val(64, (1, 2))), "1+2i");
/// ```
#[must_use]
pub fn format_complex(value: &Complex) -> String {
    let (re, im) = (value.real(), value.imag());
    if im.is_zero() {
        return format_float(re);
    }
    if re.is_zero() {
        return format!("{}i", format_float(im));
    }
    let sign = if im.is_sign_negative() { "-" } else { "+" };
    format!("{}{sign}{}i", format_float(re), format_float(&im.clone().abs()))
}
