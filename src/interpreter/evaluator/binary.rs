use rug::{Complex, ops::Pow};

use crate::{
    ast::BinaryOperator,
    error::{EvalError, EvalResult},
    interpreter::{
        evaluator::utils::{check_finite, is_exact_zero},
        value::precision::Precision,
    },
};

/// Applies a binary operator to two internal values.
///
/// Power is complex exponentiation, so real operands may yield a non-real
/// result: `(-1)^0.5` is `i`.
///
/// # Errors
/// - `DivisionByZero` when dividing by an exact zero.
/// - `NotFinite` when the result diverges, as for `0^-1` or an overflowing
///   power.
///
/// # Example
/// ```
/// use arbeval::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::eval_binary, value::precision::Precision},
/// };
/// use rug::Complex;
///
/// let precision = Precision::new(20);
/// let minus_one = Complex::with_val(precision.bits(), -1);
/// let half = Complex::with_val(precision.bits(), 0.5);
///
/// let root = eval_binary(BinaryOperator::Pow, minus_one, &half, precision).unwrap();
/// assert!(root.real().clone().abs() < 1e-19);
/// assert_eq!(root.imag().to_f64(), 1.0);
///
/// let zero = precision.zero();
/// assert!(eval_binary(BinaryOperator::Div, half, &zero, precision).is_err());
/// ```
pub fn eval_binary(op: BinaryOperator,
                   left: Complex,
                   right: &Complex,
                   precision: Precision)
                   -> EvalResult<Complex> {
    let result = match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Sub => left - right,
        BinaryOperator::Mul => left * right,
        BinaryOperator::Div => {
            if is_exact_zero(right) {
                return Err(EvalError::DivisionByZero);
            }
            left / right
        },
        BinaryOperator::Pow => left.pow(right),
    };
    check_finite(precision.quantize(&result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(precision: Precision, x: f64) -> Complex {
        Complex::with_val(precision.bits(), (x, 0))
    }

    #[test]
    fn zero_to_a_negative_power_diverges() {
        let precision = Precision::new(20);
        let result = eval_binary(BinaryOperator::Pow, precision.zero(), &value(precision, -1.0), precision);
        assert!(matches!(result, Err(EvalError::NotFinite { .. })));
    }

    #[test]
    fn overflowing_powers_diverge() {
        let precision = Precision::new(20);
        let exponent = value(precision, 1e20);
        let result = eval_binary(BinaryOperator::Pow, value(precision, 10.0), &exponent, precision);
        assert!(matches!(result, Err(EvalError::NotFinite { .. })));
    }

    #[test]
    fn zero_to_a_positive_power_is_zero() {
        let precision = Precision::new(20);
        let result = eval_binary(BinaryOperator::Pow, precision.zero(), &value(precision, 2.0), precision);
        assert!(is_exact_zero(&result.unwrap()));
    }
}
