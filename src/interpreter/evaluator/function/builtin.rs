use std::rc::Rc;

use rug::{Complex, Float};

use crate::{
    error::{EvalError, EvalResult},
    interpreter::evaluator::{
        core::Scope,
        function::core::Function,
        utils::is_exact_zero,
    },
};

/// A native computation over one argument.
type UnaryFn = fn(Complex) -> Complex;
/// A native computation over two arguments.
type BinaryFn = fn(Complex, Complex) -> EvalResult<Complex>;

/// The computation behind a native function, which also fixes its arity.
#[derive(Clone, Copy)]
enum Operation {
    Unary(UnaryFn),
    Binary(BinaryFn),
}

impl Operation {
    const fn arity(self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }
}

/// A built-in function of fixed arity, computed directly on internal values.
///
/// Arguments are rounded to the precision of the calling scope before the
/// computation and the result is rounded again afterwards.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    name:      &'static str,
    operation: Operation,
}

impl Function for NativeFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn min_args(&self) -> usize {
        self.operation.arity()
    }

    fn max_args(&self) -> usize {
        self.min_args()
    }

    fn evaluate(&self, scope: &Scope, args: &[Complex]) -> EvalResult<Complex> {
        let precision = scope.precision();
        match (self.operation, args) {
            (Operation::Unary(f), [z]) => Ok(precision.quantize(&f(precision.quantize(z)))),
            (Operation::Binary(f), [a, b]) => {
                f(precision.quantize(a), precision.quantize(b)).map(|r| precision.quantize(&r))
            },
            (operation, _) => Err(EvalError::ArgumentCount { name:     self.name.to_string(),
                                                             expected: operation.arity(),
                                                             found:    args.len(), }),
        }
    }
}

/// Defines groups of native functions.
///
/// Each group becomes a public function returning its members, ready to be
/// registered in a context:
/// - `name` is the registered function name,
/// - the operation is either `Operation::Unary` or `Operation::Binary`.
macro_rules! native_functions {
    (
        $(
            $(#[$meta:meta])*
            $group:ident {
                $( $name:literal => $operation:expr ),* $(,)?
            }
        )*
    ) => {
        $(
            $(#[$meta])*
            #[must_use]
            pub fn $group() -> Vec<Rc<dyn Function>> {
                vec![
                    $( Rc::new(NativeFunction { name: $name, operation: $operation }) as Rc<dyn Function>, )*
                ]
            }
        )*
    };
}

native_functions! {
    /// `sin`, `cos` and `tan`.
    trigonometric {
        "sin" => Operation::Unary(Complex::sin),
        "cos" => Operation::Unary(Complex::cos),
        "tan" => Operation::Unary(Complex::tan),
    }
    /// `asin`, `acos` and `atan`.
    inverse_trigonometric {
        "asin" => Operation::Unary(Complex::asin),
        "acos" => Operation::Unary(Complex::acos),
        "atan" => Operation::Unary(Complex::atan),
    }
    /// `sinh`, `cosh` and `tanh`.
    hyperbolic {
        "sinh" => Operation::Unary(Complex::sinh),
        "cosh" => Operation::Unary(Complex::cosh),
        "tanh" => Operation::Unary(Complex::tanh),
    }
    /// `asinh`, `acosh` and `atanh`.
    inverse_hyperbolic {
        "asinh" => Operation::Unary(Complex::asinh),
        "acosh" => Operation::Unary(Complex::acosh),
        "atanh" => Operation::Unary(Complex::atanh),
    }
    /// `ln(z)` and `log(z, base)`.
    logarithm {
        "ln"  => Operation::Unary(Complex::ln),
        "log" => Operation::Binary(log),
    }
    /// `arg`, `abs`, `norm` (the squared modulus), `real` and `imag`.
    complex {
        "arg"  => Operation::Unary(Complex::arg),
        "abs"  => Operation::Unary(Complex::abs),
        "norm" => Operation::Unary(Complex::norm),
        "real" => Operation::Unary(real),
        "imag" => Operation::Unary(imag),
    }
}

/// The functions of a standard context: trigonometric, hyperbolic, their
/// inverses and the logarithms.
#[must_use]
pub fn standard() -> Vec<Rc<dyn Function>> {
    [trigonometric(),
     inverse_trigonometric(),
     hyperbolic(),
     inverse_hyperbolic(),
     logarithm()].concat()
}

/// Computes the logarithm of `value` to `base`.
///
/// # Errors
/// `DivisionByZero` for base one.
///
/// # Example
/// ```
/// use arbeval::context::DoubleContext;
///
/// let context = DoubleContext::standard();
/// assert_eq!(context.evaluate("log(256, 2)").unwrap(), 8.0);
/// assert!(context.evaluate("log(2, 1)").is_err());
/// ```
pub fn log(value: Complex, base: Complex) -> EvalResult<Complex> {
    let divisor = base.ln();
    if is_exact_zero(&divisor) {
        return Err(EvalError::DivisionByZero);
    }
    Ok(value.ln() / divisor)
}

/// Returns the real part as a complex value.
#[must_use]
pub fn real(value: Complex) -> Complex {
    let prec = value.prec();
    let (re, _) = value.into_real_imag();
    Complex::with_val(prec, (re, Float::new(prec.1)))
}

/// Returns the imaginary part as a complex value with zero imaginary part.
#[must_use]
pub fn imag(value: Complex) -> Complex {
    let prec = value.prec();
    let (_, im) = value.into_real_imag();
    Complex::with_val(prec, (im, Float::new(prec.1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::precision::Precision;

    fn call(name: &str, args: &[Complex]) -> EvalResult<Complex> {
        let scope = Scope::new(Precision::new(30));
        let function = [standard(), complex()].concat()
                                              .into_iter()
                                              .find(|f| f.name() == name)
                                              .unwrap();
        function.evaluate(&scope, args)
    }

    #[test]
    fn accessors_split_components() {
        let z = Complex::with_val(64, (3, -4));
        assert_eq!(call("real", &[z.clone()]).unwrap(), Complex::with_val(64, (3, 0)));
        assert_eq!(call("imag", &[z.clone()]).unwrap(), Complex::with_val(64, (-4, 0)));
        assert_eq!(call("abs", &[z.clone()]).unwrap(), Complex::with_val(64, (5, 0)));
        assert_eq!(call("norm", &[z]).unwrap(), Complex::with_val(64, (25, 0)));
    }

    #[test]
    fn arity_is_checked_on_call() {
        let err = call("sin", &[]).unwrap_err();
        assert_eq!(err,
                   EvalError::ArgumentCount { name:     "sin".to_string(),
                                              expected: 1,
                                              found:    0, });
    }

    #[test]
    fn binary_functions_reject_a_single_argument() {
        let err = call("log", &[Complex::with_val(64, 8)]).unwrap_err();
        assert_eq!(err,
                   EvalError::ArgumentCount { name:     "log".to_string(),
                                              expected: 2,
                                              found:    1, });
    }

    #[test]
    fn logarithm_of_zero_diverges() {
        let result = call("ln", &[Complex::with_val(64, 0)]).unwrap();
        assert!(result.real().is_infinite());
    }

    #[test]
    fn logarithm_to_arbitrary_base() {
        let result = call("log", &[Complex::with_val(64, 1000), Complex::with_val(64, 10)]).unwrap();
        let expected = Complex::with_val(64, (3, 0));
        let difference = (result - &expected).abs();
        assert!(difference.real() < &1e-25);
    }
}
