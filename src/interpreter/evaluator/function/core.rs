use rug::Complex;

use crate::{
    error::{EvalError, EvalResult},
    interpreter::evaluator::core::Scope,
};

/// The call contract shared by native and user-defined functions.
///
/// The parser checks call arity against [`min_args`](Function::min_args) and
/// [`max_args`](Function::max_args) and only accepts calls within that range.
/// [`evaluate`](Function::evaluate) receives already evaluated arguments in
/// the internal domain together with the calling scope.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use arbeval::{
///     context::DoubleContext,
///     error::EvalResult,
///     interpreter::evaluator::{core::Scope, function::core::Function},
/// };
/// use rug::Complex;
///
/// struct Sum;
///
/// impl Function for Sum {
///     fn name(&self) -> &str {
///         "sum"
///     }
///
///     fn min_args(&self) -> usize {
///         1
///     }
///
///     fn max_args(&self) -> usize {
///         usize::MAX
///     }
///
///     fn evaluate(&self, scope: &Scope, args: &[Complex]) -> EvalResult<Complex> {
///         Ok(args.iter().fold(scope.precision().zero(), |acc, a| acc + a))
///     }
/// }
///
/// let mut context = DoubleContext::minimal();
/// context.function(Rc::new(Sum)).unwrap();
/// assert_eq!(context.evaluate("sum(1, 2, 3, 4)").unwrap(), 10.0);
/// assert!(context.parse("sum()").is_err());
/// ```
pub trait Function {
    /// Returns the name the function is registered under.
    fn name(&self) -> &str;

    /// Returns the minimum number of arguments.
    fn min_args(&self) -> usize;

    /// Returns the maximum number of arguments.
    fn max_args(&self) -> usize;

    /// Computes the result for `args` in `scope`.
    fn evaluate(&self, scope: &Scope, args: &[Complex]) -> EvalResult<Complex>;

    /// Tells whether `count` arguments are acceptable.
    fn accepts(&self, count: usize) -> bool {
        (self.min_args()..=self.max_args()).contains(&count)
    }
}

/// Fails with `ArgumentCount` unless exactly `expected` arguments are given.
pub fn check_arity(name: &str, args: &[Complex], expected: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvalError::ArgumentCount { name: name.to_string(),
                                       expected,
                                       found: args.len() })
    }
}
