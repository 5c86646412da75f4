use std::cell::RefCell;

use rug::Complex;

use crate::{
    ast::Expr,
    bridge::core::Bridge,
    context::{ComplexContext, Context},
    error::{EvalError, EvalResult, Result},
    interpreter::{
        evaluator::{
            core::Scope,
            function::core::{Function, check_arity},
        },
        registry::validate_name,
    },
};

/// A function whose body is a formula over its parameters.
///
/// The body is parsed and simplified once, when the function is built,
/// against a private inner context. That context is a complex copy of the
/// defining context without its variables, plus one variable per parameter.
/// Each call binds the arguments to the parameter variables and evaluates the
/// body there, so later changes to the defining context's variables do not
/// affect the function.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use arbeval::{context::DoubleContext, interpreter::evaluator::function::expression::ExpressionFunction};
///
/// let mut context = DoubleContext::standard();
/// context.set_variable("y", &100.0).unwrap();
///
/// let hypot = ExpressionFunction::new(&context, "hypot", &["x", "y"], "(x^2 + y^2)^0.5").unwrap();
/// context.function(Rc::new(hypot)).unwrap();
/// assert_eq!(context.evaluate("hypot(3, 4)").unwrap(), 5.0);
/// ```
pub struct ExpressionFunction {
    name:       String,
    parameters: Vec<String>,
    body:       Expr,
    context:    RefCell<ComplexContext>,
}

impl ExpressionFunction {
    /// Builds a function named `name` over `parameters` from the formula
    /// `body`, parsed in the dialect of `context`.
    ///
    /// # Errors
    /// - `InvalidName` for the function name or a parameter name.
    /// - `WrongKind` for a parameter named like a constant or function.
    /// - A parse error for the body, or an evaluation error raised while
    ///   simplifying it.
    pub fn new<B: Bridge>(context: &Context<B>,
                          name: &str,
                          parameters: &[&str],
                          body: &str)
                          -> Result<Self> {
        validate_name(name)?;
        let mut inner = context.copy_as_complex(false);
        inner.variables(parameters.iter().copied())?;

        let parsed = inner.parse(body)?;
        let body = inner.simplify(&parsed)?;
        log::debug!("defined function '{name}({})' as {body}", parameters.join(", "));

        Ok(Self { name: name.to_string(),
                  parameters: parameters.iter().map(|p| (*p).to_string()).collect(),
                  body,
                  context: RefCell::new(inner) })
    }

    /// Returns the parameter names in call order.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Returns the simplified body.
    #[must_use]
    pub const fn body(&self) -> &Expr {
        &self.body
    }
}

impl Function for ExpressionFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_args(&self) -> usize {
        self.parameters.len()
    }

    fn max_args(&self) -> usize {
        self.parameters.len()
    }

    fn evaluate(&self, _scope: &Scope, args: &[Complex]) -> EvalResult<Complex> {
        check_arity(&self.name, args, self.parameters.len())?;
        let mut inner = self.context
                            .try_borrow_mut()
                            .map_err(|_| EvalError::Reentrant { name: self.name.clone() })?;

        for (parameter, value) in self.parameters.iter().zip(args) {
            inner.scope_mut()
                 .set(parameter, value)
                 .map_err(|_| EvalError::Unresolved { name:     parameter.clone(),
                                                      expected: "variable", })?;
        }
        self.body.evaluate(inner.scope())
    }
}
