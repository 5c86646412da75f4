use std::rc::Rc;

use rug::Complex;

use crate::{
    ast::Expr,
    error::{DefinitionError, DefinitionResult, EvalError, EvalResult},
    interpreter::{
        evaluator::{binary::eval_binary, function::core::Function, utils::check_finite},
        registry::{Definition, Registry, Variable},
        value::precision::Precision,
    },
};

/// The internal evaluation environment: a working precision and the
/// definitions names resolve to.
///
/// Every context owns one scope. Expressions are evaluated against it and
/// functions receive it when called.
#[derive(Debug, Clone)]
pub struct Scope {
    precision: Precision,
    registry:  Registry,
}

impl Scope {
    /// Creates a scope without definitions.
    #[must_use]
    pub fn new(precision: Precision) -> Self {
        Self::with_registry(precision, Registry::new())
    }

    /// Creates a scope from an existing registry.
    #[must_use]
    pub const fn with_registry(precision: Precision, registry: Registry) -> Self {
        Self { precision, registry }
    }

    /// Returns the working precision.
    #[must_use]
    pub const fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns the definitions.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the definitions for modification.
    pub const fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Resolves a constant or variable to its current value.
    ///
    /// # Errors
    /// `Unresolved` if `name` is unknown or a function.
    pub fn value(&self, name: &str) -> EvalResult<Complex> {
        match self.registry.get(name) {
            Some(Definition::Constant(constant)) => Ok(constant.value(self.precision).clone()),
            Some(Definition::Variable(variable)) => Ok(variable.value().clone()),
            _ => Err(EvalError::Unresolved { name:     name.to_string(),
                                             expected: "value", }),
        }
    }

    /// Resolves a function.
    ///
    /// # Errors
    /// `Unresolved` if `name` is unknown or not a function.
    pub fn function(&self, name: &str) -> EvalResult<Rc<dyn Function>> {
        match self.registry.get(name) {
            Some(Definition::Function(function)) => Ok(Rc::clone(function)),
            _ => Err(EvalError::Unresolved { name:     name.to_string(),
                                             expected: "function", }),
        }
    }

    /// Declares a zero valued variable, or resets an existing one to zero.
    ///
    /// # Errors
    /// - `InvalidName` for a malformed name.
    /// - `WrongKind` if `name` is a constant or function.
    pub fn declare(&mut self, name: &str) -> DefinitionResult<()> {
        let precision = self.precision;
        match self.registry.variable_mut(name)? {
            Some(variable) => variable.reset(precision),
            None => self.registry
                        .define(Definition::Variable(Variable::new(name, precision)))?,
        }
        Ok(())
    }

    /// Stores `value` in a variable, declaring it first if needed.
    ///
    /// # Errors
    /// - `InvalidName` for a malformed name.
    /// - `WrongKind` if `name` is a constant or function.
    pub fn assign(&mut self, name: &str, value: &Complex) -> DefinitionResult<()> {
        let precision = self.precision;
        if let Some(variable) = self.registry.variable_mut(name)? {
            variable.set(value, precision);
            return Ok(());
        }
        let mut variable = Variable::new(name, precision);
        variable.set(value, precision);
        self.registry.define(Definition::Variable(variable))
    }

    /// Stores `value` in an existing variable.
    ///
    /// # Errors
    /// - `Undefined` if there is no such variable.
    /// - `WrongKind` if `name` is a constant or function.
    pub fn set(&mut self, name: &str, value: &Complex) -> DefinitionResult<()> {
        let precision = self.precision;
        let variable = self.registry
                           .variable_mut(name)?
                           .ok_or_else(|| DefinitionError::Undefined { name:     name.to_string(),
                                                                       expected: "variable", })?;
        variable.set(value, precision);
        Ok(())
    }
}

impl Expr {
    /// Evaluates the expression in `scope`.
    ///
    /// Operands are evaluated left to right, names are resolved against the
    /// scope at the time of the call and the result is held at the scope's
    /// precision.
    ///
    /// # Errors
    /// - `Unresolved` for names that do not resolve.
    /// - `DivisionByZero` for division by an exact zero.
    /// - `NotFinite` when an operation or function result diverges.
    /// - Whatever a called function reports.
    ///
    /// # Example
    /// ```
    /// use arbeval::context::DoubleContext;
    ///
    /// let mut context = DoubleContext::minimal();
    /// context.set_variable("x", &3.0).unwrap();
    ///
    /// let expr = context.parse("x*x - 1").unwrap();
    /// let value = expr.evaluate(context.scope()).unwrap();
    /// assert_eq!(value.real().to_f64(), 8.0);
    /// ```
    pub fn evaluate(&self, scope: &Scope) -> EvalResult<Complex> {
        match self {
            Self::Literal(value) => check_finite(scope.precision().quantize(value)),
            Self::Name(name) => scope.value(name),
            Self::Neg(operand) => Ok(-operand.evaluate(scope)?),
            Self::Binary { op, left, right } => {
                let left = left.evaluate(scope)?;
                let right = right.evaluate(scope)?;
                log::trace!("evaluating {left} {op} {right}");
                eval_binary(*op, left, &right, scope.precision())
            },
            Self::Call { name, arguments } => {
                let function = scope.function(name)?;
                let values = arguments.iter()
                                      .map(|argument| argument.evaluate(scope))
                                      .collect::<EvalResult<Vec<_>>>()?;
                log::trace!("calling '{name}' with {} arguments", values.len());
                let result = function.evaluate(scope, &values)?;
                check_finite(scope.precision().quantize(&result))
            },
        }
    }

    /// Tells whether the expression evaluates to the same value on every call
    /// in `scope`, that is whether every name in it is a constant.
    ///
    /// A call is invariant when all its arguments are.
    #[must_use]
    pub fn is_invariant(&self, scope: &Scope) -> bool {
        match self {
            Self::Literal(_) => true,
            Self::Name(name) => scope.registry().is_constant(name),
            Self::Neg(operand) => operand.is_invariant(scope),
            Self::Binary { left, right, .. } => {
                left.is_invariant(scope) && right.is_invariant(scope)
            },
            Self::Call { arguments, .. } => arguments.iter().all(|a| a.is_invariant(scope)),
        }
    }

    /// Folds every invariant subtree into a literal.
    ///
    /// Returns a new tree. No algebraic identities are applied, so `0*x`
    /// stays as it is.
    ///
    /// # Errors
    /// Any evaluation error raised while folding a subtree, e.g. for `1/0`.
    ///
    /// # Example
    /// ```
    /// use arbeval::context::DoubleContext;
    ///
    /// let mut context = DoubleContext::standard();
    /// context.variable("x").unwrap();
    ///
    /// let expr = context.parse("x * (2 + 3) + sin(0) * x").unwrap();
    /// let simplified = expr.simplify(context.scope()).unwrap();
    /// assert_eq!(simplified.to_string(), "((x * 5) + (0 * x))");
    /// assert_eq!(simplified.simplify(context.scope()).unwrap(), simplified);
    /// ```
    pub fn simplify(&self, scope: &Scope) -> EvalResult<Self> {
        if self.is_invariant(scope) {
            return self.evaluate(scope).map(Self::Literal);
        }
        Ok(match self {
            Self::Literal(_) | Self::Name(_) => self.clone(),
            Self::Neg(operand) => Self::neg(operand.simplify(scope)?),
            Self::Binary { op, left, right } => {
                Self::binary(*op, left.simplify(scope)?, right.simplify(scope)?)
            },
            Self::Call { name, arguments } => {
                Self::call(name.clone(),
                           arguments.iter()
                                    .map(|argument| argument.simplify(scope))
                                    .collect::<EvalResult<Vec<_>>>()?)
            },
        })
    }
}
