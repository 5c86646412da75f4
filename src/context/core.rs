use std::{collections::BTreeMap, fmt, rc::Rc};

use rug::Complex;

use crate::{
    ast::Expr,
    bridge::{
        complex::ComplexBridge,
        core::{Bridge, RoundingRule},
        decimal::DecimalBridge,
        double::DoubleBridge,
        float::FloatBridge,
    },
    context::expander::MacroExpander,
    error::{DefinitionResult, EvalResult, ParseResult, Result},
    interpreter::{
        evaluator::{
            core::Scope,
            function::{builtin, core::Function, expression::ExpressionFunction},
        },
        parser::core::{Dialect, Grammar},
        registry::{Constant, Definition, DefinitionKind, Registry},
        value::{constants, precision::Precision},
    },
};

/// A context evaluating formulas to `f64`.
pub type DoubleContext = Context<DoubleBridge>;
/// A context evaluating formulas to `BigDecimal`.
pub type DecimalContext = Context<DecimalBridge>;
/// A context evaluating formulas to arbitrary-precision reals.
pub type FloatContext = Context<FloatBridge>;
/// A context evaluating formulas to internal complex values.
pub type ComplexContext = Context<ComplexBridge>;

/// The entry point: parses and evaluates formulas over a set of definitions.
///
/// A context owns a [`Scope`] (its internal precision and registry), the
/// [`Bridge`] translating its values to and from the caller's type, the
/// [`Dialect`] it parses and an optional [`MacroExpander`]. The precision is
/// fixed at construction; definitions accumulate over the context's life.
///
/// # Example
/// ```
/// use arbeval::context::DoubleContext;
///
/// let mut context = DoubleContext::standard();
/// context.constant("two", &2.0)
///        .unwrap()
///        .define_function("f", &["x", "y"], "x^y + y^x")
///        .unwrap();
///
/// assert_eq!(context.evaluate("(2+3)*5").unwrap(), 25.0);
/// assert_eq!(context.evaluate("sin(pi/2)").unwrap(), 1.0);
/// assert_eq!(context.evaluate("f(two,3)").unwrap(), 17.0);
/// ```
#[derive(Clone)]
pub struct Context<B: Bridge> {
    scope:    Scope,
    bridge:   B,
    dialect:  Dialect,
    expander: Option<Rc<dyn MacroExpander>>,
}

impl<B: Bridge> Context<B> {
    /// Creates an empty context with an explicit internal precision.
    #[must_use]
    pub fn new(bridge: B, precision: Precision) -> Self {
        Self::seeded(bridge, precision, std::iter::empty())
    }

    /// Creates an empty context at the bridge's default precision.
    #[must_use]
    pub fn with_bridge(bridge: B) -> Self {
        let precision = bridge.default_precision();
        Self::new(bridge, precision)
    }

    fn seeded<I>(bridge: B, precision: Precision, definitions: I) -> Self
        where I: IntoIterator<Item = Definition>
    {
        Self { scope: Scope::with_registry(precision, Registry::seeded(definitions)),
               bridge,
               dialect: Dialect::default(),
               expander: None }
    }

    /// Returns the internal precision.
    #[must_use]
    pub const fn precision(&self) -> Precision {
        self.scope.precision()
    }

    /// Returns the bridge.
    #[must_use]
    pub const fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Returns the scope expressions are evaluated in.
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }

    pub(crate) const fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }

    /// Returns the definitions.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        self.scope.registry()
    }

    /// Returns the dialect formulas are parsed in.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Selects the dialect formulas are parsed in.
    pub const fn set_dialect(&mut self, dialect: Dialect) -> &mut Self {
        self.dialect = dialect;
        self
    }

    /// Returns the macro expander, if any.
    #[must_use]
    pub fn macro_expander(&self) -> Option<&Rc<dyn MacroExpander>> {
        self.expander.as_ref()
    }

    /// Sets or clears the macro expander applied before parsing.
    pub fn set_macro_expander(&mut self, expander: Option<Rc<dyn MacroExpander>>) -> &mut Self {
        self.expander = expander;
        self
    }

    /// Parses `source` into an expression tree.
    ///
    /// The macro expander, if set, is applied first. Names are resolved
    /// against the current definitions.
    ///
    /// # Errors
    /// Any [`ParseError`](crate::error::ParseError).
    pub fn parse(&self, source: &str) -> ParseResult<Expr> {
        let grammar = Grammar::new(self.registry(), self.precision(), self.dialect);
        match &self.expander {
            Some(expander) => grammar.parse(&expander.expand(source)),
            None => grammar.parse(source),
        }
    }

    /// Parses and evaluates `source`, converting the result to the external
    /// type.
    ///
    /// # Errors
    /// A parse error, an evaluation error or a conversion error.
    pub fn evaluate(&self, source: &str) -> Result<B::Value> {
        let expr = self.parse(source)?;
        Ok(self.evaluate_expr(&expr)?)
    }

    /// Parses and evaluates `source`, returning the internal value.
    ///
    /// # Errors
    /// A parse error or an evaluation error.
    pub fn evaluate_internal(&self, source: &str) -> Result<Complex> {
        let expr = self.parse(source)?;
        Ok(expr.evaluate(&self.scope)?)
    }

    /// Evaluates a parsed expression and converts the result to the external
    /// type.
    ///
    /// # Errors
    /// An evaluation error or a conversion error.
    pub fn evaluate_expr(&self, expr: &Expr) -> EvalResult<B::Value> {
        self.from_internal(&expr.evaluate(&self.scope)?)
    }

    /// Folds the invariant subtrees of `expr` into literals.
    ///
    /// # Errors
    /// Any error raised while folding.
    pub fn simplify(&self, expr: &Expr) -> EvalResult<Expr> {
        expr.simplify(&self.scope)
    }

    /// Converts an external value to the internal domain.
    ///
    /// # Errors
    /// `NonFiniteInput` for values without an internal counterpart.
    pub fn to_internal(&self, value: &B::Value) -> EvalResult<Complex> {
        self.bridge.to_internal(value, self.precision())
    }

    /// Converts an internal value to the external type.
    ///
    /// # Errors
    /// `NotReal` if the external type cannot hold the value.
    pub fn from_internal(&self, value: &Complex) -> EvalResult<B::Value> {
        self.bridge.from_internal(value)
    }

    /// Defines a constant.
    ///
    /// # Errors
    /// - `NonFiniteInput` if the value cannot be converted.
    /// - `InvalidName` or `Redefinition`.
    pub fn constant(&mut self, name: &str, value: &B::Value) -> Result<&mut Self> {
        let internal = self.to_internal(value)?;
        self.define(Definition::Constant(Constant::new(name, internal)))?;
        Ok(self)
    }

    /// Defines several constants, stopping at the first failure.
    ///
    /// # Errors
    /// As [`constant`](Self::constant).
    pub fn constants<'n, I>(&mut self, constants: I) -> Result<&mut Self>
        where I: IntoIterator<Item = (&'n str, B::Value)>
    {
        for (name, value) in constants {
            self.constant(name, &value)?;
        }
        Ok(self)
    }

    /// Defines a constant whose value `generator` computes on first use, at
    /// the precision of this context.
    ///
    /// # Errors
    /// `InvalidName` or `Redefinition`.
    pub fn constant_with<G>(&mut self, name: &str, generator: G) -> DefinitionResult<&mut Self>
        where G: Fn(Precision) -> Complex + 'static
    {
        self.define(Definition::Constant(Constant::with_generator(name, generator)))?;
        Ok(self)
    }

    /// Declares a variable holding zero. An existing variable is reset to
    /// zero.
    ///
    /// # Errors
    /// - `InvalidName` for a malformed name.
    /// - `WrongKind` if `name` is a constant or function.
    pub fn variable(&mut self, name: &str) -> DefinitionResult<&mut Self> {
        self.scope.declare(name)?;
        Ok(self)
    }

    /// Declares several variables.
    ///
    /// # Errors
    /// As [`variable`](Self::variable).
    pub fn variables<'n, I>(&mut self, names: I) -> DefinitionResult<&mut Self>
        where I: IntoIterator<Item = &'n str>
    {
        for name in names {
            self.variable(name)?;
        }
        Ok(self)
    }

    /// Stores `value` in a variable, declaring it if needed.
    ///
    /// # Errors
    /// - `NonFiniteInput` if the value cannot be converted.
    /// - `InvalidName`, or `WrongKind` if `name` is a constant or function.
    pub fn set_variable(&mut self, name: &str, value: &B::Value) -> Result<&mut Self> {
        let internal = self.to_internal(value)?;
        self.assign_internal(name, &internal)?;
        Ok(self)
    }

    /// Stores several variables, stopping at the first failure.
    ///
    /// # Errors
    /// As [`set_variable`](Self::set_variable).
    pub fn set_variables<'n, I>(&mut self, values: I) -> Result<&mut Self>
        where I: IntoIterator<Item = (&'n str, B::Value)>
    {
        for (name, value) in values {
            self.set_variable(name, &value)?;
        }
        Ok(self)
    }

    /// Stores an internal value in a variable, declaring it if needed.
    ///
    /// # Errors
    /// `InvalidName`, or `WrongKind` if `name` is a constant or function.
    pub fn assign_internal(&mut self, name: &str, value: &Complex) -> DefinitionResult<&mut Self> {
        self.scope.assign(name, value)?;
        Ok(self)
    }

    /// Registers a function.
    ///
    /// # Errors
    /// `InvalidName` or `Redefinition`.
    pub fn function(&mut self, function: Rc<dyn Function>) -> DefinitionResult<&mut Self> {
        self.define(Definition::Function(function))?;
        Ok(self)
    }

    /// Registers several functions.
    ///
    /// # Errors
    /// As [`function`](Self::function).
    pub fn functions<I>(&mut self, functions: I) -> DefinitionResult<&mut Self>
        where I: IntoIterator<Item = Rc<dyn Function>>
    {
        for function in functions {
            self.function(function)?;
        }
        Ok(self)
    }

    /// Defines a function of `parameters` whose body is the formula `body`.
    ///
    /// The body is parsed in this context's dialect against the constants and
    /// functions defined so far plus the parameters, and simplified once.
    ///
    /// # Errors
    /// - `InvalidName`, `Redefinition` or `WrongKind` for the function or
    ///   parameter names.
    /// - A parse error for the body, or an evaluation error raised while
    ///   simplifying it.
    ///
    /// # Example
    /// ```
    /// use arbeval::{context::DoubleContext, interpreter::parser::core::Dialect};
    ///
    /// let mut context = DoubleContext::standard();
    /// context.set_dialect(Dialect::Simplified);
    /// context.define_function("area", &["r"], "pi r^2").unwrap();
    /// assert!((context.evaluate("area(2)").unwrap() - 4.0 * std::f64::consts::PI).abs() < 1e-12);
    /// assert!(context.define_function("g", &["pi"], "2pi").is_err());
    /// ```
    pub fn define_function(&mut self,
                           name: &str,
                           parameters: &[&str],
                           body: &str)
                           -> Result<&mut Self> {
        let function = ExpressionFunction::new(self, name, parameters, body)?;
        self.function(Rc::new(function))?;
        Ok(self)
    }

    /// Adds `pi`, `e` and `i`.
    ///
    /// # Errors
    /// `Redefinition` if any of the names is taken.
    pub fn with_standard_constants(&mut self) -> DefinitionResult<&mut Self> {
        for constant in constants::standard() {
            self.define(Definition::Constant(constant))?;
        }
        Ok(self)
    }

    /// Adds `sin`, `cos` and `tan`.
    ///
    /// # Errors
    /// `Redefinition` if any of the names is taken.
    pub fn with_trigonometric_functions(&mut self) -> DefinitionResult<&mut Self> {
        self.functions(builtin::trigonometric())
    }

    /// Adds `asin`, `acos` and `atan`.
    ///
    /// # Errors
    /// `Redefinition` if any of the names is taken.
    pub fn with_inverse_trigonometric_functions(&mut self) -> DefinitionResult<&mut Self> {
        self.functions(builtin::inverse_trigonometric())
    }

    /// Adds `sinh`, `cosh` and `tanh`.
    ///
    /// # Errors
    /// `Redefinition` if any of the names is taken.
    pub fn with_hyperbolic_functions(&mut self) -> DefinitionResult<&mut Self> {
        self.functions(builtin::hyperbolic())
    }

    /// Adds `asinh`, `acosh` and `atanh`.
    ///
    /// # Errors
    /// `Redefinition` if any of the names is taken.
    pub fn with_inverse_hyperbolic_functions(&mut self) -> DefinitionResult<&mut Self> {
        self.functions(builtin::inverse_hyperbolic())
    }

    /// Adds `ln` and `log`.
    ///
    /// # Errors
    /// `Redefinition` if any of the names is taken.
    pub fn with_logarithm_functions(&mut self) -> DefinitionResult<&mut Self> {
        self.functions(builtin::logarithm())
    }

    /// Adds `arg`, `abs`, `norm`, `real` and `imag`.
    ///
    /// # Errors
    /// `Redefinition` if any of the names is taken.
    pub fn with_complex_functions(&mut self) -> DefinitionResult<&mut Self> {
        self.functions(builtin::complex())
    }

    fn define(&mut self, definition: Definition) -> DefinitionResult<()> {
        self.scope.registry_mut().define(definition)
    }

    /// Returns the external value of a constant or variable, or `None` if
    /// `name` is unknown.
    ///
    /// # Errors
    /// `WrongKind` for a function, or a conversion error.
    pub fn value(&self, name: &str) -> Result<Option<B::Value>> {
        match self.value_internal(name)? {
            Some(internal) => Ok(Some(self.from_internal(&internal)?)),
            None => Ok(None),
        }
    }

    /// Returns the internal value of a constant or variable, or `None` if
    /// `name` is unknown.
    ///
    /// # Errors
    /// `WrongKind` for a function.
    pub fn value_internal(&self, name: &str) -> DefinitionResult<Option<Complex>> {
        Ok(self.registry().value(name)?.map(|definition| self.internal_value(definition)))
    }

    fn internal_value(&self, definition: &Definition) -> Complex {
        match definition {
            Definition::Constant(constant) => constant.value(self.precision()).clone(),
            Definition::Variable(variable) => variable.value().clone(),
            Definition::Function(_) => self.precision().zero(),
        }
    }

    fn values_where<P>(&self, include: P) -> EvalResult<BTreeMap<String, B::Value>>
        where P: Fn(&Definition) -> bool
    {
        self.registry()
            .iter()
            .filter(|d| d.is_value() && include(*d))
            .map(|d| {
                self.from_internal(&self.internal_value(d))
                    .map(|value| (d.name().to_string(), value))
            })
            .collect()
    }

    /// Returns all constants with their external values.
    ///
    /// # Errors
    /// A conversion error.
    pub fn constant_values(&self) -> EvalResult<BTreeMap<String, B::Value>> {
        self.values_where(|d| d.kind() == DefinitionKind::Constant)
    }

    /// Returns all variables with their external values.
    ///
    /// # Errors
    /// A conversion error.
    pub fn variable_values(&self) -> EvalResult<BTreeMap<String, B::Value>> {
        self.values_where(|d| d.kind() == DefinitionKind::Variable)
    }

    /// Returns all constants and variables with their external values.
    ///
    /// # Errors
    /// A conversion error.
    pub fn values(&self) -> EvalResult<BTreeMap<String, B::Value>> {
        self.values_where(|_| true)
    }

    /// Returns the names of all constants, in order.
    #[must_use]
    pub fn constant_names(&self) -> Vec<String> {
        self.names_of(DefinitionKind::Constant)
    }

    /// Returns the names of all variables, in order.
    #[must_use]
    pub fn variable_names(&self) -> Vec<String> {
        self.names_of(DefinitionKind::Variable)
    }

    /// Returns the names of all functions, in order.
    #[must_use]
    pub fn function_names(&self) -> Vec<String> {
        self.names_of(DefinitionKind::Function)
    }

    /// Returns the names of all constants and variables, in order.
    #[must_use]
    pub fn value_names(&self) -> Vec<String> {
        self.registry().value_names().map(str::to_string).collect()
    }

    fn names_of(&self, kind: DefinitionKind) -> Vec<String> {
        self.registry().names_of(kind).map(str::to_string).collect()
    }

    /// Returns the function registered under `name`, or `None` if `name` is
    /// unknown.
    ///
    /// # Errors
    /// `WrongKind` for a constant or variable.
    pub fn function_of(&self, name: &str) -> DefinitionResult<Option<Rc<dyn Function>>> {
        Ok(self.registry().function(name)?.map(Rc::clone))
    }

    /// Tells whether `name` is a constant. Unknown names are not.
    #[must_use]
    pub fn is_constant(&self, name: &str) -> bool {
        self.registry().is_constant(name)
    }

    /// Duplicates the context. Constants and functions are always carried
    /// over, variables only if `with_variables` is set.
    #[must_use]
    pub fn copy(&self, with_variables: bool) -> Self {
        Self { scope:    self.copied_scope(with_variables),
               bridge:   self.bridge.clone(),
               dialect:  self.dialect,
               expander: self.expander.clone(), }
    }

    /// Duplicates the context as a [`ComplexContext`] with the same precision
    /// and dialect, the default rounding rule and no macro expander.
    #[must_use]
    pub fn copy_as_complex(&self, with_variables: bool) -> ComplexContext {
        Context { scope:    self.copied_scope(with_variables),
                  bridge:   ComplexBridge::default(),
                  dialect:  self.dialect,
                  expander: None, }
    }

    fn copied_scope(&self, with_variables: bool) -> Scope {
        Scope::with_registry(self.precision(), self.registry().copy(with_variables))
    }
}

/// The definitions of a standard context: `constants` followed by the
/// trigonometric, hyperbolic and logarithm functions.
fn standard_definitions(constants: Vec<Constant>) -> impl Iterator<Item = Definition> {
    constants.into_iter()
             .map(Definition::Constant)
             .chain(builtin::standard().into_iter().map(Definition::Function))
}

impl DoubleContext {
    /// Creates a context without definitions.
    #[must_use]
    pub fn minimal() -> Self {
        Self::minimal_with(DoubleBridge::default())
    }

    /// Creates a context without definitions, converting through `bridge`.
    #[must_use]
    pub fn minimal_with(bridge: DoubleBridge) -> Self {
        Self::with_bridge(bridge)
    }

    /// Creates a context with `pi`, `e`, the trigonometric and hyperbolic
    /// functions, their inverses, `ln` and `log`.
    #[must_use]
    pub fn standard() -> Self {
        Self::standard_with(DoubleBridge::default())
    }

    /// Like [`standard`](Self::standard), converting through `bridge`.
    #[must_use]
    pub fn standard_with(bridge: DoubleBridge) -> Self {
        let precision = bridge.default_precision();
        Self::standard_with_precision(bridge, precision)
    }

    /// Like [`standard_with`](Self::standard_with), computing at `precision`
    /// instead of the fixed double precision.
    #[must_use]
    pub fn standard_with_precision(bridge: DoubleBridge, precision: Precision) -> Self {
        Self::seeded(bridge,
                     precision,
                     standard_definitions(vec![constants::pi(), constants::e()]))
    }
}

impl DecimalContext {
    /// Creates a context without definitions, rounding results to `rule`.
    #[must_use]
    pub fn minimal(rule: RoundingRule) -> Self {
        Self::minimal_with_precision(rule, rule.default_precision())
    }

    /// Like [`minimal`](Self::minimal) with an explicit internal precision.
    #[must_use]
    pub fn minimal_with_precision(rule: RoundingRule, precision: Precision) -> Self {
        Self::new(DecimalBridge::new(rule), precision)
    }

    /// Creates a context with `pi`, `e`, the trigonometric and hyperbolic
    /// functions, their inverses, `ln` and `log`, rounding results to `rule`.
    #[must_use]
    pub fn standard(rule: RoundingRule) -> Self {
        Self::standard_with_precision(rule, rule.default_precision())
    }

    /// Like [`standard`](Self::standard) with an explicit internal precision.
    #[must_use]
    pub fn standard_with_precision(rule: RoundingRule, precision: Precision) -> Self {
        Self::seeded(DecimalBridge::new(rule),
                     precision,
                     standard_definitions(vec![constants::pi(), constants::e()]))
    }
}

impl FloatContext {
    /// Creates a context without definitions, rounding results to `rule`.
    #[must_use]
    pub fn minimal(rule: RoundingRule) -> Self {
        Self::minimal_with_precision(rule, rule.default_precision())
    }

    /// Like [`minimal`](Self::minimal) with an explicit internal precision.
    #[must_use]
    pub fn minimal_with_precision(rule: RoundingRule, precision: Precision) -> Self {
        Self::new(FloatBridge::new(rule), precision)
    }

    /// Creates a context with `pi`, `e`, the trigonometric and hyperbolic
    /// functions, their inverses, `ln` and `log`, rounding results to `rule`.
    #[must_use]
    pub fn standard(rule: RoundingRule) -> Self {
        Self::standard_with_precision(rule, rule.default_precision())
    }

    /// Like [`standard`](Self::standard) with an explicit internal precision.
    #[must_use]
    pub fn standard_with_precision(rule: RoundingRule, precision: Precision) -> Self {
        Self::seeded(FloatBridge::new(rule),
                     precision,
                     standard_definitions(vec![constants::pi(), constants::e()]))
    }
}

impl ComplexContext {
    /// Creates a context holding only the constant `i`, rounding results to
    /// `rule`.
    #[must_use]
    pub fn minimal(rule: RoundingRule) -> Self {
        Self::minimal_with_precision(rule, rule.default_precision())
    }

    /// Like [`minimal`](Self::minimal) with an explicit internal precision.
    #[must_use]
    pub fn minimal_with_precision(rule: RoundingRule, precision: Precision) -> Self {
        Self::seeded(ComplexBridge::new(rule),
                     precision,
                     [Definition::Constant(constants::i())])
    }

    /// Creates a context with `i`, `pi`, `e`, the trigonometric and
    /// hyperbolic functions, their inverses, `ln` and `log`, rounding results
    /// to `rule`.
    #[must_use]
    pub fn standard(rule: RoundingRule) -> Self {
        Self::standard_with_precision(rule, rule.default_precision())
    }

    /// Like [`standard`](Self::standard) with an explicit internal precision.
    #[must_use]
    pub fn standard_with_precision(rule: RoundingRule, precision: Precision) -> Self {
        Self::seeded(ComplexBridge::new(rule),
                     precision,
                     standard_definitions(constants::standard()))
    }
}

impl<B> fmt::Debug for Context<B> where B: Bridge + fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
         .field("scope", &self.scope)
         .field("bridge", &self.bridge)
         .field("dialect", &self.dialect)
         .field("macro_expander", &self.expander.is_some())
         .finish()
    }
}
