use crate::{
    ast::Expr,
    interpreter::parser::{
        binary::{FACTOR_OPERATORS, POWER_OPERATORS, SUM_OPERATORS},
        core::{Dialect, Grammar},
        unary::SIGN_OPERATORS,
        utils::{Backtrack, Cursor, Parsed, Rule},
    },
};

impl Grammar<'_> {
    /// Parses sums and differences.
    ///
    /// The rule is: `sum := factor (("+" | "-") factor)+ | factor`
    pub(crate) fn sum(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        self.memoized(c, Rule::Sum, |g, c| g.choice(c, &[Self::sum_chain, Self::factor]))
    }

    fn sum_chain(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        self.left_fold(c, Self::factor, Self::factor, SUM_OPERATORS)
    }

    /// Parses products and quotients.
    ///
    /// The rule is: `factor := power (("*" | "/") power)+ | power`
    pub(crate) fn factor(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        self.memoized(c, Rule::Factor, |g, c| g.choice(c, &[Self::factor_chain, Self::power]))
    }

    fn factor_chain(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        self.left_fold(c, Self::power, Self::power, FACTOR_OPERATORS)
    }

    /// Parses powers, and in the simplified dialect implicit products.
    ///
    /// Standard:
    /// `power := primitive ("^" primitive)* "^" power | primitive`
    ///
    /// Simplified:
    /// ```text
    /// power := sign ("^" sign)* "^" product
    ///        | sign primitive+ "^" power
    ///        | product
    /// ```
    ///
    /// The second simplified alternative raises only the last factor of the
    /// implicit product: `2x^3` is `2*(x^3)`.
    pub(crate) fn power(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        self.memoized(c, Rule::Power, |g, c| match g.dialect {
                Dialect::Standard => g.choice(c, &[Self::standard_power_chain, Self::primitive]),
                Dialect::Simplified => g.choice(c,
                                                &[Self::simplified_power_chain,
                                                  Self::raised_product,
                                                  Self::implicit_product]),
            })
    }

    fn standard_power_chain(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        self.right_fold(c, Self::primitive, Self::primitive, Self::power, POWER_OPERATORS)
    }

    fn simplified_power_chain(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        self.right_fold(c, Self::sign, Self::sign, Self::implicit_product, POWER_OPERATORS)
    }

    fn raised_product(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        let mut factors = self.list(c, Self::sign, Self::primitive, None, true)?;
        let op = c.eat_operator(POWER_OPERATORS).ok_or(Backtrack)?;
        let exponent = self.power(c)?;

        let base = factors.pop().ok_or(Backtrack)?;
        let raised = op(base, exponent);
        Ok(match fold_product(factors) {
               Some(product) => Expr::mul(product, raised),
               None => raised,
           })
    }

    /// Parses an implicit product in the simplified dialect.
    ///
    /// The rule is: `product := sign primitive+ | sign`
    ///
    /// Only the first factor may carry a sign: `-2x` is `-(2*x)` while `2-x`
    /// is a difference.
    pub(crate) fn implicit_product(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        self.memoized(c, Rule::ImplicitProduct, |g, c| {
                g.choice(c, &[Self::implicit_product_chain, Self::sign])
            })
    }

    fn implicit_product_chain(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        let factors = self.list(c, Self::sign, Self::primitive, None, true)?;
        fold_product(factors).ok_or(Backtrack)
    }

    /// Parses a signed power in the simplified dialect.
    ///
    /// The rule is: `sign := ("-" | "+") power | primitive`
    pub(crate) fn sign(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        self.memoized(c, Rule::Sign, |g, c| g.choice(c, &[Self::signed_power, Self::primitive]))
    }

    fn signed_power(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        self.unary(c, SIGN_OPERATORS, Self::power)
    }
}

/// Multiplies `factors` from left to right.
fn fold_product(factors: Vec<Expr>) -> Option<Expr> {
    factors.into_iter().reduce(Expr::mul)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use rug::Complex;

    use crate::{
        ast::Expr,
        error::{EvalResult, ParseError},
        interpreter::{
            evaluator::{core::Scope, function::core::Function},
            parser::core::{Dialect, Grammar},
            registry::{Constant, Definition, Registry, Variable},
            value::precision::Precision,
        },
    };

    struct Stub {
        name: &'static str,
        min:  usize,
        max:  usize,
    }

    impl Function for Stub {
        fn name(&self) -> &str {
            self.name
        }

        fn min_args(&self) -> usize {
            self.min
        }

        fn max_args(&self) -> usize {
            self.max
        }

        fn evaluate(&self, scope: &Scope, _args: &[Complex]) -> EvalResult<Complex> {
            Ok(scope.precision().zero())
        }
    }

    const PRECISION: Precision = Precision::new(20);

    fn registry() -> Registry {
        let mut registry = Registry::new();
        for name in ["x", "y", "twov"] {
            registry.define(Definition::Variable(Variable::new(name, PRECISION)))
                    .unwrap();
        }
        for name in ["one", "two"] {
            registry.define(Definition::Constant(Constant::new(name, PRECISION.zero())))
                    .unwrap();
        }
        registry.define(Definition::Function(Rc::new(Stub { name: "fna",
                                                            min:  1,
                                                            max:  1, })))
                .unwrap();
        registry.define(Definition::Function(Rc::new(Stub { name: "fnb",
                                                            min:  1,
                                                            max:  2, })))
                .unwrap();
        registry
    }

    fn parse(dialect: Dialect, source: &str) -> Result<Expr, ParseError> {
        Grammar::new(&registry(), PRECISION, dialect).parse(source)
    }

    fn n(text: &str) -> Expr {
        Expr::literal(PRECISION, text)
    }

    fn v(name: &str) -> Expr {
        Expr::name(name)
    }

    #[test]
    fn literals() {
        assert_eq!(parse(Dialect::Standard, " 12 ").unwrap(), n("12"));
        assert_eq!(parse(Dialect::Standard, "12.").unwrap(), n("12"));
        assert_eq!(parse(Dialect::Standard, ".25").unwrap(), n("0.25"));
        assert_eq!(parse(Dialect::Standard, "1.2e3").unwrap(), n("1200"));
        assert_eq!(parse(Dialect::Standard, "5E-1").unwrap(), n("0.5"));
        assert!(parse(Dialect::Standard, ".").is_err());
        assert!(parse(Dialect::Simplified, "1.2e3").is_err());
    }

    #[test]
    fn names_and_calls() {
        assert_eq!(parse(Dialect::Standard, "twov").unwrap(), v("twov"));
        assert_eq!(parse(Dialect::Standard, "fnb(x, 1)").unwrap(),
                   Expr::call("fnb", vec![v("x"), n("1")]));
        assert!(matches!(parse(Dialect::Standard, "fna(x,1)"),
                         Err(ParseError::ArityMismatch { found: 2, offset: 8, .. })));
        assert!(matches!(parse(Dialect::Standard, "one(1,2)"),
                         Err(ParseError::TrailingInput { offset: 3, .. })));
        assert!(matches!(parse(Dialect::Standard, "fna"),
                         Err(ParseError::MissingArguments { offset: 0, .. })));
        assert!(matches!(parse(Dialect::Standard, "1 + zz"),
                         Err(ParseError::UnknownName { offset: 4, .. })));
        assert!(matches!(parse(Dialect::Standard, "xy"),
                         Err(ParseError::TrailingInput { offset: 1, .. })));
    }

    #[test]
    fn standard_precedence() {
        assert_eq!(parse(Dialect::Standard, "2^-3^x").unwrap(),
                   Expr::pow(n("2"), Expr::pow(Expr::neg(n("3")), v("x"))));
        assert_eq!(parse(Dialect::Standard, "-2^3^x").unwrap(),
                   Expr::pow(Expr::neg(n("2")), Expr::pow(n("3"), v("x"))));
        assert_eq!(parse(Dialect::Standard, "-3+x*y-5").unwrap(),
                   Expr::sub(Expr::add(Expr::neg(n("3")), Expr::mul(v("x"), v("y"))), n("5")));
        assert_eq!(parse(Dialect::Standard, "1-2-3").unwrap(),
                   Expr::sub(Expr::sub(n("1"), n("2")), n("3")));
        assert!(matches!(parse(Dialect::Standard, "2x"),
                         Err(ParseError::TrailingInput { offset: 1, .. })));
    }

    #[test]
    fn simplified_precedence() {
        assert_eq!(parse(Dialect::Simplified, "xy").unwrap(), Expr::mul(v("x"), v("y")));
        assert_eq!(parse(Dialect::Simplified, "-2x").unwrap(),
                   Expr::neg(Expr::mul(n("2"), v("x"))));
        assert_eq!(parse(Dialect::Simplified, "-y^-x").unwrap(),
                   Expr::neg(Expr::pow(v("y"), Expr::neg(v("x")))));
        assert_eq!(parse(Dialect::Simplified, "2^-3^x").unwrap(),
                   Expr::pow(n("2"), Expr::neg(Expr::pow(n("3"), v("x")))));
        assert_eq!(parse(Dialect::Simplified, "-2^3^-x").unwrap(),
                   Expr::neg(Expr::pow(n("2"), Expr::pow(n("3"), Expr::neg(v("x"))))));
        assert_eq!(parse(Dialect::Simplified, "xy^-2x").unwrap(),
                   Expr::mul(v("x"),
                             Expr::pow(v("y"), Expr::neg(Expr::mul(n("2"), v("x"))))));
        assert_eq!(parse(Dialect::Simplified, "xy^-2x^3").unwrap(),
                   Expr::mul(v("x"),
                             Expr::pow(v("y"),
                                       Expr::neg(Expr::mul(n("2"), Expr::pow(v("x"), n("3")))))));
        assert_eq!(parse(Dialect::Simplified, "2(x+1)(x-1)^4fna(y)").unwrap(),
                   Expr::mul(Expr::mul(n("2"), Expr::add(v("x"), n("1"))),
                             Expr::pow(Expr::sub(v("x"), n("1")),
                                       Expr::mul(n("4"), Expr::call("fna", vec![v("y")])))));
        assert_eq!(parse(Dialect::Simplified, "xy-2y").unwrap(),
                   Expr::sub(Expr::mul(v("x"), v("y")), Expr::mul(n("2"), v("y"))));
        assert_eq!(parse(Dialect::Simplified, "x^2y").unwrap(),
                   Expr::pow(v("x"), Expr::mul(n("2"), v("y"))));
    }

    #[test]
    fn sign_and_power_bind_differently_per_dialect() {
        assert_eq!(parse(Dialect::Standard, "-2^2").unwrap(),
                   Expr::pow(Expr::neg(n("2")), n("2")));
        assert_eq!(parse(Dialect::Simplified, "-2^2").unwrap(),
                   Expr::neg(Expr::pow(n("2"), n("2"))));
    }

    #[test]
    fn reports_unbalanced_input() {
        assert!(matches!(parse(Dialect::Standard, "(1+2"),
                         Err(ParseError::Expected { expected: "')'", found: None, offset: 4 })));
        assert!(matches!(parse(Dialect::Standard, "1+"),
                         Err(ParseError::Expected { found: None, offset: 2, .. })));
        assert!(matches!(parse(Dialect::Standard, ""),
                         Err(ParseError::Expected { found: None, offset: 0, .. })));
        assert!(matches!(parse(Dialect::Simplified, "((((((((((x))))))))))"), Ok(_)));
    }
}
