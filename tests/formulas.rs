use std::fs;

use arbeval::{
    context::DoubleContext,
    error::{Error, EvalError, ParseError},
    interpreter::parser::core::Dialect,
};
use walkdir::WalkDir;

/// The context every formula here is evaluated in: the standard constants and
/// functions, the variables `x = 2` and `y = 3`, and `sq(a) = a*a`.
fn context(dialect: Dialect) -> DoubleContext {
    let mut context = DoubleContext::standard();
    context.set_dialect(dialect);
    context.set_variables([("x", 2.0), ("y", 3.0)]).unwrap();
    context.define_function("sq", &["a"], "a*a").unwrap();
    context
}

fn dialect_of(name: &str) -> Dialect {
    match name {
        "standard" => Dialect::Standard,
        "simplified" => Dialect::Simplified,
        other => panic!("Unknown dialect '{other}'"),
    }
}

fn assert_close(actual: f64, expected: f64, src: &str) {
    let tolerance = 1e-12 * expected.abs().max(1.0);
    assert!((actual - expected).abs() <= tolerance,
            "'{src}' evaluated to {actual}, expected {expected}");
}

fn assert_value(dialect: Dialect, src: &str, expected: f64) {
    match context(dialect).evaluate(src) {
        Ok(actual) => assert_close(actual, expected, src),
        Err(e) => panic!("'{src}' failed: {e}"),
    }
}

fn assert_failure(dialect: Dialect, src: &str) -> Error {
    match context(dialect).evaluate(src) {
        Ok(value) => panic!("'{src}' evaluated to {value} but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn formula_cases() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/cases").into_iter()
                                   .filter_map(Result::ok)
                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (dialect, equation) =
                line.split_once(':')
                    .unwrap_or_else(|| panic!("{path:?}:{}: missing dialect", i + 1));
            let (lhs, rhs) =
                equation.split_once("==")
                        .unwrap_or_else(|| panic!("{path:?}:{}: missing '=='", i + 1));

            let context = context(dialect_of(dialect.trim()));
            let evaluate = |src: &str| {
                context.evaluate(src)
                       .unwrap_or_else(|e| panic!("{path:?}:{}: '{src}' failed: {e}", i + 1))
            };
            assert_close(evaluate(lhs), evaluate(rhs), line);
            count += 1;
        }
    }

    assert!(count > 0, "No formula cases found in tests/cases");
}

#[test]
fn scenarios() {
    assert_value(Dialect::Standard, "(2+3)*5", 25.0);
    assert_value(Dialect::Standard, "sin(pi/2)", 1.0);

    let mut context = DoubleContext::standard();
    context.constant("two", &2.0)
           .unwrap()
           .define_function("f", &["x", "y"], "x^y + y^x")
           .unwrap();
    assert_eq!(context.evaluate("f(two,3)").unwrap(), 17.0);

    assert!(DoubleContext::standard().evaluate("-1^0.5").unwrap().is_nan());
}

#[test]
fn associativity_and_precedence() {
    for dialect in [Dialect::Standard, Dialect::Simplified] {
        assert_value(dialect, "1-2-3", -4.0);
        assert_value(dialect, "2^3^2", 512.0);
        assert_value(dialect, "12/3/2", 2.0);
        assert_value(dialect, "1+2*3^2", 19.0);
        assert_value(dialect, "(1+2)*3", 9.0);
    }
}

#[test]
fn sign_binds_differently_around_powers() {
    assert_value(Dialect::Standard, "-2^2", 4.0);
    assert_value(Dialect::Simplified, "-2^2", -4.0);
    assert_value(Dialect::Standard, "2^-1", 0.5);
    assert_value(Dialect::Simplified, "2^-1", 0.5);
    assert_value(Dialect::Standard, "--x", 2.0);
    assert_value(Dialect::Simplified, "-+x", -2.0);
}

#[test]
fn implicit_multiplication() {
    assert_value(Dialect::Simplified, "2x", 4.0);
    assert_value(Dialect::Simplified, "xy", 6.0);
    assert_value(Dialect::Simplified, "3(1+2)", 9.0);
    assert_value(Dialect::Simplified, "(x+1)(x-1)", 3.0);
    assert_value(Dialect::Simplified, "x^2y", 64.0);
    assert_value(Dialect::Simplified, "2x^2", 8.0);
    assert_value(Dialect::Simplified, "2 sq(x) y", 24.0);
    assert_value(Dialect::Simplified, "2e", 2.0 * std::f64::consts::E);

    let err = assert_failure(Dialect::Standard, "2x");
    assert!(matches!(err, Error::Parse(ParseError::TrailingInput { offset: 1, .. })));
}

#[test]
fn euler_identity() {
    let mut context = arbeval::context::ComplexContext::standard(Default::default());
    context.set_dialect(Dialect::Simplified);
    let value = context.evaluate("e^2pii").unwrap();
    assert_eq!(value.real().to_f64(), 1.0);
    assert!(value.imag().is_zero());
}

#[test]
fn literals_follow_the_dialect() {
    assert_value(Dialect::Standard, "1.5e3", 1500.0);
    assert_value(Dialect::Standard, "2.5E-1", 0.25);
    assert_value(Dialect::Standard, ".5 + 5.", 5.5);
    assert_value(Dialect::Simplified, "1.5e3", 4.5 * std::f64::consts::E);
    assert_failure(Dialect::Standard, "1..5");
    assert_failure(Dialect::Standard, ".");
}

#[test]
fn division_by_zero_is_error() {
    let err = assert_failure(Dialect::Standard, "1/0");
    assert_eq!(err, Error::Eval(EvalError::DivisionByZero));
    assert_eq!(err.to_string(), "Division by zero");
    assert_failure(Dialect::Standard, "x/(x-2)");
}

#[test]
fn unknown_names_are_parse_errors() {
    let err = assert_failure(Dialect::Standard, "x + foo");
    assert_eq!(err,
               Error::Parse(ParseError::UnknownName { name:   "foo".to_string(),
                                                      offset: 4, }));
}

#[test]
fn calls_are_checked() {
    assert!(matches!(assert_failure(Dialect::Standard, "sin"),
                     Error::Parse(ParseError::MissingArguments { .. })));
    assert!(matches!(assert_failure(Dialect::Standard, "sin(1, 2)"),
                     Error::Parse(ParseError::ArityMismatch { min: 1, max: 1, found: 2, .. })));
    assert!(matches!(assert_failure(Dialect::Standard, "log(8)"),
                     Error::Parse(ParseError::ArityMismatch { found: 1, .. })));
    assert!(matches!(assert_failure(Dialect::Standard, "sin()"),
                     Error::Parse(ParseError::Expected { .. })));
    assert_value(Dialect::Standard, "log(256, 2)", 8.0);
}

#[test]
fn unbalanced_parentheses_are_errors() {
    assert_failure(Dialect::Standard, "(1+2");
    assert_failure(Dialect::Standard, "1+2)");
    assert_failure(Dialect::Simplified, "((x)");
    assert_failure(Dialect::Standard, "");
    assert_failure(Dialect::Standard, "   ");
}

#[test]
fn names_take_the_longest_match() {
    let mut context = DoubleContext::minimal();
    context.set_dialect(Dialect::Simplified);
    context.set_variables([("a", 2.0), ("ab", 10.0), ("b", 3.0)]).unwrap();
    assert_eq!(context.evaluate("ab").unwrap(), 10.0);
    assert_eq!(context.evaluate("aab").unwrap(), 20.0);
    assert_eq!(context.evaluate("ba").unwrap(), 6.0);
    assert_eq!(context.evaluate("a b").unwrap(), 6.0);
}

#[test]
fn variables_are_read_at_evaluation_time() {
    let mut context = context(Dialect::Standard);
    let expr = context.parse("x*y").unwrap();
    assert_eq!(context.evaluate_expr(&expr).unwrap(), 6.0);
    context.set_variable("x", &10.0).unwrap();
    assert_eq!(context.evaluate_expr(&expr).unwrap(), 30.0);
}

#[test]
fn simplification_is_idempotent_and_keeps_variables() {
    let context = context(Dialect::Simplified);
    for src in ["2x + 3 * 4", "sin(pi) x + cos(0)", "sq(x) + sq(2)", "x^(1+1)y", "-(2+3)"] {
        let expr = context.parse(src).unwrap();
        let once = context.simplify(&expr).unwrap();
        let twice = context.simplify(&once).unwrap();
        assert_eq!(once, twice, "simplifying '{src}' is not idempotent");
        assert_close(context.evaluate_expr(&once).unwrap(),
                     context.evaluate_expr(&expr).unwrap(),
                     src);
    }

    let folded = context.simplify(&context.parse("2pi - e").unwrap()).unwrap();
    assert!(folded.is_invariant(context.scope()));
    assert!(matches!(folded, arbeval::ast::Expr::Literal(_)));

    let kept = context.simplify(&context.parse("0x").unwrap()).unwrap();
    assert_eq!(kept.to_string(), "(0 * x)");
    assert!(!kept.is_invariant(context.scope()));
}

#[test]
fn macro_expander_runs_before_parsing() {
    let mut context = context(Dialect::Standard);
    context.set_macro_expander(Some(std::rc::Rc::new(|src: &str| src.replace("twice", "2*"))));
    assert_eq!(context.evaluate("twice x").unwrap(), 4.0);
    context.set_macro_expander(None);
    assert!(context.evaluate("twice x").is_err());
}
