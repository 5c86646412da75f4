use std::rc::Rc;

use arbeval::{
    bridge::{
        core::{NonRealPolicy, RoundingRule},
        double::DoubleBridge,
    },
    context::{ComplexContext, Context, DecimalContext, DoubleContext, FloatContext},
    error::{DefinitionError, Error, EvalError},
    interpreter::{
        registry::DefinitionKind,
        value::precision::Precision,
    },
    util::num::bits_for_digits,
};
use bigdecimal::{BigDecimal, RoundingMode};
use rug::{Complex, Float};

fn decimal(text: &str) -> BigDecimal {
    text.parse().unwrap()
}

#[test]
fn minimal_contexts_are_nearly_empty() {
    let double = DoubleContext::minimal();
    assert!(double.function_names().is_empty());
    assert!(double.value_names().is_empty());

    let decimal = DecimalContext::minimal(RoundingRule::DECIMAL64);
    assert!(decimal.function_names().is_empty());
    assert!(decimal.value_names().is_empty());

    let complex = ComplexContext::minimal(RoundingRule::DECIMAL64);
    assert!(complex.function_names().is_empty());
    assert_eq!(complex.value_names(), ["i"]);
}

#[test]
fn standard_contexts_list_their_definitions() {
    let functions = ["acos", "acosh", "asin", "asinh", "atan", "atanh", "cos", "cosh", "ln", "log",
                     "sin", "sinh", "tan", "tanh"];

    let double = DoubleContext::standard();
    assert_eq!(double.function_names(), functions);
    assert_eq!(double.constant_names(), ["e", "pi"]);
    assert!(double.variable_names().is_empty());

    let decimal = DecimalContext::standard(RoundingRule::DECIMAL128);
    assert_eq!(decimal.function_names(), functions);
    assert_eq!(decimal.value_names(), ["e", "pi"]);

    let complex = ComplexContext::standard(RoundingRule::DECIMAL128);
    assert_eq!(complex.function_names(), functions);
    assert_eq!(complex.constant_names(), ["e", "i", "pi"]);
}

#[test]
fn default_precisions() {
    assert_eq!(DoubleContext::standard().precision(), Precision::new(20));
    assert_eq!(DecimalContext::minimal(RoundingRule::DECIMAL32).precision(),
               Precision::new(17));
    assert_eq!(ComplexContext::minimal(RoundingRule::DECIMAL128).precision(),
               Precision::new(44));
    let explicit = DecimalContext::minimal_with_precision(RoundingRule::DECIMAL64, Precision::new(100));
    assert_eq!(explicit.precision().digits(), 100);
}

#[test]
fn redefinition_names_the_existing_kind() {
    let mut context = DoubleContext::standard();
    context.variable("a").unwrap();

    let err = context.constant("a", &1.0).err().unwrap();
    assert_eq!(err,
               Error::Definition(DefinitionError::Redefinition { name:     "a".to_string(),
                                                                 existing: DefinitionKind::Variable, }));
    assert_eq!(err.to_string(),
               "Redefinition of 'a' (there is already a variable with this name)");

    let err = context.set_variable("pi", &1.0).err().unwrap();
    assert_eq!(err.to_string(), "'pi' is a constant but not a variable");

    assert!(context.variable("sin").is_err());
    assert!(context.constant_with("e", |p: Precision| p.zero()).is_err());
    assert!(context.with_trigonometric_functions().is_err());
}

#[test]
fn redeclaring_a_variable_resets_it() {
    let mut context = DoubleContext::minimal();
    context.set_variable("a", &5.0).unwrap();
    assert_eq!(context.value("a").unwrap(), Some(5.0));
    context.variable("a").unwrap();
    assert_eq!(context.value("a").unwrap(), Some(0.0));
}

#[test]
fn names_are_validated() {
    let mut context = DoubleContext::minimal();
    let err = context.variable("bad guy").err().unwrap();
    assert_eq!(err.to_string(),
               "Invalid name 'bad guy' - must conform to pattern '^[a-zA-Z]+$'");
    assert!(context.constant("x2", &1.0).is_err());
    assert!(context.define_function("", &[], "1").is_err());
}

#[test]
fn introspection() {
    let mut context = DoubleContext::standard();
    context.set_variables([("x", 1.5), ("y", -2.0)])
           .unwrap()
           .constants([("half", 0.5)])
           .unwrap();

    let variables = context.variable_values().unwrap();
    assert_eq!(variables.len(), 2);
    assert_eq!(variables["x"], 1.5);
    assert_eq!(variables["y"], -2.0);

    let constants = context.constant_values().unwrap();
    assert_eq!(constants["half"], 0.5);
    assert!((constants["pi"] - std::f64::consts::PI).abs() < 1e-15);
    assert_eq!(context.values().unwrap().len(), 5);

    assert!(context.is_constant("half"));
    assert!(!context.is_constant("x"));
    assert!(!context.is_constant("nothing"));

    assert_eq!(context.value("nothing").unwrap(), None);
    assert!(context.value("sin").is_err());
    assert!(context.function_of("sin").unwrap().is_some());
    assert!(context.function_of("nothing").unwrap().is_none());
    assert!(context.function_of("x").is_err());
    assert_eq!(context.value_internal("y").unwrap().unwrap().real().to_f64(), -2.0);
}

#[test]
fn copies_carry_constants_and_functions() {
    let mut context = DoubleContext::standard();
    context.set_variable("x", &3.0).unwrap();
    context.define_function("twice", &["a"], "2*a").unwrap();

    let with = context.copy(true);
    assert_eq!(with.evaluate("twice(x)").unwrap(), 6.0);

    let without = context.copy(false);
    assert!(without.variable_names().is_empty());
    assert_eq!(without.evaluate("twice(pi)").unwrap(), 2.0 * std::f64::consts::PI);

    let complex = context.copy_as_complex(true);
    assert_eq!(complex.precision(), context.precision());
    assert_eq!(complex.evaluate("twice(x)").unwrap().real().to_f64(), 6.0);
}

#[test]
fn user_functions_use_a_private_scope() {
    let mut context = DoubleContext::standard();
    context.set_variable("y", &100.0).unwrap();
    context.define_function("f", &["x", "y"], "x^y + y^x").unwrap();
    context.constant("two", &2.0).unwrap();

    assert_eq!(context.evaluate("f(two, 3)").unwrap(), 17.0);
    assert_eq!(context.value("y").unwrap(), Some(100.0));

    let function = context.function_of("f").unwrap().unwrap();
    assert_eq!((function.min_args(), function.max_args()), (2, 2));
    assert!(context.define_function("f", &["x"], "x").is_err());
    assert!(context.define_function("g", &["x"], "x + nothing").is_err());
}

#[test]
fn double_bridge_non_real_policy() {
    let lenient = DoubleContext::standard();
    assert!(lenient.evaluate("(-1)^0.5").unwrap().is_nan());
    assert!(lenient.evaluate("ln(-1)").unwrap().is_nan());

    let strict = DoubleContext::standard_with(DoubleBridge::new(NonRealPolicy::Fail));
    assert!(matches!(strict.evaluate("(-1)^0.5"),
                     Err(Error::Eval(EvalError::NotReal { .. }))));
    assert_eq!(strict.evaluate("((-1)^0.5)^2").unwrap(), -1.0);
}

#[test]
fn double_bridge_rejects_non_finite_input() {
    let mut context = DoubleContext::minimal();
    assert!(matches!(context.set_variable("x", &f64::INFINITY),
                     Err(Error::Eval(EvalError::NonFiniteInput { .. }))));
}

#[test]
fn decimal_bridge_rounds_once() {
    let context = DecimalContext::standard(RoundingRule::DECIMAL128);
    assert_eq!(context.evaluate("(2+3)*4").unwrap(), decimal("2e+1"));
    assert_eq!(context.evaluate("sin(pi/4)*2^0.5").unwrap(), decimal("1"));
    assert_eq!(context.evaluate("1/3").unwrap(),
               decimal("0.3333333333333333333333333333333333"));
    assert!(matches!(context.evaluate("-1^0.5"),
                     Err(Error::Eval(EvalError::NotReal { .. }))));

    let coarse = DecimalContext::standard(RoundingRule::new(5, RoundingMode::Down));
    assert_eq!(coarse.evaluate("pi").unwrap(), decimal("3.1415"));
    assert_eq!(coarse.evaluate("2/3").unwrap(), decimal("0.66666"));
}

#[test]
fn decimal_constants_follow_the_rule() {
    for (digits, pi, e) in [(3, "3.14", "2.72"), (10, "3.141592654", "2.718281828")] {
        let rule = RoundingRule::new(digits, RoundingMode::HalfEven);
        let context = DecimalContext::standard(rule);
        assert_eq!(context.evaluate("pi").unwrap(), decimal(pi));
        assert_eq!(context.evaluate("e").unwrap(), decimal(e));
    }
}

#[test]
fn decimal_values_survive_a_round_trip() {
    let mut context = DecimalContext::minimal(RoundingRule::DECIMAL64);
    for text in ["0.1", "-7.25", "123456789.0123456", "1e-30"] {
        context.set_variable("v", &decimal(text)).unwrap();
        assert_eq!(context.value("v").unwrap(), Some(decimal(text)));
        assert_eq!(context.evaluate("v").unwrap(), decimal(text));
    }
}

#[test]
fn float_bridge_rounds_to_the_rule() {
    let rule = RoundingRule::new(10, RoundingMode::HalfEven);
    let bits = bits_for_digits(10);
    let float = |text: &str| Float::with_val(bits, Float::parse(text).unwrap());

    let context = FloatContext::standard(rule);
    let pi = context.evaluate("pi").unwrap();
    assert_eq!(pi, float("3.141592654"));
    assert_eq!(pi.prec(), bits);
    assert_eq!(context.evaluate("2^0.5 * 2^0.5").unwrap(), float("2"));
    assert_eq!(context.evaluate("2/3").unwrap(), float("0.6666666667"));
    assert!(matches!(context.evaluate("(-1)^0.5"),
                     Err(Error::Eval(EvalError::NotReal { .. }))));

    let coarse = FloatContext::minimal(RoundingRule::new(5, RoundingMode::Down));
    assert!(coarse.function_names().is_empty());
    assert_eq!(coarse.evaluate("2/3").unwrap(), Float::with_val(bits_for_digits(5), Float::parse("0.66666").unwrap()));

    let explicit = FloatContext::standard_with_precision(rule, Precision::new(60));
    assert_eq!(explicit.precision().digits(), 60);
    assert_eq!(explicit.evaluate("e").unwrap(), float("2.718281828"));
}

#[test]
fn float_values_survive_a_round_trip() {
    let rule = RoundingRule::DECIMAL64;
    let bits = bits_for_digits(rule.digits());
    let mut context = FloatContext::minimal(rule);
    for text in ["0.1", "-7.25", "123456789.0123456", "1e-30"] {
        let value = Float::with_val(bits, Float::parse(text).unwrap());
        context.set_variable("v", &value).unwrap();
        assert_eq!(context.value("v").unwrap(), Some(value.clone()));
        assert_eq!(context.evaluate("v").unwrap(), value);
    }
}

fn assert_not_finite<T: std::fmt::Debug>(result: Result<T, Error>, src: &str) {
    assert!(matches!(result, Err(Error::Eval(EvalError::NotFinite { .. }))),
            "'{src}' gave {result:?}");
}

#[test]
fn diverging_results_are_not_finite_in_every_bridge() {
    for src in ["ln(0)", "0^-1", "10^10^20", "log(0, 2)"] {
        assert_not_finite(DoubleContext::standard().evaluate(src), src);
        assert_not_finite(DecimalContext::standard(RoundingRule::DECIMAL64).evaluate(src), src);
        assert_not_finite(FloatContext::standard(RoundingRule::DECIMAL64).evaluate(src), src);
        assert_not_finite(ComplexContext::standard(RoundingRule::DECIMAL64).evaluate(src), src);
    }
    assert_eq!(DoubleContext::standard().evaluate("1/0").unwrap_err(),
               Error::Eval(EvalError::DivisionByZero));
    assert_eq!(DoubleContext::standard().evaluate("0^2").unwrap(), 0.0);
}

#[test]
fn complex_bridge() {
    let mut context = ComplexContext::standard(RoundingRule::DECIMAL64);
    let root = context.evaluate("(-1)^0.5").unwrap();
    assert!(root.real().is_zero());
    assert_eq!(root.imag().to_f64(), 1.0);

    context.with_complex_functions().unwrap();
    let z = Complex::with_val(context.precision().bits(), (3, 4));
    context.set_variable("z", &z).unwrap();
    assert_eq!(context.evaluate("abs(z)").unwrap().real().to_f64(), 5.0);
    assert_eq!(context.evaluate("norm(z)").unwrap().real().to_f64(), 25.0);
    assert_eq!(context.evaluate("real(z) + imag(z)").unwrap().real().to_f64(), 7.0);
    let angle = context.evaluate("arg(i)").unwrap().real().to_f64();
    assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    assert_eq!(context.evaluate("z*i").unwrap(),
               Complex::with_val(context.precision().bits(), (-4, 3)));
}

#[test]
fn lazy_constants_are_computed_once() {
    let calls = Rc::new(std::cell::Cell::new(0));
    let counter = Rc::clone(&calls);

    let mut context = DoubleContext::minimal();
    context.constant_with("tau", move |p: Precision| {
               counter.set(counter.get() + 1);
               p.real(Float::with_val(p.bits(), rug::float::Constant::Pi) * 2)
           })
           .unwrap();
    assert_eq!(calls.get(), 0);

    let expr = context.parse("tau/2").unwrap();
    assert!(expr.is_invariant(context.scope()));
    assert_eq!(context.evaluate_expr(&expr).unwrap(), std::f64::consts::PI);
    assert_eq!(context.evaluate_expr(&expr).unwrap(), std::f64::consts::PI);
    assert_eq!(calls.get(), 1);
}

#[test]
fn generic_contexts_start_empty() {
    let context = Context::new(DoubleBridge::default(), Precision::new(50));
    assert!(context.function_names().is_empty());
    assert_eq!(context.evaluate("1/4").unwrap(), 0.25);
}
