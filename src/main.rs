use std::{error::Error, process};

use arbeval::{
    bridge::{
        core::{Bridge, RoundingRule},
        double::DoubleBridge,
    },
    context::{ComplexContext, Context, DecimalContext, DoubleContext, FloatContext},
    interpreter::{parser::core::Dialect, value::precision::Precision},
    util::num::{format_complex, format_float},
};
use bigdecimal::{BigDecimal, RoundingMode};
use clap::{Parser, ValueEnum};

/// arbeval evaluates a numeric formula at arbitrary precision.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The grammar the formula is written in.
    #[arg(short, long, value_enum, default_value_t = DialectArg::Standard)]
    dialect: DialectArg,

    /// The number type results are delivered as.
    #[arg(short, long, value_enum, default_value_t = BridgeArg::Double)]
    bridge: BridgeArg,

    /// Internal working precision in decimal digits. Defaults to the result
    /// digits plus ten.
    #[arg(short, long)]
    precision: Option<u32>,

    /// Significant digits of decimal, float and complex results.
    #[arg(long, default_value_t = 34)]
    digits: u32,

    /// Rounding mode of decimal, float and complex results.
    #[arg(long, value_enum, default_value_t = RoundingArg::HalfEven)]
    rounding: RoundingArg,

    /// Binds a variable to the value of a formula, e.g. `x=2*pi`. Repeatable;
    /// later bindings see earlier ones.
    #[arg(long = "var", value_name = "NAME=FORMULA")]
    variables: Vec<String>,

    /// Defines a function, e.g. `f(x,y)=x^y+y^x`. Repeatable.
    #[arg(long = "fn", value_name = "NAME(PARAMS)=FORMULA")]
    functions: Vec<String>,

    /// Prints the simplified expression tree instead of the value.
    #[arg(short, long)]
    simplify: bool,

    /// The formula to evaluate.
    expression: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DialectArg {
    Standard,
    Simplified,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BridgeArg {
    Double,
    Decimal,
    Float,
    Complex,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RoundingArg {
    Up,
    Down,
    Ceiling,
    Floor,
    HalfUp,
    HalfDown,
    HalfEven,
}

impl From<DialectArg> for Dialect {
    fn from(dialect: DialectArg) -> Self {
        match dialect {
            DialectArg::Standard => Self::Standard,
            DialectArg::Simplified => Self::Simplified,
        }
    }
}

impl From<RoundingArg> for RoundingMode {
    fn from(mode: RoundingArg) -> Self {
        match mode {
            RoundingArg::Up => Self::Up,
            RoundingArg::Down => Self::Down,
            RoundingArg::Ceiling => Self::Ceiling,
            RoundingArg::Floor => Self::Floor,
            RoundingArg::HalfUp => Self::HalfUp,
            RoundingArg::HalfDown => Self::HalfDown,
            RoundingArg::HalfEven => Self::HalfEven,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match evaluate(&args) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}

/// Builds the standard context of the selected bridge and evaluates the
/// expression in it.
fn evaluate(args: &Args) -> Result<String, Box<dyn Error>> {
    let rule = RoundingRule::new(args.digits, args.rounding.into());
    let precision = args.precision.map(Precision::new);

    match args.bridge {
        BridgeArg::Double => {
            let bridge = DoubleBridge::default();
            let context = match precision {
                Some(precision) => DoubleContext::standard_with_precision(bridge, precision),
                None => DoubleContext::standard_with(bridge),
            };
            run(context, args, f64::to_string)
        },
        BridgeArg::Decimal => {
            let precision = precision.unwrap_or_else(|| rule.default_precision());
            let context = DecimalContext::standard_with_precision(rule, precision);
            run(context, args, |value: &BigDecimal| value.normalized().to_string())
        },
        BridgeArg::Float => {
            let precision = precision.unwrap_or_else(|| rule.default_precision());
            let context = FloatContext::standard_with_precision(rule, precision);
            run(context, args, format_float)
        },
        BridgeArg::Complex => {
            let precision = precision.unwrap_or_else(|| rule.default_precision());
            let mut context = ComplexContext::standard_with_precision(rule, precision);
            context.with_complex_functions()?;
            run(context, args, format_complex)
        },
    }
}

/// Applies the bindings and definitions of `args` to `context` and evaluates
/// the expression.
fn run<B, R>(mut context: Context<B>, args: &Args, render: R) -> Result<String, Box<dyn Error>>
    where B: Bridge,
          R: Fn(&B::Value) -> String
{
    context.set_dialect(args.dialect.into());

    for binding in &args.variables {
        let (name, formula) = binding.split_once('=')
                                     .ok_or_else(|| format!("Expected NAME=FORMULA, got '{binding}'"))?;
        let value = context.evaluate_internal(formula)?;
        context.assign_internal(name.trim(), &value)?;
    }

    for definition in &args.functions {
        let (name, parameters, body) = split_definition(definition)?;
        context.define_function(name, &parameters, body)?;
    }

    let expr = context.parse(&args.expression)?;
    if args.simplify {
        return Ok(context.simplify(&expr)?.to_string());
    }
    Ok(render(&context.evaluate_expr(&expr)?))
}

/// Splits `f(x, y) = body` into its name, parameters and body.
fn split_definition(definition: &str) -> Result<(&str, Vec<&str>, &str), String> {
    let malformed = || format!("Expected NAME(PARAMS)=FORMULA, got '{definition}'");
    let (head, body) = definition.split_once('=').ok_or_else(malformed)?;
    let (name, parameters) = head.trim().split_once('(').ok_or_else(malformed)?;
    let parameters = parameters.strip_suffix(')').ok_or_else(malformed)?;
    let parameters = parameters.split(',')
                               .map(str::trim)
                               .filter(|p| !p.is_empty())
                               .collect();
    Ok((name.trim(), parameters, body))
}
