use rug::Complex;

use crate::util::num::format_complex;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition: `+`
    Add,
    /// Subtraction: `-`
    Sub,
    /// Multiplication: `*`, or juxtaposition in the simplified dialect.
    Mul,
    /// Division: `/`
    Div,
    /// Exponentiation: `^`
    Pow,
}

/// An immutable expression tree node.
///
/// Trees are produced by the parser of a [`Context`] and evaluated against the
/// [`Scope`] of a context. Names are kept as names: they are resolved each
/// time the tree is evaluated, so an expression follows later changes of the
/// variables it refers to.
///
/// Equality is structural, which makes it suitable to compare a simplified
/// tree with an expected shape.
///
/// # Example
/// ```
/// use arbeval::{ast::Expr, context::DoubleContext};
///
/// let mut context = DoubleContext::minimal();
/// context.variable("x").unwrap();
///
/// let expr = context.parse("2*x+1").unwrap();
/// let expected = Expr::add(Expr::mul(Expr::literal(context.precision(), "2"),
///                                    Expr::name("x")),
///                          Expr::literal(context.precision(), "1"));
/// assert_eq!(expr, expected);
/// assert_eq!(expr.to_string(), "((2 * x) + 1)");
/// ```
///
/// [`Context`]: crate::context::Context
/// [`Scope`]: crate::interpreter::evaluator::core::Scope
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A number, already held at the internal precision.
    Literal(Complex),
    /// A reference to a constant or variable.
    Name(String),
    /// Unary minus.
    Neg(Box<Self>),
    /// A binary arithmetic operation.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// The left operand, evaluated first.
        left:  Box<Self>,
        /// The right operand.
        right: Box<Self>,
    },
    /// A function call.
    Call {
        /// The function name.
        name:      String,
        /// The arguments, in call order.
        arguments: Vec<Self>,
    },
}

impl Expr {
    /// Builds a literal by parsing decimal `text` at `precision`.
    ///
    /// Intended for tests and hand-built trees; text that is not a decimal
    /// number yields a literal zero.
    #[must_use]
    pub fn literal(precision: crate::interpreter::value::precision::Precision, text: &str) -> Self {
        Self::Literal(precision.parse_decimal(text)
                               .unwrap_or_else(|| precision.zero()))
    }

    /// Builds a reference to a constant or variable.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Builds a negation.
    #[must_use]
    pub fn neg(operand: Self) -> Self {
        Self::Neg(Box::new(operand))
    }

    /// Builds a binary operation.
    #[must_use]
    pub fn binary(op: BinaryOperator, left: Self, right: Self) -> Self {
        Self::Binary { op,
                       left: Box::new(left),
                       right: Box::new(right) }
    }

    /// Builds `left + right`.
    #[must_use]
    pub fn add(left: Self, right: Self) -> Self {
        Self::binary(BinaryOperator::Add, left, right)
    }

    /// Builds `left - right`.
    #[must_use]
    pub fn sub(left: Self, right: Self) -> Self {
        Self::binary(BinaryOperator::Sub, left, right)
    }

    /// Builds `left * right`.
    #[must_use]
    pub fn mul(left: Self, right: Self) -> Self {
        Self::binary(BinaryOperator::Mul, left, right)
    }

    /// Builds `left / right`.
    #[must_use]
    pub fn div(left: Self, right: Self) -> Self {
        Self::binary(BinaryOperator::Div, left, right)
    }

    /// Builds `left ^ right`.
    #[must_use]
    pub fn pow(left: Self, right: Self) -> Self {
        Self::binary(BinaryOperator::Pow, left, right)
    }

    /// Builds a function call.
    #[must_use]
    pub fn call(name: impl Into<String>, arguments: Vec<Self>) -> Self {
        Self::Call { name: name.into(),
                     arguments }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        };
        write!(f, "{symbol}")
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(value) if value.imag().is_zero() => {
                write!(f, "{}", format_complex(value))
            },
            Self::Literal(value) => write!(f, "({})", format_complex(value)),
            Self::Name(name) => write!(f, "{name}"),
            Self::Neg(operand) => write!(f, "-{operand}"),
            Self::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            Self::Call { name, arguments } => {
                write!(f, "{name}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
        }
    }
}
