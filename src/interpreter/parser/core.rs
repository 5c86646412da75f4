use crate::{
    ast::Expr,
    error::ParseResult,
    interpreter::{
        parser::{
            names::NameScanner,
            utils::{Backtrack, Cursor, Parsed, Rule},
        },
        registry::Registry,
        value::precision::Precision,
    },
};

/// Selects the grammar variant a context parses with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Explicit operators only. A unary sign binds tighter than `^`, so
    /// `-2^2` is `(-2)^2`. Literals may carry an exponent: `1.5e3`.
    #[default]
    Standard,
    /// Adds implicit multiplication of adjacent primitives: `2x`,
    /// `(x+1)(x-1)`. An implicit product in an exponent is one unit, so
    /// `x^2y` is `x^(2*y)`. A unary sign binds looser than `^`, so `-2^2`
    /// is `-(2^2)`. Literals have no exponent, which lets `2e` read as
    /// `2*e`.
    Simplified,
}

/// An alternative of an ordered choice.
pub type Alternative<'r> = fn(&Grammar<'r>, &mut Cursor<'_>) -> Parsed<Expr>;

/// The parser for one dialect over the names of one registry.
///
/// A grammar borrows the registry it resolves names against, so it always
/// sees the current set of definitions. It is cheap to build and is built
/// anew for every parse.
///
/// # Example
/// ```
/// use arbeval::{
///     context::DoubleContext,
///     interpreter::parser::core::{Dialect, Grammar},
/// };
///
/// let mut context = DoubleContext::standard();
/// context.variable("x").unwrap();
///
/// let standard = Grammar::new(context.registry(), context.precision(), Dialect::Standard);
/// assert_eq!(standard.parse("-2^sin(x)").unwrap().to_string(), "(-2 ^ sin(x))");
///
/// let simplified = Grammar::new(context.registry(), context.precision(), Dialect::Simplified);
/// assert_eq!(simplified.parse("-2^sin(x)").unwrap().to_string(), "-(2 ^ sin(x))");
/// assert_eq!(simplified.parse("2pi x").unwrap().to_string(), "((2 * pi) * x)");
/// ```
pub struct Grammar<'r> {
    pub(crate) registry:  &'r Registry,
    pub(crate) names:     NameScanner<'r>,
    pub(crate) precision: Precision,
    pub(crate) dialect:   Dialect,
}

impl<'r> Grammar<'r> {
    /// Creates the grammar of `dialect` over the names in `registry`, building
    /// literals at `precision`.
    #[must_use]
    pub fn new(registry: &'r Registry, precision: Precision, dialect: Dialect) -> Self {
        Self { registry,
               names: NameScanner::new(registry.names()),
               precision,
               dialect }
    }

    /// Parses a complete formula.
    ///
    /// The grammar is: `formula := sum <end of input>`
    ///
    /// # Errors
    /// - `TrailingInput` if text remains behind a complete formula.
    /// - `UnknownName`, `MissingArguments`, `ArityMismatch` or `Expected`
    ///   for the farthest problem the parser ran into.
    pub fn parse(&self, source: &str) -> ParseResult<Expr> {
        let mut cursor = Cursor::new(source);
        let parsed = self.sum(&mut cursor);
        cursor.skip_whitespace();

        match parsed {
            Ok(expr) if cursor.at_end() => {
                log::debug!("parsed {source:?} as {expr}");
                Ok(expr)
            },
            Ok(_) => Err(cursor.trailing_error()),
            Err(Backtrack) => Err(cursor.into_error()),
        }
    }

    /// Tries `alternatives` in order and returns the first success.
    ///
    /// The cursor is restored before each attempt, so a failed alternative
    /// consumes nothing.
    pub(crate) fn choice(&self,
                         c: &mut Cursor<'_>,
                         alternatives: &[Alternative<'r>])
                         -> Parsed<Expr> {
        let start = c.position();
        for alternative in alternatives {
            match alternative(self, c) {
                Ok(expr) => return Ok(expr),
                Err(Backtrack) => c.reset(start),
            }
        }
        Err(Backtrack)
    }

    /// Parses a list of items.
    ///
    /// The rule is: `head (separator tail)*`, or `head tail*` without a
    /// separator. With `tail_required` at least one tail item must follow the
    /// head.
    pub(crate) fn list<H, T>(&self,
                             c: &mut Cursor<'_>,
                             head: H,
                             tail: T,
                             separator: Option<char>,
                             tail_required: bool)
                             -> Parsed<Vec<Expr>>
        where H: Fn(&Self, &mut Cursor<'_>) -> Parsed<Expr>,
              T: Fn(&Self, &mut Cursor<'_>) -> Parsed<Expr>
    {
        let mut items = vec![head(self, c)?];
        loop {
            let start = c.position();
            if let Some(separator) = separator
               && !c.eat(separator)
            {
                break;
            }
            match tail(self, c) {
                Ok(item) => items.push(item),
                Err(Backtrack) => {
                    c.reset(start);
                    break;
                },
            }
        }

        if tail_required && items.len() < 2 {
            return Err(Backtrack);
        }
        Ok(items)
    }

    /// Runs `parser` for `rule`, reusing the outcome of an earlier run at the
    /// same position.
    ///
    /// Ordered choices re-read the same operand many times while
    /// backtracking; without this, nested parentheses would cost exponential
    /// time.
    pub(crate) fn memoized<P>(&self, c: &mut Cursor<'_>, rule: Rule, parser: P) -> Parsed<Expr>
        where P: Fn(&Self, &mut Cursor<'_>) -> Parsed<Expr>
    {
        let start = c.position();
        if let Some(outcome) = c.recall(rule, start) {
            return match outcome {
                Some((expr, end)) => {
                    c.reset(end);
                    Ok(expr)
                },
                None => Err(Backtrack),
            };
        }

        let parsed = parser(self, c);
        let outcome = match &parsed {
            Ok(expr) => Some((expr.clone(), c.position())),
            Err(Backtrack) => {
                c.reset(start);
                None
            },
        };
        c.remember(rule, start, outcome);
        parsed
    }
}
