use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        evaluator::function::core::Function,
        lexer::{Token, exponent_len},
        parser::{
            core::{Dialect, Grammar},
            utils::{Backtrack, Cursor, Parsed, Rule},
        },
        registry::Definition,
    },
};

/// Builds the node for a unary operator from its operand.
pub type UnaryFn = fn(Expr) -> Expr;

/// Unary `-` negates, unary `+` keeps its operand as is.
pub const SIGN_OPERATORS: &[(char, UnaryFn)] = &[('-', Expr::neg), ('+', identity)];

const fn identity(expr: Expr) -> Expr {
    expr
}

impl Grammar<'_> {
    /// Parses a unary operator applied to an operand.
    ///
    /// The rule is: `op operand`
    pub(crate) fn unary<P>(&self,
                           c: &mut Cursor<'_>,
                           operators: &[(char, UnaryFn)],
                           operand: P)
                           -> Parsed<Expr>
        where P: Fn(&Self, &mut Cursor<'_>) -> Parsed<Expr>
    {
        let op = c.eat_operator(operators).ok_or(Backtrack)?;
        operand(self, c).map(op)
    }

    /// Parses a primitive.
    ///
    /// Standard: `primitive := literal | sign primitive | name-or-call |
    /// group`
    ///
    /// Simplified: `primitive := literal | name-or-call | group`
    pub(crate) fn primitive(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        self.memoized(c, Rule::Primitive, |g, c| {
                let parsed = match g.dialect {
                    Dialect::Standard => g.choice(c,
                                                  &[Self::literal,
                                                    Self::signed_primitive,
                                                    Self::definition,
                                                    Self::group]),
                    Dialect::Simplified => {
                        g.choice(c, &[Self::literal, Self::definition, Self::group])
                    },
                };
                parsed.map_err(|Backtrack| c.expected("a number, a name or '('"))
            })
    }

    fn signed_primitive(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        self.unary(c, SIGN_OPERATORS, Self::primitive)
    }

    /// Parses a numeric literal.
    ///
    /// The rule is: `digits ('.' digits?)? | '.' digits`, followed by an
    /// optional exponent `[eE][+-]?digits` in the standard dialect. The value
    /// is read from the decimal text at the working precision.
    pub(crate) fn literal(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        let Some((Token::Number, significand)) = c.peek() else {
            return Err(Backtrack);
        };
        let rest = c.rest();
        let len = match self.dialect {
            Dialect::Standard => significand + exponent_len(&rest[significand..]),
            Dialect::Simplified => significand,
        };
        let text = &rest[..len];

        match self.precision.parse_decimal(text) {
            Some(value) => {
                c.advance(len);
                Ok(Expr::Literal(value))
            },
            None => {
                let error = ParseError::InvalidLiteral { text:   text.to_string(),
                                                         offset: c.offset(), };
                Err(c.fail(error))
            },
        }
    }

    /// Parses a reference to a constant or variable, or a function call.
    ///
    /// The rule is: `value-name | function-name '(' sum (',' sum)* ')'`
    ///
    /// The longest registered name at the cursor is taken. A function name
    /// must be followed by an argument list whose length the function
    /// accepts.
    pub(crate) fn definition(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        c.skip_whitespace();
        let offset = c.offset();

        let Some(name) = self.names.longest_match(c.rest()) else {
            if let Some((Token::Word, len)) = c.peek() {
                let error = ParseError::UnknownName { name: c.rest()[..len].to_string(),
                                                      offset };
                return Err(c.fail(error));
            }
            return Err(Backtrack);
        };
        c.advance(name.len());

        match self.registry.get(name) {
            Some(Definition::Function(function)) => self.call(c, offset, name, function.as_ref()),
            Some(_) => Ok(Expr::name(name)),
            None => Err(Backtrack),
        }
    }

    fn call(&self,
            c: &mut Cursor<'_>,
            offset: usize,
            name: &str,
            function: &dyn Function)
            -> Parsed<Expr> {
        if !c.eat('(') {
            let error = ParseError::MissingArguments { name: name.to_string(),
                                                       offset };
            return Err(c.fail(error));
        }

        let arguments = self.list(c, Self::sum, Self::sum, Some(','), false)?;
        if !c.eat(')') {
            return Err(c.expected("',' or ')'"));
        }

        if !function.accepts(arguments.len()) {
            let error = ParseError::ArityMismatch { name:   name.to_string(),
                                                    min:    function.min_args(),
                                                    max:    function.max_args(),
                                                    found:  arguments.len(),
                                                    offset: c.offset(), };
            return Err(c.fail(error));
        }

        Ok(Expr::call(name, arguments))
    }

    /// Parses a parenthesized formula.
    ///
    /// The rule is: `'(' sum ')'`
    pub(crate) fn group(&self, c: &mut Cursor<'_>) -> Parsed<Expr> {
        if !c.eat('(') {
            return Err(Backtrack);
        }
        let inner = self.sum(c)?;
        if c.eat(')') { Ok(inner) } else { Err(c.expected("')'")) }
    }
}
