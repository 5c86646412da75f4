use crate::{
    ast::Expr,
    interpreter::parser::{
        core::Grammar,
        utils::{Backtrack, Cursor, Parsed},
    },
};

/// Builds the node for a binary operator from its operands.
pub type BinaryFn = fn(Expr, Expr) -> Expr;

/// `+` and `-`.
pub const SUM_OPERATORS: &[(char, BinaryFn)] = &[('+', Expr::add), ('-', Expr::sub)];
/// `*` and `/`.
pub const FACTOR_OPERATORS: &[(char, BinaryFn)] = &[('*', Expr::mul), ('/', Expr::div)];
/// `^`.
pub const POWER_OPERATORS: &[(char, BinaryFn)] = &[('^', Expr::pow)];

impl Grammar<'_> {
    /// Parses a left-associative chain.
    ///
    /// The rule is: `head (op operand)+`, combined left to right, so
    /// `1-2-3` yields `(1-2)-3`.
    ///
    /// At least one `(op, operand)` pair is required; callers fall back to the
    /// bare operand as an alternative. A pair whose operand fails is not
    /// consumed.
    ///
    /// # Parameters
    /// - `c`: The cursor.
    /// - `head`: Parser for the first operand.
    /// - `operand`: Parser for the operands behind the operators.
    /// - `operators`: Operator characters and the nodes they build.
    pub(crate) fn left_fold<H, O>(&self,
                                  c: &mut Cursor<'_>,
                                  head: H,
                                  operand: O,
                                  operators: &[(char, BinaryFn)])
                                  -> Parsed<Expr>
        where H: Fn(&Self, &mut Cursor<'_>) -> Parsed<Expr>,
              O: Fn(&Self, &mut Cursor<'_>) -> Parsed<Expr>
    {
        let mut result = head(self, c)?;
        let mut folded = false;

        loop {
            let start = c.position();
            let Some(op) = c.eat_operator(operators) else {
                c.reset(start);
                break;
            };
            match operand(self, c) {
                Ok(right) => {
                    result = op(result, right);
                    folded = true;
                },
                Err(Backtrack) => {
                    c.reset(start);
                    break;
                },
            }
        }

        if folded { Ok(result) } else { Err(Backtrack) }
    }

    /// Parses a right-associative chain.
    ///
    /// The rule is: `head (op middle)* op last`, combined from the right, so
    /// `2^3^2` yields `2^(3^2)`.
    ///
    /// The middle pairs are read greedily. The chain must then end with one
    /// `(op, last)` pair; if it does not fit, middle pairs are given back one
    /// by one until it does. Without any fitting final pair the whole chain
    /// fails.
    ///
    /// # Parameters
    /// - `c`: The cursor.
    /// - `head`: Parser for the first operand.
    /// - `middle`: Parser for the inner operands.
    /// - `last`: Parser for the rightmost operand.
    /// - `operators`: Operator characters and the nodes they build.
    pub(crate) fn right_fold<H, M, L>(&self,
                                      c: &mut Cursor<'_>,
                                      head: H,
                                      middle: M,
                                      last: L,
                                      operators: &[(char, BinaryFn)])
                                      -> Parsed<Expr>
        where H: Fn(&Self, &mut Cursor<'_>) -> Parsed<Expr>,
              M: Fn(&Self, &mut Cursor<'_>) -> Parsed<Expr>,
              L: Fn(&Self, &mut Cursor<'_>) -> Parsed<Expr>
    {
        let head = head(self, c)?;
        let mut pairs: Vec<(usize, BinaryFn, Expr)> = Vec::new();

        loop {
            let start = c.position();
            let Some(op) = c.eat_operator(operators) else {
                c.reset(start);
                break;
            };
            match middle(self, c) {
                Ok(operand) => pairs.push((start, op, operand)),
                Err(Backtrack) => {
                    c.reset(start);
                    break;
                },
            }
        }

        loop {
            let start = c.position();
            if let Some(op) = c.eat_operator(operators)
               && let Ok(operand) = last(self, c)
            {
                let (mut op, mut result) = (op, operand);
                while let Some((_, previous, operand)) = pairs.pop() {
                    result = op(operand, result);
                    op = previous;
                }
                return Ok(op(head, result));
            }
            let (start, ..) = pairs.pop().ok_or_else(|| {
                                              c.reset(start);
                                              Backtrack
                                          })?;
            c.reset(start);
        }
    }
}
