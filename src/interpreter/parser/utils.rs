use std::collections::HashMap;

use logos::Logos;

use crate::{ast::Expr, error::ParseError, interpreter::lexer::Token};

/// Marks a failed parse attempt.
///
/// Alternatives fail all the time while backtracking, so the failure itself
/// carries nothing. The diagnostic worth reporting is recorded in the
/// [`Cursor`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backtrack;

/// Result of a parse attempt.
pub type Parsed<T> = Result<T, Backtrack>;

/// The grammar rules whose results are memoised per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Sum,
    Factor,
    Power,
    ImplicitProduct,
    Sign,
    Primitive,
}

/// A position in the source text, plus the bookkeeping of one parse run.
///
/// Positions are byte offsets; diagnostics convert them to character
/// offsets.
pub struct Cursor<'s> {
    source:   &'s str,
    pos:      usize,
    farthest: Option<ParseError>,
    memo:     HashMap<(Rule, usize), Option<(Expr, usize)>>,
}

impl<'s> Cursor<'s> {
    /// Creates a cursor at the start of `source`.
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self { source,
               pos: 0,
               farthest: None,
               memo: HashMap::new() }
    }

    /// Returns the byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Moves back (or forth) to a byte position obtained from
    /// [`position`](Self::position).
    pub const fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Returns the unconsumed input.
    #[must_use]
    pub fn rest(&self) -> &'s str {
        &self.source[self.pos..]
    }

    /// Returns the character offset of the current position.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.source[..self.pos].chars().count()
    }

    /// Tells whether all input is consumed.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Consumes `len` bytes.
    pub const fn advance(&mut self, len: usize) {
        self.pos += len;
    }

    /// Skips whitespace.
    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Skips whitespace and lexes the next token without consuming it.
    ///
    /// Returns the token and its length in bytes.
    pub fn peek(&mut self) -> Option<(Token, usize)> {
        self.skip_whitespace();
        let mut lexer = Token::lexer(self.rest());
        match lexer.next() {
            Some(Ok(token)) if lexer.span().start == 0 => Some((token, lexer.span().end)),
            _ => None,
        }
    }

    /// Consumes the single character token `symbol` if it is next.
    pub fn eat(&mut self, symbol: char) -> bool {
        match self.peek() {
            Some((token, len)) if token.symbol() == Some(symbol) => {
                self.advance(len);
                true
            },
            _ => false,
        }
    }

    /// Consumes the next token if it is one of `operators`, returning the
    /// associated constructor.
    pub fn eat_operator<F: Copy>(&mut self, operators: &[(char, F)]) -> Option<F> {
        let (token, len) = self.peek()?;
        let symbol = token.symbol()?;
        let (_, constructor) = operators.iter().find(|(s, _)| *s == symbol)?;
        self.advance(len);
        Some(*constructor)
    }

    /// Records `error` as a candidate diagnostic and returns the failure
    /// marker.
    ///
    /// The diagnostic farthest into the input is kept; at equal offsets the
    /// more specific one wins.
    pub fn fail(&mut self, error: ParseError) -> Backtrack {
        let replace = self.farthest.as_ref().is_none_or(|current| {
                                               (error.offset(), error.specificity())
                                               > (current.offset(), current.specificity())
                                           });
        if replace {
            self.farthest = Some(error);
        }
        Backtrack
    }

    /// Records that `expected` was expected at the next token.
    pub fn expected(&mut self, expected: &'static str) -> Backtrack {
        self.skip_whitespace();
        let error = ParseError::Expected { expected,
                                           found: self.rest().chars().next(),
                                           offset: self.offset() };
        self.fail(error)
    }

    /// Looks up a memoised result of `rule` at byte position `pos`.
    #[must_use]
    pub fn recall(&self, rule: Rule, pos: usize) -> Option<Option<(Expr, usize)>> {
        self.memo.get(&(rule, pos)).cloned()
    }

    /// Memoises the result of `rule` at byte position `pos`.
    pub fn remember(&mut self, rule: Rule, pos: usize, result: Option<(Expr, usize)>) {
        self.memo.insert((rule, pos), result);
    }

    /// Builds the error for a parse that stopped before the end of input.
    ///
    /// A recorded failure at or behind the stop position explains the stop
    /// better than the bare trailing text does.
    #[must_use]
    pub fn trailing_error(mut self) -> ParseError {
        self.skip_whitespace();
        let offset = self.offset();
        match self.farthest {
            Some(error) if error.offset() >= offset => error,
            _ => ParseError::TrailingInput { input: self.rest().to_string(),
                                             offset },
        }
    }

    /// Builds the error for a parse that failed altogether.
    #[must_use]
    pub fn into_error(mut self) -> ParseError {
        match self.farthest.take() {
            Some(error) => error,
            None => {
                self.reset(0);
                self.skip_whitespace();
                ParseError::Expected { expected: "a number, a name or '('",
                                       found:    self.rest().chars().next(),
                                       offset:   self.offset(), }
            },
        }
    }
}
