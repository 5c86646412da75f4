use logos::Logos;

/// Represents a lexical token of a formula.
///
/// The parser does not tokenize the whole input up front. It lexes one token
/// at the current position whenever it needs to look ahead, because the
/// meaning of letters depends on the names registered in the context: names
/// are matched against the registry directly on the source text, and
/// [`Token::Word`] only serves diagnostics.
///
/// # Example
/// ```
/// use arbeval::interpreter::lexer::Token;
/// use logos::Logos;
///
/// let tokens: Vec<_> = Token::lexer("2.5*(x+.5)").map(Result::unwrap).collect();
/// assert_eq!(tokens,
///            [Token::Number, Token::Star, Token::LParen, Token::Word,
///             Token::Plus, Token::Number, Token::RParen]);
/// ```
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// The significand of a numeric literal: `12`, `12.`, `12.5` or `.5`.
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    #[regex(r"\.[0-9]+")]
    Number,
    /// A run of ASCII letters.
    #[regex(r"[a-zA-Z]+")]
    Word,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// Whitespace between tokens.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,
}

impl Token {
    /// Returns the character of a single character token.
    #[must_use]
    pub const fn symbol(self) -> Option<char> {
        match self {
            Self::Plus => Some('+'),
            Self::Minus => Some('-'),
            Self::Star => Some('*'),
            Self::Slash => Some('/'),
            Self::Caret => Some('^'),
            Self::LParen => Some('('),
            Self::RParen => Some(')'),
            Self::Comma => Some(','),
            Self::Number | Self::Word | Self::Whitespace => None,
        }
    }
}

/// The exponent suffix of a numeric literal, such as `e10`, `E+3` or `e-7`.
///
/// Lexed separately from [`Token`] right behind a significand, and only in
/// dialects that allow exponents, so that in other dialects `2e` can read as
/// `2` times the constant `e`.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Exponent {
    /// `[eE][+-]?[0-9]+`
    #[regex(r"[eE][+-]?[0-9]+")]
    Suffix,
}

/// Returns the byte length of an exponent suffix at the start of `input`, or
/// zero if there is none.
///
/// # Example
/// ```
/// use arbeval::interpreter::lexer::exponent_len;
///
/// assert_eq!(exponent_len("e10+x"), 3);
/// assert_eq!(exponent_len("E-7"), 3);
/// assert_eq!(exponent_len("e"), 0);
/// assert_eq!(exponent_len("e+x"), 0);
/// assert_eq!(exponent_len(" e5"), 0);
/// ```
#[must_use]
pub fn exponent_len(input: &str) -> usize {
    let mut lexer = Exponent::lexer(input);
    match lexer.next() {
        Some(Ok(Exponent::Suffix)) if lexer.span().start == 0 => lexer.span().end,
        _ => 0,
    }
}
