use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub(crate) type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub(crate) fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+", priority = 3)]
    Integer,

    // Side counts are checked by the parser so that unsupported dice get their own error
    #[regex(r"[0-9]*[dD][0-9]+")]
    Dice,

    #[regex(r"\([^()]*\)")]
    Label,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    #[regex(r"[A-Za-z0-9_]+")]
    Word,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub(crate) const OPERATORS: &'static [Self] = &[Self::Plus, Self::Minus];

    pub(crate) const TERMS: &'static [Self] = &[Self::Integer, Self::Dice];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "<integer>",
            Self::Dice => "<dice>",
            Self::Label => "<label>",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Word | Self::Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
