use super::lexer::TokenKind;
use crate::error::InvalidConfiguration;
use crate::expr::LabelError;
use std::fmt;
use std::ops::Range;

/// The input is not a dice expression. The message is meant for the end user.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("invalid die roll expression `{input}`: {kind}")]
pub struct DieParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    Empty,
    UnexpectedEnd {
        expected: Vec<TokenKind>,
    },
    UnexpectedToken {
        found: String,
        expected: Vec<TokenKind>,
    },
    Unrecognized(String),
    InvalidDie {
        die: String,
        reason: InvalidConfiguration,
    },
    InvalidLabel {
        label: String,
        reason: LabelError,
    },
    IntegerOutOfRange(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("nothing to roll"),
            Self::UnexpectedEnd { expected } => {
                f.write_str("unexpected end of input")?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedToken { found, expected } => {
                write!(f, "unexpected `{}`", found)?;
                fmt_expected(expected, f)
            }
            Self::Unrecognized(s) => {
                write!(f, "`{}` is invalid. Should be of the form D20 or 3D6", s)
            }
            Self::InvalidDie { die, reason } => write!(f, "`{}`: {}", die, reason),
            Self::InvalidLabel { label, reason } => write!(f, "`{}`: {}", label, reason),
            Self::IntegerOutOfRange(s) => write!(f, "`{}` is too large", s),
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expected {
        [] => Ok(()),
        [a] => write!(f, ", expected {}", a),
        [a, b] => write!(f, ", expected {} or {}", a, b),
        [init @ .., last] => {
            f.write_str(", expected ")?;
            for exp in init {
                write!(f, "{}, ", exp)?;
            }
            write!(f, "or {}", last)
        }
    }
}
