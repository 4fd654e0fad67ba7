use crate::common::{Int, UInt};
use crate::dice::{MAX_MULTIPLIER, SUPPORTED_SIDES};

/// A die or expression was built by hand with values the parser would never produce.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum InvalidConfiguration {
    #[error("{sides}-sided dice not supported. Must be one of: {}", SUPPORTED_SIDES)]
    UnsupportedSides { sides: UInt },
    #[error("die multiplier {0} is less than 1")]
    MultiplierTooSmall(UInt),
    #[error("die multiplier {0} is more than the maximum of {}", MAX_MULTIPLIER)]
    MultiplierTooLarge(UInt),
    #[error("integer literal {0} is negative, subtract its magnitude instead")]
    NegativeLiteral(Int),
    #[error("only the first term of an expression can have no operation")]
    NoOpContinuation,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] crate::parse::DieParseError),
    #[error(transparent)]
    InvalidConfiguration(#[from] InvalidConfiguration),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
