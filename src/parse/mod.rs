mod error;
mod lexer;
mod parser;

pub use error::{DieParseError, ParseErrorKind};
pub use lexer::TokenKind;

use crate::dice::MultiDie;
use crate::expr::Expression;

/// Parses a dice expression such as `D20 - 2 (STR) + D4 (Acid)`.
///
/// # Examples
/// ```
/// let expr = fair_dice::parse("2d6 + 3 (DEX)").unwrap();
/// assert_eq!(expr.to_string(), "2D6 + 3 (DEX)");
/// ```
pub fn parse(s: &str) -> Result<Expression, DieParseError> {
    let parsed = parser::Parser::new(s).parse();
    match &parsed {
        Ok(expr) => log::debug!("parsed {:?} as {}", s, expr),
        Err(why) => log::debug!("rejected dice expression: {}", why),
    }
    parsed
}

pub(crate) fn parse_multi_die(s: &str) -> Result<MultiDie, DieParseError> {
    parser::Parser::new(s).parse_multi_die()
}
