//! Fair dice for tabletop games.
//!
//! Text such as `D20 - 2 (STR) + D4 (Acid)` is parsed into an [Expression],
//! rolled with a cryptographically secure random source and rendered back to
//! text.
//!
//! ```
//! use fair_dice::{RenderOptions, SimpleStringifier};
//!
//! let outcome = fair_dice::evaluate("3", None, &mut SimpleStringifier::new(), RenderOptions::default()).unwrap();
//! assert_eq!(outcome.text, "3\n= 3");
//! assert_eq!(outcome.total, 3);
//! ```

pub mod common;
pub mod config;
pub mod dice;
pub mod error;
pub mod expr;
pub mod parse;
pub mod roll;

pub use config::Config;
pub use dice::{DieRoll, DieType, MultiDie, MultiDieRoll};
pub use error::{Error, InvalidConfiguration, Result};
pub use expr::{Expression, Label, LabeledTerm, Term, TermOperation};
pub use parse::{parse, DieParseError};
pub use roll::{
    AcceptStringify, ExpressionRoll, MarkdownStringifier, RenderOptions, Resolution,
    ResolvedRoll, Roller, SecureRoller, SimpleStringifier, Stringify,
};

use common::Int;

/// Rolls `expr` once with the secure roller.
pub fn roll(expr: &Expression) -> ExpressionRoll {
    expr.roll()
}

/// Rolls `expr` twice with the secure roller and keeps one result.
pub fn roll_resolved(expr: &Expression, resolution: Resolution) -> ResolvedRoll {
    expr.roll_resolved(resolution)
}

/// Renders a roll as plain text.
pub fn render<A: AcceptStringify + ?Sized>(roll: &A, options: RenderOptions) -> String {
    SimpleStringifier::new().stringify(roll, options)
}

/// The rendered text and numeric total of one request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Outcome {
    pub text: String,
    pub total: Int,
}

/// Parses, rolls and renders `text` in one go.
pub fn evaluate<S: Stringify + ?Sized>(
    text: &str,
    resolution: Option<Resolution>,
    stringifier: &mut S,
    options: RenderOptions,
) -> Result<Outcome> {
    evaluate_with(text, resolution, stringifier, options, &mut SecureRoller::default())
}

pub fn evaluate_with<S: Stringify + ?Sized, R: Roller>(
    text: &str,
    resolution: Option<Resolution>,
    stringifier: &mut S,
    options: RenderOptions,
    roller: &mut R,
) -> Result<Outcome> {
    let expr = parse(text)?;
    Ok(match resolution {
        Some(resolution) => {
            let resolved = expr.roll_resolved_with(resolution, roller);
            Outcome {
                text: stringifier.stringify(&resolved, options),
                total: resolved.value(),
            }
        }
        None => {
            let roll = expr.roll_with(roller);
            Outcome {
                text: stringifier.stringify(&roll, options),
                total: roll.value(),
            }
        }
    })
}
