use crate::common::*;
use crate::dice::{DieRoll, MultiDieRoll};
use crate::expr::TermOperation;
use std::fmt;
use std::str::FromStr;

#[enum_dispatch::enum_dispatch]
pub trait Eval {
    /// The value this step contributes before its operation is applied.
    fn value(&self) -> Int;

    fn term_op(&self) -> &TermOperation;
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct IntTermResult {
    pub value: Int,
    pub term_op: TermOperation,
}

impl Eval for IntTermResult {
    fn value(&self) -> Int {
        self.value
    }

    fn term_op(&self) -> &TermOperation {
        &self.term_op
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MultiDieTermResult {
    pub rolls: MultiDieRoll,
    pub term_op: TermOperation,
}

impl Eval for MultiDieTermResult {
    fn value(&self) -> Int {
        self.rolls.total()
    }

    fn term_op(&self) -> &TermOperation {
        &self.term_op
    }
}

/// One evaluated step of an expression, with where its value came from.
#[derive(Debug, Clone, Eq, PartialEq)]
#[enum_dispatch::enum_dispatch(Eval)]
pub enum TermResult {
    Int(IntTermResult),
    MultiDie(MultiDieTermResult),
}

/// The outcome of rolling an [Expression](crate::Expression) once.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ExpressionRoll {
    value: Int,
    results: NonEmpty<TermResult>,
}

impl ExpressionRoll {
    pub(crate) fn new(results: NonEmpty<TermResult>) -> Self {
        let value = results.iter().fold(0, |acc, result| {
            result.term_op().operation.apply(acc, result.value())
        });
        Self { value, results }
    }

    pub fn value(&self) -> Int {
        self.value
    }

    pub fn results(&self) -> &[TermResult] {
        self.results.as_slice()
    }

    /// The face of the only die in the roll, if the whole expression was one die.
    pub fn single_die(&self) -> Option<&DieRoll> {
        match self.results.as_slice() {
            [TermResult::MultiDie(only)] => only.rolls.single(),
            _ => None,
        }
    }
}

/// How a pair of rolls of the same expression is reduced to one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// The higher roll wins.
    Advantage,
    /// The lower roll wins.
    Disadvantage,
}

impl Resolution {
    /// Whether `first` beats `second`. Ties go to `second`.
    fn prefers_first(self, first: Int, second: Int) -> bool {
        match self {
            Self::Advantage => first > second,
            Self::Disadvantage => first < second,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Advantage => "advantage",
            Self::Disadvantage => "disadvantage",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("unknown resolution {0:?}, expected advantage or disadvantage")]
pub struct ParseResolutionError(String);

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adv" | "advantage" | "best" => Ok(Self::Advantage),
            "dis" | "disadvantage" | "worst" => Ok(Self::Disadvantage),
            _ => Err(ParseResolutionError(s.to_owned())),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Pick {
    First,
    Second,
}

/// Two independent rolls of one expression and the one that counts.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ResolvedRoll {
    resolution: Resolution,
    first: ExpressionRoll,
    second: ExpressionRoll,
    chosen: Pick,
}

impl ResolvedRoll {
    pub fn resolve(resolution: Resolution, first: ExpressionRoll, second: ExpressionRoll) -> Self {
        let chosen = if resolution.prefers_first(first.value(), second.value()) {
            Pick::First
        } else {
            Pick::Second
        };
        Self {
            resolution,
            first,
            second,
            chosen,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn first(&self) -> &ExpressionRoll {
        &self.first
    }

    pub fn second(&self) -> &ExpressionRoll {
        &self.second
    }

    pub fn chosen_pick(&self) -> Pick {
        self.chosen
    }

    pub fn chosen(&self) -> &ExpressionRoll {
        match self.chosen {
            Pick::First => &self.first,
            Pick::Second => &self.second,
        }
    }

    pub fn value(&self) -> Int {
        self.chosen().value()
    }

    /// Both rolls in order, each with whether it was chosen.
    pub fn rolls(&self) -> [(&ExpressionRoll, bool); 2] {
        [
            (&self.first, self.chosen == Pick::First),
            (&self.second, self.chosen == Pick::Second),
        ]
    }
}
