use crate::common::*;
use crate::dice::MultiDie;
use crate::error::InvalidConfiguration;
use crate::roll::{ExpressionRoll, Resolution, ResolvedRoll, RollContext, Roller, SecureRoller};
use std::fmt;

pub const MAX_LABEL_LEN: usize = 20;

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum LabelError {
    #[error("labels cannot be empty")]
    Empty,
    #[error("labels can be at most {} characters, found {0}", MAX_LABEL_LEN)]
    TooLong(usize),
    #[error("labels cannot contain {0:?}")]
    InvalidChar(char),
}

/// A short annotation attached to a term, such as `STR` or `Fire`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Label(String);

impl Label {
    /// Surrounding whitespace is not part of the label: `( STR )` is `STR`,
    /// and only the trimmed text counts towards [MAX_LABEL_LEN].
    pub fn new(text: &str) -> Result<Self, LabelError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LabelError::Empty);
        }
        let len = text.chars().count();
        if len > MAX_LABEL_LEN {
            return Err(LabelError::TooLong(len));
        }
        if let Some(c) = text.chars().find(|&c| !is_label_char(c)) {
            return Err(LabelError::InvalidChar(c));
        }
        Ok(Self(text.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | ':')
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Term {
    Int(Int),
    MultiDie(MultiDie),
}

impl From<Int> for Term {
    fn from(x: Int) -> Self {
        Self::Int(x)
    }
}

impl From<MultiDie> for Term {
    fn from(x: MultiDie) -> Self {
        Self::MultiDie(x)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => fmt::Display::fmt(x, f),
            Self::MultiDie(x) => fmt::Display::fmt(x, f),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct LabeledTerm {
    pub term: Term,
    pub label: Option<Label>,
}

impl LabeledTerm {
    pub fn new(term: impl Into<Term>) -> Self {
        Self {
            term: term.into(),
            label: None,
        }
    }

    pub fn labeled(term: impl Into<Term>, label: &str) -> Result<Self, LabelError> {
        Ok(Self {
            term: term.into(),
            label: Some(Label::new(label)?),
        })
    }
}

impl fmt::Display for LabeledTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)?;
        if let Some(label) = &self.label {
            write!(f, " ({})", label)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TermOperation {
    pub operation: Operation,
    pub labeled_term: LabeledTerm,
}

impl TermOperation {
    pub fn new(operation: Operation, labeled_term: LabeledTerm) -> Self {
        Self {
            operation,
            labeled_term,
        }
    }

    pub fn add(labeled_term: LabeledTerm) -> Self {
        Self::new(Operation::Add, labeled_term)
    }

    pub fn sub(labeled_term: LabeledTerm) -> Self {
        Self::new(Operation::Sub, labeled_term)
    }
}

impl fmt::Display for TermOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation.symbol() {
            Some(op) => write!(f, "{} {}", op, self.labeled_term),
            None => write!(f, "{}", self.labeled_term),
        }
    }
}

/// A parsed dice formula such as `D20 - 2 (STR) + D4 (Acid)`.
///
/// An expression holds no roll state. Every call to [Expression::roll]
/// draws fresh dice, and the [fmt::Display] output parses back to an equal
/// expression.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Expression {
    first_term: LabeledTerm,
    term_ops: Vec<TermOperation>,
}

impl Expression {
    pub fn new(
        first_term: LabeledTerm,
        term_ops: Vec<TermOperation>,
    ) -> Result<Self, InvalidConfiguration> {
        if term_ops.iter().any(|op| op.operation == Operation::NoOp) {
            return Err(InvalidConfiguration::NoOpContinuation);
        }
        check_literal(&first_term)?;
        for op in &term_ops {
            check_literal(&op.labeled_term)?;
        }
        Ok(Self {
            first_term,
            term_ops,
        })
    }

    pub(crate) fn from_parts(first_term: LabeledTerm, term_ops: Vec<TermOperation>) -> Self {
        debug_assert!(term_ops.iter().all(|op| op.operation != Operation::NoOp));
        Self {
            first_term,
            term_ops,
        }
    }

    pub fn single(first_term: LabeledTerm) -> Result<Self, InvalidConfiguration> {
        Self::new(first_term, Vec::new())
    }

    pub fn first_term(&self) -> &LabeledTerm {
        &self.first_term
    }

    pub fn term_ops(&self) -> &[TermOperation] {
        &self.term_ops
    }

    /// All steps in evaluation order, the first one as a [Operation::NoOp].
    pub fn steps(&self) -> impl Iterator<Item = TermOperation> + '_ {
        std::iter::once(TermOperation::new(Operation::NoOp, self.first_term.clone()))
            .chain(self.term_ops.iter().cloned())
    }

    pub fn roll(&self) -> ExpressionRoll {
        self.roll_with(&mut SecureRoller::default())
    }

    pub fn roll_with<R: Roller>(&self, roller: &mut R) -> ExpressionRoll {
        RollContext::new(roller).eval(self)
    }

    /// Rolls the expression twice and keeps the better or worse result.
    pub fn roll_resolved(&self, resolution: Resolution) -> ResolvedRoll {
        self.roll_resolved_with(resolution, &mut SecureRoller::default())
    }

    pub fn roll_resolved_with<R: Roller>(
        &self,
        resolution: Resolution,
        roller: &mut R,
    ) -> ResolvedRoll {
        RollContext::new(roller).eval_resolved(self, resolution)
    }
}

// Literals are written as bare digits, so a negative one would not parse back.
fn check_literal(labeled_term: &LabeledTerm) -> Result<(), InvalidConfiguration> {
    match labeled_term.term {
        Term::Int(x) if x < 0 => Err(InvalidConfiguration::NegativeLiteral(x)),
        _ => Ok(()),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_term)?;
        for op in &self.term_ops {
            write!(f, " {}", op)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Expression {
    type Err = crate::parse::DieParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DieType;

    fn multi(die: DieType, n: UInt) -> MultiDie {
        MultiDie::new(die, n).unwrap()
    }

    #[test]
    fn test_label() {
        assert_eq!(Label::new("STR").unwrap().as_str(), "STR");
        assert_eq!(Label::new("  Test Die Mult ").unwrap().as_str(), "Test Die Mult");
        assert_eq!(Label::new("Sword: off-hand_2").unwrap().as_str(), "Sword: off-hand_2");
        assert_eq!(Label::new("   "), Err(LabelError::Empty));
        assert_eq!(
            Label::new("abcdefghijklmnopqrstuvwxyz"),
            Err(LabelError::TooLong(26))
        );
        assert!(Label::new("abcdefghijklmnopqrst").is_ok());
        assert_eq!(
            Label::new("     abcdefghijklmnopqrst     ").unwrap().as_str(),
            "abcdefghijklmnopqrst"
        );
        assert_eq!(
            Label::new("   abcdefghijklmnopqrstu "),
            Err(LabelError::TooLong(21))
        );
        assert_eq!(Label::new("a+b"), Err(LabelError::InvalidChar('+')));
    }

    #[test]
    fn test_str_term() {
        assert_eq!(LabeledTerm::new(1).to_string(), "1");
        assert_eq!(
            LabeledTerm::labeled(2, "Test int").unwrap().to_string(),
            "2 (Test int)"
        );
        assert_eq!(LabeledTerm::new(multi(DieType::D6, 3)).to_string(), "3D6");
        assert_eq!(
            LabeledTerm::labeled(MultiDie::single(DieType::D100), "Test Die Mult")
                .unwrap()
                .to_string(),
            "D100 (Test Die Mult)"
        );
    }

    #[test]
    fn test_str_term_operation() {
        assert_eq!(TermOperation::add(LabeledTerm::new(2)).to_string(), "+ 2");
        assert_eq!(
            TermOperation::add(LabeledTerm::new(multi(DieType::D6, 3))).to_string(),
            "+ 3D6"
        );
        assert_eq!(TermOperation::sub(LabeledTerm::new(5)).to_string(), "- 5");
        assert_eq!(
            TermOperation::sub(LabeledTerm::new(multi(DieType::D4, 6))).to_string(),
            "- 6D4"
        );
        assert_eq!(
            TermOperation::new(Operation::NoOp, LabeledTerm::new(7)).to_string(),
            "7"
        );
    }

    #[test]
    fn test_str_expression() {
        let expr = Expression::new(
            LabeledTerm::new(MultiDie::single(DieType::D20)),
            vec![
                TermOperation::sub(LabeledTerm::labeled(2, "INT").unwrap()),
                TermOperation::add(
                    LabeledTerm::labeled(MultiDie::single(DieType::D4), "Acid").unwrap(),
                ),
                TermOperation::add(LabeledTerm::labeled(multi(DieType::D6, 2), "Fire").unwrap()),
            ],
        )
        .unwrap();
        assert_eq!(expr.to_string(), "D20 - 2 (INT) + D4 (Acid) + 2D6 (Fire)");
        assert_eq!(Expression::single(LabeledTerm::new(3)).unwrap().to_string(), "3");
    }

    #[test]
    fn test_new_rejects_no_op_continuation() {
        let result = Expression::new(
            LabeledTerm::new(1),
            vec![TermOperation::new(Operation::NoOp, LabeledTerm::new(2))],
        );
        assert_eq!(result, Err(InvalidConfiguration::NoOpContinuation));
    }

    #[test]
    fn test_new_rejects_negative_literal() {
        assert_eq!(
            Expression::single(LabeledTerm::new(-3)),
            Err(InvalidConfiguration::NegativeLiteral(-3))
        );
        assert_eq!(
            Expression::new(
                LabeledTerm::new(3),
                vec![TermOperation::sub(LabeledTerm::labeled(-2, "STR").unwrap())],
            ),
            Err(InvalidConfiguration::NegativeLiteral(-2))
        );

        // The same value written the parseable way round-trips.
        let expr = Expression::new(
            LabeledTerm::new(3),
            vec![TermOperation::sub(LabeledTerm::labeled(2, "STR").unwrap())],
        )
        .unwrap();
        assert_eq!(expr.to_string(), "3 - 2 (STR)");
        assert_eq!(crate::parse(&expr.to_string()).unwrap(), expr);
        assert!(Expression::single(LabeledTerm::new(0)).is_ok());
    }

    #[test]
    fn test_steps() {
        let expr: Expression = "3D6 - 1 (STR)".parse().unwrap();
        let steps: Vec<_> = expr.steps().collect();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].operation, Operation::NoOp);
        assert_eq!(steps[0].labeled_term.term, Term::MultiDie(multi(DieType::D6, 3)));
        assert_eq!(steps[1].operation, Operation::Sub);
        assert_eq!(steps[1].labeled_term, LabeledTerm::labeled(1, "STR").unwrap());
    }
}
