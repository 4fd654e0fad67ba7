use super::roller::Roller;
use super::tree::*;
use crate::common::*;
use crate::dice::{DieRoll, DieType, MultiDie, MultiDieRoll};
use crate::expr::{Expression, Term, TermOperation};

/// Evaluates dice and expressions against a borrowed [Roller].
pub struct RollContext<'r, R> {
    roller: &'r mut R,
}

impl<'r, R: Roller> RollContext<'r, R> {
    pub fn new(roller: &'r mut R) -> Self {
        Self { roller }
    }

    pub fn roll_die(&mut self, die: DieType) -> DieRoll {
        let value = self.roller.roll(die);
        log::trace!("rolled {} on a {}", value, die);
        DieRoll::new(die, value)
    }

    pub fn roll_multi_die(&mut self, multi: &MultiDie) -> MultiDieRoll {
        let die = multi.die();
        let mut dice = NonEmpty::new(self.roll_die(die));
        let rest = multi.multiplier() as usize - 1;
        for value in self.roller.roll_iter(rest, die) {
            log::trace!("rolled {} on a {}", value, die);
            dice.push(DieRoll::new(die, value));
        }
        assert_eq!(
            dice.len(),
            multi.multiplier() as usize,
            "roller came up short rolling {}",
            multi
        );
        MultiDieRoll::new(dice)
    }

    fn eval_step(&mut self, term_op: TermOperation) -> TermResult {
        match term_op.labeled_term.term {
            Term::Int(value) => IntTermResult { value, term_op }.into(),
            Term::MultiDie(multi) => MultiDieTermResult {
                rolls: self.roll_multi_die(&multi),
                term_op,
            }
            .into(),
        }
    }

    pub fn eval(&mut self, expr: &Expression) -> ExpressionRoll {
        let first = TermOperation::new(Operation::NoOp, expr.first_term().clone());
        let mut results = NonEmpty::new(self.eval_step(first));
        for term_op in expr.term_ops() {
            results.push(self.eval_step(term_op.clone()));
        }
        let roll = ExpressionRoll::new(results);
        log::debug!("rolled {} for a total of {}", expr, roll.value());
        roll
    }

    pub fn eval_resolved(&mut self, expr: &Expression, resolution: Resolution) -> ResolvedRoll {
        let first = self.eval(expr);
        let second = self.eval(expr);
        let resolved = ResolvedRoll::resolve(resolution, first, second);
        log::debug!(
            "resolved {} with {}: {} and {}, kept {}",
            expr,
            resolution,
            resolved.first().value(),
            resolved.second().value(),
            resolved.value()
        );
        resolved
    }
}
