use super::tree::*;
use crate::common::*;
use crate::dice::{DieRoll, MultiDieRoll};

/// Controls what a rendered roll includes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Append the total on its own line. A lone die never gets one.
    pub include_total: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_total: true,
        }
    }
}

impl RenderOptions {
    pub fn without_total() -> Self {
        Self {
            include_total: false,
        }
    }
}

/// Something a [Stringify] can render.
pub trait AcceptStringify {
    fn accept<S: Stringify + ?Sized>(&self, s: &mut S, options: RenderOptions) -> String;
}

impl AcceptStringify for ExpressionRoll {
    fn accept<S: Stringify + ?Sized>(&self, s: &mut S, options: RenderOptions) -> String {
        s.str_roll(self, options)
    }
}

impl AcceptStringify for ResolvedRoll {
    fn accept<S: Stringify + ?Sized>(&self, s: &mut S, options: RenderOptions) -> String {
        s.str_resolved(self, options)
    }
}

/// Turns roll results into display text.
///
/// Every method has a plain-text default; implementations override the
/// pieces they want to look different.
pub trait Stringify {
    fn stringify<A: AcceptStringify + ?Sized>(&mut self, a: &A, options: RenderOptions) -> String {
        a.accept(self, options)
    }

    fn str_face(&mut self, roll: &DieRoll) -> String {
        roll.value().to_string()
    }

    fn str_subtotal(&mut self, subtotal: Int) -> String {
        format!("({})", subtotal)
    }

    fn str_total(&mut self, total: Int) -> String {
        format!("= {}", total)
    }

    fn mark_chosen(&mut self, line: String) -> String {
        format!("{} <-", line)
    }

    fn mark_discarded(&mut self, line: String) -> String {
        line
    }

    fn str_multi_die(&mut self, rolls: &MultiDieRoll, with_subtotal: bool) -> String {
        let mut ret = rolls
            .dice()
            .iter()
            .map(|roll| self.str_face(roll))
            .collect::<Vec<_>>()
            .join(" ");
        if with_subtotal && rolls.len() > 1 {
            ret.push(' ');
            ret.push_str(&self.str_subtotal(rolls.total()));
        }
        ret
    }

    fn str_term_result(&mut self, result: &TermResult, with_subtotal: bool) -> String {
        let mut ret = match result {
            TermResult::Int(x) => x.value.to_string(),
            TermResult::MultiDie(x) => self.str_multi_die(&x.rolls, with_subtotal),
        };
        let term_op = result.term_op();
        if let Some(op) = term_op.operation.symbol() {
            ret = format!("{} {}", op, ret);
        }
        if let Some(label) = &term_op.labeled_term.label {
            ret = format!("{} ({})", ret, label);
        }
        ret
    }

    /// The roll on one line, without its total.
    fn str_expression_roll(&mut self, roll: &ExpressionRoll) -> String {
        if let Some(die) = roll.single_die() {
            return self.str_face(die);
        }
        let with_subtotal = roll.results().len() > 1;
        roll.results()
            .iter()
            .map(|result| self.str_term_result(result, with_subtotal))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn str_roll(&mut self, roll: &ExpressionRoll, options: RenderOptions) -> String {
        let line = self.str_expression_roll(roll);
        if options.include_total && roll.single_die().is_none() {
            format!("{}\n{}", line, self.str_total(roll.value()))
        } else {
            line
        }
    }

    fn str_resolved(&mut self, resolved: &ResolvedRoll, options: RenderOptions) -> String {
        let mut lines = Vec::with_capacity(3);
        for (roll, chosen) in resolved.rolls() {
            let line = self.str_expression_roll(roll);
            lines.push(if chosen {
                self.mark_chosen(line)
            } else {
                self.mark_discarded(line)
            });
        }
        if options.include_total {
            lines.push(self.str_total(resolved.value()));
        }
        lines.join("\n")
    }
}

/// Plain text, suitable for terminals and logs.
#[derive(Debug, Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for SimpleStringifier {}

/// Chat-flavoured Markdown: faces in code spans, natural 1s and maximums in
/// bold, a heading for the total.
#[derive(Debug, Default)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for MarkdownStringifier {
    fn str_face(&mut self, roll: &DieRoll) -> String {
        let face = match roll.percentile() {
            Some((tens, ones)) => format!("`{:02}+{}`", tens, ones),
            None => format!("`{}`", roll.value()),
        };
        if roll.value() == 1 || roll.is_max() {
            format!("**{}**", face)
        } else {
            face
        }
    }

    fn str_total(&mut self, total: Int) -> String {
        format!("# {}", total)
    }

    fn mark_chosen(&mut self, line: String) -> String {
        format!("__{}__", line)
    }

    fn mark_discarded(&mut self, line: String) -> String {
        format!("~~{}~~", line)
    }
}
