use std::fmt::{self, Write};

/// Integer literals and expression totals.
pub type Int = i64;
/// Die faces and side counts.
pub type UInt = u32;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// How a term's value is folded into the running total.
///
/// The first term of an expression always carries [Operation::NoOp].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operation {
    NoOp,
    Add,
    Sub,
}

impl Operation {
    pub const fn symbol(self) -> Option<char> {
        match self {
            Self::NoOp => None,
            Self::Add => Some('+'),
            Self::Sub => Some('-'),
        }
    }

    /// Applies the operation to the accumulator. Saturates instead of wrapping.
    pub const fn apply(self, acc: Int, value: Int) -> Int {
        match self {
            Self::NoOp => acc,
            Self::Add => acc.saturating_add(value),
            Self::Sub => acc.saturating_sub(value),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(c) => f.write_char(c),
            None => Ok(()),
        }
    }
}
